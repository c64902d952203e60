//! Steamgraph CLI: terminal client for the game catalog
//!
//! Talks to the SPARQL endpoint directly through the steamgraph gateway.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;
use std::sync::Arc;
use steamgraph::catalog::split_list;
use steamgraph::chart::{format_thousands, ChartKind, TextChart};
use steamgraph::pages::{DetailPage, SearchPage, StatsPage};
use steamgraph::sparql::{namespace, Cell, CellKind};
use steamgraph::{CatalogService, DashboardConfig, HttpGateway, PageLimits, TabularResult};

#[derive(Parser)]
#[command(name = "steamgraph", version, about = "Steamgraph game catalog CLI")]
struct Cli {
    /// SPARQL query endpoint
    #[arg(long, global = true, env = "STEAMGRAPH_ENDPOINT")]
    endpoint: Option<String>,

    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, clap::ValueEnum)]
enum ChartArg {
    Bar,
    Pie,
}

impl From<ChartArg> for ChartKind {
    fn from(arg: ChartArg) -> Self {
        match arg {
            ChartArg::Bar => ChartKind::Bar,
            ChartArg::Pie => ChartKind::Pie,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search games by title
    Search {
        /// Case-insensitive title fragment
        #[arg(default_value = "")]
        keyword: String,

        #[arg(long)]
        limit: Option<u32>,

        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show one game and similar titles
    Detail {
        /// Steam appid
        appid: String,
    },
    /// Genre statistics
    Stats {
        #[arg(long)]
        limit: Option<u32>,

        #[arg(long, default_value = "bar")]
        chart: ChartArg,
    },
    /// Execute a raw SPARQL query
    Query {
        /// The SPARQL query string
        sparql: String,
    },
    /// Start an interactive REPL
    Shell,
}

struct Session {
    catalog: CatalogService,
    limits: PageLimits,
    format: OutputFormat,
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let session = match connect(&cli) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Search { keyword, limit, offset } => {
            run_search(&session, keyword, limit, offset).await
        }
        Commands::Detail { appid } => run_detail(&session, &appid).await,
        Commands::Stats { limit, chart } => run_stats(&session, limit, chart.into()).await,
        Commands::Query { sparql } => run_query(&session, &sparql).await,
        Commands::Shell => run_shell(&session).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn connect(cli: &Cli) -> Result<Session, Box<dyn std::error::Error>> {
    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(endpoint) = &cli.endpoint {
        config.gateway.endpoint = endpoint.clone();
    }
    let gateway = HttpGateway::new(config.gateway)?;
    Ok(Session {
        catalog: CatalogService::new(Arc::new(gateway)),
        limits: config.limits,
        format: cli.format.clone(),
    })
}

async fn run_search(session: &Session, keyword: String, limit: Option<u32>, offset: u32) -> CliResult {
    let mut page = SearchPage::new(session.catalog.clone(), limit.unwrap_or(session.limits.search));
    page.keyword = keyword;
    page.offset = offset;
    page.search(false).await;

    if let Some(error) = page.error.take() {
        return Err(error.into());
    }

    match session.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["appid", "title", "price", "discount"]);
            for item in &page.items {
                table.add_row(vec![
                    item.id.to_string(),
                    item.title.clone(),
                    item.price.map(|p| format!("{:.2}", p)).unwrap_or_default(),
                    item.discount_percent.map(|d| format!("{}%", d)).unwrap_or_default(),
                ]);
            }
            println!("{}", table);

            let (first, last) = shown_range(page.offset, page.items.len());
            println!("{}-{} of {} game(s)", first, last, format_thousands(page.total));
            if page.has_next() {
                println!("next page: --offset {}", next_offset(page.offset, page.limit));
            }
        }
    }

    Ok(())
}

/// 1-based first and last position shown for a page starting at `offset`
fn shown_range(offset: u32, shown: usize) -> (u64, u64) {
    let offset = u64::from(offset);
    let last = offset + shown as u64;
    if shown == 0 {
        (offset, last)
    } else {
        (offset + 1, last)
    }
}

fn next_offset(offset: u32, limit: u32) -> u64 {
    u64::from(offset) + u64::from(limit)
}

async fn run_detail(session: &Session, appid: &str) -> CliResult {
    let mut page = DetailPage::from_route(session.catalog.clone(), appid, session.limits.recommendations);
    page.load().await;

    if let Some(error) = page.error.take() {
        return Err(error.into());
    }

    if let OutputFormat::Json = session.format {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    let Some(detail) = &page.detail else {
        println!("(no game with appid {})", appid);
        return Ok(());
    };

    println!("{} [{}]", detail.title, detail.id);
    if let Some(description) = &detail.description {
        println!("\n{}\n", description);
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let fields: [(&str, Option<String>); 11] = [
        ("Price", detail.price.map(|p| format!("{:.2}", p))),
        ("Discount", detail.discount_percent.map(|d| format!("{}%", d))),
        ("DLC", detail.dlc_count.map(|n| n.to_string())),
        ("Owners", detail.estimated_owners.clone()),
        ("Peak CCU", detail.peak_concurrent_users.map(|n| n.to_string())),
        ("Required age", detail.minimum_age.map(|n| n.to_string())),
        ("User score", detail.user_score.map(|n| n.to_string())),
        ("Genres", Some(detail.genre_list().join(", ")).filter(|s| !s.is_empty())),
        ("Developers", detail.developers.clone()),
        ("Publishers", detail.publishers.clone()),
        ("Languages", Some(split_list(detail.supported_languages.as_deref()).join(", ")).filter(|s| !s.is_empty())),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            table.add_row(vec![name.to_string(), value]);
        }
    }
    println!("{}", table);

    if !page.recommendations.is_empty() {
        let mut recos = Table::new();
        recos.set_header(vec!["appid", "similar title", "shared genres"]);
        for reco in &page.recommendations {
            recos.add_row(vec![
                reco.id.to_string(),
                reco.title.clone(),
                reco.shared_genre_count.to_string(),
            ]);
        }
        println!("{}", recos);
    }

    Ok(())
}

async fn run_stats(session: &Session, limit: Option<u32>, kind: ChartKind) -> CliResult {
    let mut page = StatsPage::new(session.catalog.clone(), limit.unwrap_or(session.limits.genres));
    let mut chart = TextChart::new();
    page.chart_kind = kind;
    page.load(&mut chart).await;

    if let Some(error) = page.error.take() {
        return Err(error.into());
    }

    match session.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
        OutputFormat::Table => {
            if page.genres.is_empty() {
                println!("(no genres)");
            } else {
                print!("{}", chart.output());
            }
        }
    }

    Ok(())
}

async fn run_query(session: &Session, sparql: &str) -> CliResult {
    let result = session.catalog.raw_query(sparql).await?;

    match session.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => print_table(&result),
    }

    Ok(())
}

fn print_table(result: &TabularResult) {
    if result.columns.is_empty() {
        println!("(no results)");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(&result.columns);

    for row in &result.rows {
        let cells: Vec<String> = result
            .columns
            .iter()
            .map(|col| row.cell(col).map(format_cell).unwrap_or_default())
            .collect();
        table.add_row(cells);
    }

    println!("{}", table);
    println!("{} row(s)", result.len());
}

fn format_cell(cell: &Cell) -> String {
    match cell.kind {
        CellKind::Uri => namespace::compact(&cell.value).unwrap_or_else(|| format!("<{}>", cell.value)),
        CellKind::Bnode => format!("_:{}", cell.value),
        _ => match &cell.language {
            Some(lang) => format!("{}@{}", cell.value, lang),
            None => cell.value.clone(),
        },
    }
}

async fn run_shell(session: &Session) -> CliResult {
    println!("Steamgraph Interactive Shell");
    println!("Type SPARQL queries, or :help for commands. :quit to exit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        eprint!("steamgraph> ");

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (command, arg) = trimmed
            .split_once(char::is_whitespace)
            .map(|(c, a)| (c, a.trim()))
            .unwrap_or((trimmed, ""));

        let result = match command {
            ":quit" | ":exit" | ":q" => break,
            ":help" | ":h" => {
                println!("Commands:");
                println!("  :search <keyword>  Search titles");
                println!("  :detail <appid>    Show one game");
                println!("  :stats [pie]       Genre statistics");
                println!("  :quit              Exit shell");
                println!("  <sparql>           Execute a SPARQL query");
                Ok(())
            }
            ":search" => run_search(session, arg.to_string(), None, 0).await,
            ":detail" => run_detail(session, arg).await,
            ":stats" => {
                let kind = if arg == "pie" { ChartKind::Pie } else { ChartKind::Bar };
                run_stats(session, None, kind).await
            }
            _ => run_query(session, trimmed).await,
        };

        if let Err(e) = result {
            eprintln!("Error: {}", e);
        }
    }

    println!("Bye!");
    Ok(())
}
