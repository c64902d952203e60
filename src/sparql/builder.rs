//! SPARQL query construction for the catalog views
//!
//! Every builder is a pure function of its (already typed) parameters and
//! returns a [`SparqlQuery`] value. Keywords are escaped by doubling up
//! `"` into `\"` and nothing else; numeric parameters are inlined as
//! decimal integers.

use std::fmt;

use super::namespace::prefix_block;
use super::{SparqlError, SparqlResult};

/// Separator used by `GROUP_CONCAT` for multi-valued detail fields
pub const LIST_SEPARATOR: &str = " | ";

/// Scalar columns of the detail query, selected and grouped in this order
const DETAIL_SCALARS: [&str; 11] = [
    "label",
    "appid",
    "price",
    "discount",
    "dlc",
    "owners",
    "peak",
    "age",
    "userScore",
    "img",
    "description",
];

/// Optional single-valued detail properties: (predicate, variable)
const DETAIL_OPTIONALS: [(&str, &str); 9] = [
    ("schema:price", "price"),
    (":discount", "discount"),
    (":dlc_count", "dlc"),
    (":estimated_owners", "owners"),
    (":peak_ccu", "peak"),
    (":required_age", "age"),
    (":user_score", "userScore"),
    (":header_image", "img"),
    ("schema:description", "description"),
];

/// A multi-valued association flattened into one delimited column
struct Association {
    predicate: &'static str,
    entity: &'static str,
    alias: &'static str,
    name: &'static str,
    column: &'static str,
}

const DETAIL_ASSOCIATIONS: [Association; 4] = [
    Association { predicate: ":genres", entity: "genre", alias: "gn", name: "genreName", column: "genres" },
    Association { predicate: ":developers", entity: "dev", alias: "dn", name: "devName", column: "developers" },
    Association { predicate: ":publishers", entity: "pub", alias: "pn", name: "pubName", column: "publishers" },
    Association { predicate: ":supported_languages", entity: "lang", alias: "ln", name: "langName", column: "langs" },
];

/// Which catalog operation a query belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Count,
    Search,
    Detail,
    TopGenres,
    Recommendations,
    /// Caller-supplied query text
    Raw,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryKind::Count => "count",
            QueryKind::Search => "search",
            QueryKind::Detail => "detail",
            QueryKind::TopGenres => "top-genres",
            QueryKind::Recommendations => "recommendations",
            QueryKind::Raw => "raw",
        };
        f.write_str(name)
    }
}

/// Complete, executable query text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparqlQuery {
    kind: QueryKind,
    text: String,
}

impl SparqlQuery {
    fn new(kind: QueryKind, body: String) -> Self {
        Self {
            kind,
            text: format!("{}\n\n{}", prefix_block(), body.trim()),
        }
    }

    /// Wrap caller-supplied query text as-is
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            kind: QueryKind::Raw,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Parse the text as SPARQL 1.1, reporting syntax errors
    pub fn validate(&self) -> SparqlResult<()> {
        spargebra::Query::parse(&self.text, None)
            .map(|_| ())
            .map_err(|e| SparqlError::Syntax(e.to_string()))
    }
}

impl fmt::Display for SparqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Escape a keyword for use inside a double-quoted string literal.
///
/// Only `"` is escaped; backslashes and other characters pass through.
pub fn escape_keyword(keyword: &str) -> String {
    keyword.replace('"', "\\\"")
}

fn label_filter(keyword: &str) -> String {
    format!(
        "FILTER(CONTAINS(LCASE(STR(?label)), LCASE(\"{}\")))",
        escape_keyword(keyword)
    )
}

/// Resolve a display name for `?entity`: `schema:name`, then `rdfs:label`,
/// then the local part of the entity IRI.
fn name_resolution(entity: &str, alias: &str, out: &str, indent: &str) -> String {
    format!(
        "{indent}OPTIONAL {{ ?{entity} schema:name ?{alias}1 }}\n\
         {indent}OPTIONAL {{ ?{entity} rdfs:label ?{alias}2 }}\n\
         {indent}BIND(COALESCE(?{alias}1, ?{alias}2, STRAFTER(STR(?{entity}), STR(:))) AS ?{out})\n"
    )
}

/// Builders for the five catalog queries
pub struct QueryBuilder;

impl QueryBuilder {
    /// Count distinct games whose label contains `keyword` (case-insensitive)
    pub fn count(keyword: &str) -> SparqlQuery {
        let body = format!(
            "SELECT (COUNT(DISTINCT ?g) AS ?total)\n\
             WHERE {{\n\
             \x20 ?g a schema:VideoGame ;\n\
             \x20    rdfs:label ?label .\n\
             \x20 {}\n\
             }}",
            label_filter(keyword)
        );
        SparqlQuery::new(QueryKind::Count, body)
    }

    /// One page of games whose label contains `keyword`, ordered by label
    pub fn search(keyword: &str, limit: u32, offset: u32) -> SparqlQuery {
        let body = format!(
            "SELECT ?g ?appid ?label ?img ?price ?discount\n\
             WHERE {{\n\
             \x20 ?g :appid ?appid ;\n\
             \x20    rdfs:label ?label .\n\
             \n\
             \x20 OPTIONAL {{ ?g :header_image ?img }}\n\
             \x20 OPTIONAL {{ ?g schema:price ?price }}\n\
             \x20 OPTIONAL {{ ?g :discount ?discount }}\n\
             \n\
             \x20 {}\n\
             }}\n\
             ORDER BY LCASE(STR(?label))\n\
             LIMIT {} OFFSET {}",
            label_filter(keyword),
            limit,
            offset
        );
        SparqlQuery::new(QueryKind::Search, body)
    }

    /// Full detail row for one game with multi-valued fields joined by
    /// [`LIST_SEPARATOR`]
    pub fn detail(appid: u64) -> SparqlQuery {
        let scalars = DETAIL_SCALARS
            .iter()
            .map(|v| format!("?{v}"))
            .collect::<Vec<_>>()
            .join(" ");

        let mut body = format!("SELECT {scalars}\n");
        for assoc in &DETAIL_ASSOCIATIONS {
            body.push_str(&format!(
                "       (GROUP_CONCAT(DISTINCT ?{}; separator=\"{}\") AS ?{})\n",
                assoc.name, LIST_SEPARATOR, assoc.column
            ));
        }
        body.push_str(
            "WHERE {\n\
             \x20 ?g a schema:VideoGame ;\n\
             \x20    :appid ?appid ;\n\
             \x20    rdfs:label ?label .\n\
             \n",
        );
        body.push_str(&format!("  FILTER(STR(?appid) = \"{appid}\")\n\n"));
        for (predicate, var) in &DETAIL_OPTIONALS {
            body.push_str(&format!("  OPTIONAL {{ ?g {predicate} ?{var} }}\n"));
        }
        for assoc in &DETAIL_ASSOCIATIONS {
            body.push_str(&format!(
                "\n  OPTIONAL {{\n    ?g {} ?{} .\n",
                assoc.predicate, assoc.entity
            ));
            body.push_str(&name_resolution(assoc.entity, assoc.alias, assoc.name, "    "));
            body.push_str("  }\n");
        }
        body.push_str(&format!("}}\nGROUP BY {scalars}"));

        SparqlQuery::new(QueryKind::Detail, body)
    }

    /// Genres by number of distinct games, grouped case-insensitively
    pub fn top_genres(limit: u32) -> SparqlQuery {
        let body = format!(
            "SELECT (SAMPLE(?rawName) AS ?genreName) (COUNT(DISTINCT ?g) AS ?n)\n\
             WHERE {{\n\
             \x20 ?g a schema:VideoGame ;\n\
             \x20    :genres ?genre .\n\
             \n\
             {}\
             \x20 BIND(LCASE(STR(?rawName)) AS ?key)\n\
             }}\n\
             GROUP BY ?key\n\
             ORDER BY DESC(?n)\n\
             LIMIT {}",
            name_resolution("genre", "gn", "rawName", "  "),
            limit
        );
        SparqlQuery::new(QueryKind::TopGenres, body)
    }

    /// Other games sharing at least one genre with `appid`
    pub fn recommendations(appid: u64, limit: u32) -> SparqlQuery {
        let body = format!(
            "SELECT ?appid ?label (COUNT(DISTINCT ?genre) AS ?sharedGenres)\n\
             WHERE {{\n\
             \x20 ?g a schema:VideoGame ; :appid {appid} ; :genres ?genre .\n\
             \x20 ?other a schema:VideoGame ; :genres ?genre ; :appid ?appid ; rdfs:label ?label .\n\
             \x20 FILTER(?other != ?g)\n\
             }}\n\
             GROUP BY ?appid ?label\n\
             ORDER BY DESC(?sharedGenres) LCASE(STR(?label))\n\
             LIMIT {limit}"
        );
        SparqlQuery::new(QueryKind::Recommendations, body)
    }
}
