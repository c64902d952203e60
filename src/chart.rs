//! Genre chart rendering
//!
//! The stats view hands its [`GenreStat`]s to a [`GenreChart`]; how they are
//! drawn is up to the implementation. [`TextChart`] draws into a string for
//! terminals and tests.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::catalog::GenreStat;

/// Number of slices shown before the remainder is folded into "Others"
pub const PIE_TOP_N: usize = 10;

/// Label of the folded pie slice
pub const OTHERS_LABEL: &str = "Others";

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
}

/// Collaborator that displays genre statistics
pub trait GenreChart: Send {
    fn render(&mut self, kind: ChartKind, data: &[GenreStat]);

    fn clear(&mut self);
}

/// The largest `top_n` genres plus one "Others" slice holding the rest
pub fn pie_slices(data: &[GenreStat], top_n: usize) -> Vec<GenreStat> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));

    let rest: u64 = sorted.iter().skip(top_n).map(|s| s.count).sum();
    sorted.truncate(top_n);
    if rest > 0 {
        sorted.push(GenreStat::new(OTHERS_LABEL, rest));
    }
    sorted
}

/// `1234567` → `"1,234,567"`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Plain-text chart
#[derive(Debug, Default)]
pub struct TextChart {
    output: String,
}

impl TextChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    fn draw_bars(&mut self, data: &[GenreStat]) {
        let label_width = data.iter().map(|s| s.genre.chars().count()).max().unwrap_or(0);
        let max = data.iter().map(|s| s.count).max().unwrap_or(0).max(1);

        for stat in data {
            let len = (stat.count as f64 / max as f64 * BAR_WIDTH as f64).round() as usize;
            let _ = writeln!(
                self.output,
                "{:<label_width$}  {} {}",
                stat.genre,
                "█".repeat(len),
                format_thousands(stat.count)
            );
        }
    }

    fn draw_pie(&mut self, data: &[GenreStat]) {
        let slices = pie_slices(data, PIE_TOP_N);
        let total: u64 = slices.iter().map(|s| s.count).sum();
        let label_width = slices.iter().map(|s| s.genre.chars().count()).max().unwrap_or(0);

        for slice in &slices {
            let share = if total == 0 {
                0.0
            } else {
                slice.count as f64 * 100.0 / total as f64
            };
            let _ = writeln!(
                self.output,
                "{:<label_width$}  {:>5.1}%  ({})",
                slice.genre,
                share,
                format_thousands(slice.count)
            );
        }
        let _ = writeln!(self.output, "Total: {}", format_thousands(total));
    }
}

impl GenreChart for TextChart {
    fn render(&mut self, kind: ChartKind, data: &[GenreStat]) {
        self.output.clear();
        match kind {
            ChartKind::Bar => self.draw_bars(data),
            ChartKind::Pie => self.draw_pie(data),
        }
    }

    fn clear(&mut self) {
        self.output.clear();
    }
}

/// Chart that keeps the plotted series for serialization, as consumed by the
/// browser dashboard
#[derive(Debug, Default, Serialize)]
pub struct SeriesChart {
    pub kind: Option<ChartKind>,
    pub series: Vec<GenreStat>,
}

impl GenreChart for SeriesChart {
    fn render(&mut self, kind: ChartKind, data: &[GenreStat]) {
        self.kind = Some(kind);
        self.series = match kind {
            ChartKind::Bar => data.to_vec(),
            ChartKind::Pie => pie_slices(data, PIE_TOP_N),
        };
    }

    fn clear(&mut self) {
        self.kind = None;
        self.series.clear();
    }
}
