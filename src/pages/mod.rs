//! Page controllers
//!
//! Each controller owns the view state of one dashboard page and replaces
//! it wholesale when a load completes. Failures are flattened to a message
//! string in `error` and the result fields are cleared.

mod detail;
mod search;
mod stats;

pub use detail::{DetailPage, INVALID_ROUTE_APPID};
pub use search::SearchPage;
pub use stats::StatsPage;
