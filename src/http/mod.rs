//! Browser dashboard: JSON API plus the embedded single-page UI

mod handler;
mod server;

pub use handler::AppState;
pub use server::{router, HttpServer};
