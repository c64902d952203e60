//! Typed catalog records
//!
//! Each record is built from one result row. Conversions never fail on bad
//! cells: an unparsable field is `None`, and a row whose identifier is
//! unusable produces no record at all.

use serde::{Deserialize, Serialize};

use crate::sparql::Row;

/// Steam application id
pub type AppId = u64;

/// Identifier column of a row, rejecting unbound, non-numeric and negative values
fn app_id(row: &Row, column: &str) -> Option<AppId> {
    row.get_int(column).and_then(|id| AppId::try_from(id).ok())
}

fn owned(row: &Row, column: &str) -> Option<String> {
    row.get_str(column).map(str::to_string)
}

/// A search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameListItem {
    pub id: AppId,
    pub title: String,
    pub discount_percent: Option<i64>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

impl GameListItem {
    pub fn from_row(row: &Row) -> Option<Self> {
        Some(Self {
            id: app_id(row, "appid")?,
            title: owned(row, "label").unwrap_or_default(),
            discount_percent: row.get_int("discount"),
            price: row.get_float("price"),
            image_url: owned(row, "img"),
        })
    }
}

/// Everything known about one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetail {
    pub id: AppId,
    pub title: String,
    pub price: Option<f64>,
    pub discount_percent: Option<i64>,
    pub dlc_count: Option<i64>,
    /// Owner-estimate bucket such as `"20000000 - 50000000"`
    pub estimated_owners: Option<String>,
    pub peak_concurrent_users: Option<i64>,
    pub minimum_age: Option<i64>,
    pub user_score: Option<i64>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    /// `" | "`-joined genre names
    pub genres: Option<String>,
    pub developers: Option<String>,
    pub publishers: Option<String>,
    pub supported_languages: Option<String>,
}

impl GameDetail {
    /// Build from the detail row; `requested` stands in for an unusable id
    pub fn from_row(row: &Row, requested: AppId) -> Self {
        Self {
            id: app_id(row, "appid").unwrap_or(requested),
            title: owned(row, "label").unwrap_or_default(),
            price: row.get_float("price"),
            discount_percent: row.get_int("discount"),
            dlc_count: row.get_int("dlc"),
            estimated_owners: owned(row, "owners"),
            peak_concurrent_users: row.get_int("peak"),
            minimum_age: row.get_int("age"),
            user_score: row.get_int("userScore"),
            image_url: owned(row, "img"),
            description: owned(row, "description"),
            genres: owned(row, "genres"),
            developers: owned(row, "developers"),
            publishers: owned(row, "publishers"),
            supported_languages: owned(row, "langs"),
        }
    }

    /// Genre names split back out of the joined column
    pub fn genre_list(&self) -> Vec<&str> {
        split_list(self.genres.as_deref())
    }
}

/// Split a `GROUP_CONCAT` column, skipping empty entries
pub fn split_list(joined: Option<&str>) -> Vec<&str> {
    joined
        .map(|s| {
            s.split(crate::sparql::LIST_SEPARATOR)
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Number of games in one genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreStat {
    pub genre: String,
    pub count: u64,
}

impl GenreStat {
    pub fn new(genre: impl Into<String>, count: u64) -> Self {
        Self {
            genre: genre.into(),
            count,
        }
    }

    /// Rows without a genre name are skipped; a missing count reads as zero
    pub fn from_row(row: &Row) -> Option<Self> {
        let genre = row.get_str("genreName").filter(|g| !g.is_empty())?;
        let count = row
            .get_int("n")
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0);
        Some(Self::new(genre, count))
    }
}

/// A game sharing genres with the one being viewed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub id: AppId,
    pub title: String,
    pub shared_genre_count: u64,
}

impl RecommendationItem {
    pub fn from_row(row: &Row) -> Option<Self> {
        Some(Self {
            id: app_id(row, "appid")?,
            title: owned(row, "label").unwrap_or_default(),
            shared_genre_count: row
                .get_int("sharedGenres")
                .and_then(|n| u64::try_from(n).ok())
                .unwrap_or(0),
        })
    }
}
