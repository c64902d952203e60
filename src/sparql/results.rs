//! SPARQL query results in tabular form
//!
//! Mirrors the `application/sparql-results+json` document:
//! `{ head: { vars }, results: { bindings: [ { var: cell } ] } }`.
//! A variable missing from a binding means it is unbound in that row.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::coerce::{parse_float_prefix, parse_int_prefix};

/// RDF term kind of a bound cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellKind {
    Uri,
    Literal,
    /// SPARQL 1.0 servers still emit this for datatyped literals
    TypedLiteral,
    Bnode,
    #[serde(other)]
    Other,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellKind::Uri => "uri",
            CellKind::Literal => "literal",
            CellKind::TypedLiteral => "typed-literal",
            CellKind::Bnode => "bnode",
            CellKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// One bound value within a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(rename = "type")]
    pub kind: CellKind,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Cell {
    /// Plain literal cell
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            kind: CellKind::Literal,
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    /// Datatyped literal cell, e.g. `xsd:integer`
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            kind: CellKind::Literal,
            value: value.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }
}

/// Variable → cell bindings of one solution, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(IndexMap<String, Cell>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a column, builder style
    pub fn with(mut self, column: impl Into<String>, cell: Cell) -> Self {
        self.0.insert(column.into(), cell);
        self
    }

    pub fn cell(&self, column: &str) -> Option<&Cell> {
        self.0.get(column)
    }

    pub fn is_bound(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Lexical value of `column`, `None` when unbound
    pub fn get_str(&self, column: &str) -> Option<&str> {
        self.cell(column).map(|c| c.value.as_str())
    }

    /// Leading base-10 integer of `column`, `None` when unbound or not numeric
    pub fn get_int(&self, column: &str) -> Option<i64> {
        self.get_str(column).and_then(parse_int_prefix)
    }

    /// Leading decimal number of `column`, `None` when unbound, not numeric
    /// or not finite
    pub fn get_float(&self, column: &str) -> Option<f64> {
        self.get_str(column).and_then(parse_float_prefix)
    }
}

#[derive(Serialize, Deserialize)]
struct Head {
    #[serde(default)]
    vars: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct Bindings {
    bindings: Vec<Row>,
}

#[derive(Serialize, Deserialize)]
struct ResultsDocument {
    head: Head,
    results: Bindings,
}

/// Column names plus solution rows of a SELECT query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ResultsDocument", into = "ResultsDocument")]
pub struct TabularResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl From<ResultsDocument> for TabularResult {
    fn from(doc: ResultsDocument) -> Self {
        Self {
            columns: doc.head.vars,
            rows: doc.results.bindings,
        }
    }
}

impl From<TabularResult> for ResultsDocument {
    fn from(result: TabularResult) -> Self {
        Self {
            head: Head { vars: result.columns },
            results: Bindings { bindings: result.rows },
        }
    }
}

impl TabularResult {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Parse a `application/sparql-results+json` document
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
