//! Namespace prefixes shared by every catalog query
//!
//! The block rendered by [`prefix_block`] is prepended verbatim to each
//! generated query, so it must stay byte-stable.

use std::sync::OnceLock;

/// Namespace (prefix → IRI mapping)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix, empty for the default `:` namespace
    pub prefix: &'static str,
    /// IRI
    pub iri: &'static str,
}

impl Namespace {
    const fn new(prefix: &'static str, iri: &'static str) -> Self {
        Self { prefix, iri }
    }

    /// Render as a SPARQL `PREFIX` declaration with the IRI column aligned
    pub fn declaration(&self) -> String {
        format!("PREFIX {:<8}<{}>", format!("{}:", self.prefix), self.iri)
    }
}

/// Catalog vocabulary (`:appid`, `:genres`, ...)
pub const STEAM: Namespace = Namespace::new("", "http://steam.com/");

/// Prefixes declared in every query, in declaration order
pub const CATALOG_NAMESPACES: [Namespace; 7] = [
    STEAM,
    Namespace::new("owl", "http://www.w3.org/2002/07/owl#"),
    Namespace::new("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    Namespace::new("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    Namespace::new("schema", "http://schema.org/"),
    Namespace::new("vcard", "http://www.w3.org/2006/vcard/ns#"),
    Namespace::new("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

/// The fixed `PREFIX` block, one declaration per line
pub fn prefix_block() -> &'static str {
    static BLOCK: OnceLock<String> = OnceLock::new();
    BLOCK.get_or_init(|| {
        CATALOG_NAMESPACES
            .iter()
            .map(Namespace::declaration)
            .collect::<Vec<_>>()
            .join("\n")
    })
}

/// Compact an IRI using the catalog prefixes, e.g. `http://schema.org/price`
/// becomes `schema:price`
pub fn compact(iri: &str) -> Option<String> {
    CATALOG_NAMESPACES.iter().find_map(|ns| {
        iri.strip_prefix(ns.iri)
            .map(|local| format!("{}:{}", ns.prefix, local))
    })
}
