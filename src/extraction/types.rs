// Shared types for the extraction pipeline
use crate::patterns::{Category, Predicate};
use serde::{Deserialize, Serialize};

/// Resolved entity: one canonical class occurrence in a record.
/// At most one entity per (category, label, version) survives per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub category: Category,
    /// Canonical label, including the `_v<version>` suffix when captured
    pub label: String,
    /// Version token captured from the lookahead window, if any
    pub version: Option<String>,
}

/// Typed subject-predicate-object triple derived from a record's entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub subject: String,
    pub predicate: Predicate,
    pub object: String,
}

/// Final per-record output: classes, relations, and axioms with the input
/// metadata. Constructed once, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentRecord {
    pub id: String,
    pub prompt_input: String,
    /// Canonical class labels in extraction order
    pub classes: Vec<String>,
    pub relations: Vec<Relation>,
    pub axioms: Vec<String>,
}

impl EnrichmentRecord {
    /// Pure assembly of the final record. No IO, no clock, no randomness:
    /// identical inputs produce byte-identical records on every platform.
    pub fn assemble(
        id: &str,
        text: &str,
        classes: Vec<String>,
        relations: Vec<Relation>,
        axioms: Vec<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            prompt_input: text.to_string(),
            classes,
            relations,
            axioms,
        }
    }
}

/// Statistics from one batch run
#[derive(Debug, Clone, Default)]
pub struct BatchStats {
    /// Records processed into enrichment records
    pub records: usize,
    /// Records skipped for missing description text
    pub skipped: usize,
    /// Records with at least one extracted class
    pub with_findings: usize,
    pub total_classes: usize,
    pub total_relations: usize,
    pub total_axioms: usize,
    pub processing_time_ms: u64,
}
