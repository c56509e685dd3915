// Deterministic extraction pipeline for vulnerability descriptions
//
// record -> Matcher -> accepted matches -> EntityResolver -> entities
//        -> relation builder + refinements + axiom generator
//        -> EnrichmentRecord
//
// Records are independent: the registry is the only shared state and is
// read-only after load, so any number of records can be processed in
// parallel without locking. Batch output always preserves input order.

mod axioms;
mod matcher;
mod relations;
mod resolver;
mod types;

pub use axioms::generate_axioms;
pub use matcher::{AcceptedMatch, Matcher};
pub use relations::build_relations;
pub use resolver::EntityResolver;
pub use types::{BatchStats, EnrichmentRecord, Entity, Relation};

use crate::patterns::PatternRegistry;
use crate::records::InputRecord;
use std::sync::Arc;
use std::time::Instant;

/// Main extraction pipeline orchestrator
pub struct ExtractionPipeline {
    patterns: Arc<PatternRegistry>,
}

impl ExtractionPipeline {
    pub fn new(patterns: Arc<PatternRegistry>) -> Self {
        Self { patterns }
    }

    /// Enrich a single description. Pure computation: the same text and the
    /// same registry always yield an identical record. A text that matches
    /// nothing yields a valid record with empty classes/relations/axioms.
    pub fn process_record(&self, id: &str, text: &str) -> EnrichmentRecord {
        let matches = Matcher::new(&self.patterns).scan(text);
        let entities = EntityResolver::new(&self.patterns).resolve(text, &matches);

        let mut classes: Vec<String> = entities.iter().map(|e| e.label.clone()).collect();
        let mut relations = build_relations(&entities);
        self.apply_refinements(text, &mut classes, &mut relations);

        let axioms = generate_axioms(&classes, &self.patterns);

        EnrichmentRecord::assemble(id, text, classes, relations, axioms)
    }

    /// Process a batch of input records, preserving input order.
    /// Records without description text are skipped with a logged notice;
    /// they never abort the batch.
    pub fn process_batch(&self, records: &[InputRecord]) -> (Vec<EnrichmentRecord>, BatchStats) {
        let start = Instant::now();

        let mut output = Vec::with_capacity(records.len());
        let mut skipped = 0;

        for record in records {
            let Some(text) = record.prompt_input.as_deref() else {
                tracing::warn!(id = %record.id, "record has no description text, skipping");
                skipped += 1;
                continue;
            };
            output.push(self.process_record(&record.id, text));
        }

        let stats = BatchStats {
            records: output.len(),
            skipped,
            with_findings: output.iter().filter(|r| !r.classes.is_empty()).count(),
            total_classes: output.iter().map(|r| r.classes.len()).sum(),
            total_relations: output.iter().map(|r| r.relations.len()).sum(),
            total_axioms: output.iter().map(|r| r.axioms.len()).sum(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        (output, stats)
    }

    /// Keyword-conditioned class additions, applied after relation building
    /// so added classes never join the category pairing.
    fn apply_refinements(
        &self,
        text: &str,
        classes: &mut Vec<String>,
        relations: &mut Vec<Relation>,
    ) {
        if self.patterns.refinements.is_empty() {
            return;
        }

        let lowered = text.to_lowercase();
        for refinement in &self.patterns.refinements {
            if classes.iter().any(|c| c == &refinement.trigger_class)
                && lowered.contains(&refinement.keyword)
                && !classes.iter().any(|c| c == &refinement.added_class)
            {
                classes.push(refinement.added_class.clone());
                relations.push(Relation {
                    subject: refinement.added_class.clone(),
                    predicate: refinement.predicate,
                    object: refinement.trigger_class.clone(),
                });
            }
        }
    }
}
