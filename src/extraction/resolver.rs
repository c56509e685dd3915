// Entity resolution: accepted matches -> canonical entities
//
// Version-capturing rules scan a bounded window immediately after the match
// for a version token and fold it into the label ("Apache" + "2.4" ->
// "Apache_v2.4"). Entities are deduplicated by (category, label, version)
// with first-seen order preserved.
use ahash::{HashSet, HashSetExt};

use crate::extraction::matcher::AcceptedMatch;
use crate::extraction::types::Entity;
use crate::patterns::{Category, PatternRegistry};

pub struct EntityResolver<'a> {
    registry: &'a PatternRegistry,
}

impl<'a> EntityResolver<'a> {
    pub fn new(registry: &'a PatternRegistry) -> Self {
        Self { registry }
    }

    /// Convert accepted matches into the record's ordered entity set
    pub fn resolve(&self, text: &str, matches: &[AcceptedMatch]) -> Vec<Entity> {
        let mut seen: HashSet<(Category, String)> = HashSet::new();
        let mut entities = Vec::new();

        for m in matches {
            let rule = &self.registry.rules[m.rule];

            let version = if rule.captures_version {
                self.lookahead_version(text, m.end)
            } else {
                None
            };

            let label = match &version {
                Some(v) => format!("{}_v{}", rule.label, v),
                None => rule.label.clone(),
            };

            // The composed label already encodes the version, so the pair
            // (category, label) identifies (category, label, version).
            if seen.insert((rule.category, label.clone())) {
                tracing::debug!(rule = %rule.name, label = %label, "resolved entity");
                entities.push(Entity {
                    category: rule.category,
                    label,
                    version,
                });
            }
        }

        entities
    }

    /// Scan the lookahead window after `from` for a version token.
    /// The window is a byte bound clamped back to a character boundary; it
    /// does not stop at sentence punctuation.
    fn lookahead_version(&self, text: &str, from: usize) -> Option<String> {
        let mut window_end = (from + self.registry.version_window).min(text.len());
        while !text.is_char_boundary(window_end) {
            window_end -= 1;
        }

        self.registry
            .version_regex
            .find(&text[from..window_end])
            .map(|m| m.as_str().to_string())
    }
}
