// Span matching and conflict resolution
//
// Every rule is evaluated against the whole description; overlapping
// candidates are resolved by tier, then span length, then start offset,
// then rule declaration order. The chain is total, so the accepted set is
// deterministic for any rule set and input.
use crate::patterns::PatternRegistry;

/// Accepted match after conflict resolution, sorted by start offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedMatch {
    /// Index into the registry's rule list
    pub rule: usize,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    rule: usize,
    start: usize,
    end: usize,
}

impl Candidate {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn overlaps(&self, other: &Candidate) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Scans one description against all registry rules
pub struct Matcher<'a> {
    registry: &'a PatternRegistry,
}

impl<'a> Matcher<'a> {
    pub fn new(registry: &'a PatternRegistry) -> Self {
        Self { registry }
    }

    /// Collect all raw matches and resolve span conflicts.
    ///
    /// A single rule may match several disjoint spans; each span is its own
    /// candidate. Losing candidates are discarded entirely, never truncated.
    pub fn scan(&self, text: &str) -> Vec<AcceptedMatch> {
        let mut candidates = Vec::new();
        for (idx, rule) in self.registry.rules.iter().enumerate() {
            for m in rule.regex.find_iter(text) {
                if m.start() == m.end() {
                    continue;
                }
                candidates.push(Candidate {
                    rule: idx,
                    start: m.start(),
                    end: m.end(),
                });
            }
        }

        // Rank: tier desc, span length desc, start asc, declaration order asc
        candidates.sort_by(|a, b| {
            let tier_a = self.registry.rules[a.rule].tier;
            let tier_b = self.registry.rules[b.rule].tier;
            tier_b
                .cmp(&tier_a)
                .then_with(|| b.len().cmp(&a.len()))
                .then_with(|| a.start.cmp(&b.start))
                .then_with(|| a.rule.cmp(&b.rule))
        });

        let mut accepted: Vec<Candidate> = Vec::new();
        for candidate in candidates {
            if accepted.iter().all(|a| !a.overlaps(&candidate)) {
                accepted.push(candidate);
            }
        }

        accepted.sort_by_key(|c| (c.start, c.end));
        accepted
            .into_iter()
            .map(|c| AcceptedMatch {
                rule: c.rule,
                start: c.start,
                end: c.end,
                text: text[c.start..c.end].to_string(),
            })
            .collect()
    }
}
