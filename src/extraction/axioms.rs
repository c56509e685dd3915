// Axiom generation from the static taxonomy table
//
// Purely membership-driven: the surrounding text never influences which
// axiom a class contributes. Classes without a taxonomy entry contribute
// nothing; partial coverage is expected.
use crate::patterns::PatternRegistry;

/// Append one subsumption statement per known class, in the order each
/// class first appeared.
pub fn generate_axioms(classes: &[String], registry: &PatternRegistry) -> Vec<String> {
    classes
        .iter()
        .filter_map(|label| registry.axiom_for(label))
        .map(|axiom| axiom.statement())
        .collect()
}
