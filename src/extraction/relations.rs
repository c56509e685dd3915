// Relation building: fixed category-pairing rules over a record's entities
//
// VulnerabilityType x (Product | Component) -> affects
// VulnerabilityType x Privilege            -> requires
//
// Vulnerabilities iterate in extraction order, objects in extraction order
// within each pairing, so relation order is stable across runs. No relation
// ever connects two entities of the same category.
use crate::extraction::types::{Entity, Relation};
use crate::patterns::{Category, Predicate};

pub fn build_relations(entities: &[Entity]) -> Vec<Relation> {
    let mut relations = Vec::new();

    for vuln in entities
        .iter()
        .filter(|e| e.category == Category::VulnerabilityType)
    {
        for target in entities
            .iter()
            .filter(|e| matches!(e.category, Category::Product | Category::Component))
        {
            relations.push(Relation {
                subject: vuln.label.clone(),
                predicate: Predicate::Affects,
                object: target.label.clone(),
            });
        }

        for privilege in entities.iter().filter(|e| e.category == Category::Privilege) {
            relations.push(Relation {
                subject: vuln.label.clone(),
                predicate: Predicate::Requires,
                object: privilege.label.clone(),
            });
        }
    }

    relations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(category: Category, label: &str) -> Entity {
        Entity {
            category,
            label: label.to_string(),
            version: None,
        }
    }

    #[test]
    fn test_affects_and_requires_pairing() {
        let entities = vec![
            entity(Category::VulnerabilityType, "SQLInjection"),
            entity(Category::Product, "Apache_v2.3"),
            entity(Category::Component, "AdminPanel"),
            entity(Category::Privilege, "Administrator"),
        ];

        let relations = build_relations(&entities);
        assert_eq!(relations.len(), 3);
        assert_eq!(
            relations[0],
            Relation {
                subject: "SQLInjection".to_string(),
                predicate: Predicate::Affects,
                object: "Apache_v2.3".to_string(),
            }
        );
        assert_eq!(relations[1].object, "AdminPanel");
        assert_eq!(relations[2].predicate, Predicate::Requires);
        assert_eq!(relations[2].object, "Administrator");
    }

    #[test]
    fn test_no_vulnerability_means_no_relations() {
        let entities = vec![
            entity(Category::Product, "Apache"),
            entity(Category::Privilege, "RootAccess"),
        ];

        assert!(build_relations(&entities).is_empty());
    }

    #[test]
    fn test_no_same_category_relations() {
        let entities = vec![
            entity(Category::VulnerabilityType, "SQLInjection"),
            entity(Category::VulnerabilityType, "BufferOverflow"),
            entity(Category::Component, "Database"),
        ];

        let relations = build_relations(&entities);
        assert_eq!(relations.len(), 2);
        for relation in &relations {
            assert_ne!(relation.subject, relation.object);
            assert_eq!(relation.predicate, Predicate::Affects);
            assert_eq!(relation.object, "Database");
        }
    }

    #[test]
    fn test_multiple_vulnerabilities_pair_in_order() {
        let entities = vec![
            entity(Category::VulnerabilityType, "First"),
            entity(Category::VulnerabilityType, "Second"),
            entity(Category::Product, "Target"),
        ];

        let relations = build_relations(&entities);
        let subjects: Vec<&str> = relations.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(subjects, vec!["First", "Second"]);
    }
}
