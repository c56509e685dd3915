//! Pattern registry for configuration-driven ontology extraction
//!
//! This module provides:
//! - Pre-compiled, tiered extraction rules loaded from configuration or the
//!   builtin rule set (vulnerability types, products, components, privileges)
//! - The static taxonomy table mapping canonical class labels to their
//!   parent classes (subsumption axioms)
//! - Co-occurrence refinements (keyword-conditioned class additions)
//!
//! The registry is built once at startup and never mutated afterwards, so it
//! can be shared read-only across any number of record-processing calls.
//! Every malformed regex or taxonomy entry is rejected here, never at match
//! time.

mod builtin;

pub use builtin::{builtin_rules, builtin_taxonomy};

use crate::error::{OntoruleError, Result};
use ahash::{HashMap, HashMapExt};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Rule category, in tier order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    VulnerabilityType,
    Product,
    Component,
    Privilege,
}

impl Category {
    /// All categories in descending tier order
    pub const ALL: [Category; 4] = [
        Category::VulnerabilityType,
        Category::Product,
        Category::Component,
        Category::Privilege,
    ];

    /// Default priority tier for rules of this category.
    /// Higher tiers win when overlapping matches conflict.
    pub fn default_tier(&self) -> u32 {
        match self {
            Category::VulnerabilityType => 100,
            Category::Product => 90,
            Category::Component => 80,
            Category::Privilege => 70,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::VulnerabilityType => "VulnerabilityType",
            Category::Product => "Product",
            Category::Component => "Component",
            Category::Privilege => "Privilege",
        };
        write!(f, "{}", name)
    }
}

/// Relation predicate emitted by the relation builder and refinements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Predicate {
    Affects,
    Requires,
    LeadsTo,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Predicate::Affects => "affects",
            Predicate::Requires => "requires",
            Predicate::LeadsTo => "leadsTo",
        };
        write!(f, "{}", name)
    }
}

/// Extraction rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub name: String,
    pub category: Category,
    pub pattern: String,
    pub label: String,
    /// Priority tier; defaults to the category tier when absent
    #[serde(default)]
    pub tier: Option<u32>,
    /// Scan a lookahead window after the match for a version token
    #[serde(default)]
    pub captures_version: bool,
    /// Vocabulary the rule was derived from (CWE, CPE, ATTACK, CVSS, ...)
    #[serde(default)]
    pub source: String,
}

/// Co-occurrence refinement: when `trigger_class` was extracted and the raw
/// text contains `keyword`, add `added_class` and a relation
/// `(added_class, predicate, trigger_class)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementConfig {
    pub trigger_class: String,
    pub keyword: String,
    pub added_class: String,
    pub predicate: Predicate,
}

/// Matching options shared by all rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleOptions {
    /// How many bytes past a product match to scan for a version token
    #[serde(default = "default_version_window")]
    pub version_window: usize,
}

fn default_version_window() -> usize {
    30
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            version_window: default_version_window(),
        }
    }
}

/// Rules configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub options: RuleOptions,
    pub rule: Vec<RuleConfig>,
    #[serde(default)]
    pub refinement: Vec<RefinementConfig>,
}

impl RulesConfig {
    /// Load rules configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| OntoruleError::Io {
            source: e,
            context: format!("Failed to read rules config: {:?}", path),
        })?;
        Ok(toml::from_str(&raw)?)
    }
}

/// One subsumption entry of the taxonomy table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub label: String,
    pub parent: String,
}

/// Taxonomy configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    pub class: Vec<TaxonomyEntry>,
}

impl TaxonomyConfig {
    /// Load taxonomy configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| OntoruleError::Io {
            source: e,
            context: format!("Failed to read taxonomy config: {:?}", path),
        })?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Compiled extraction rule with pre-compiled regex
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub category: Category,
    pub tier: u32,
    pub regex: Regex,
    pub label: String,
    pub captures_version: bool,
    pub source: String,
}

/// Validated taxonomy axiom `label ⊑ parent`
#[derive(Debug, Clone)]
pub struct TaxonomyAxiom {
    pub label: String,
    pub parent: String,
}

impl TaxonomyAxiom {
    /// Render the axiom as a subsumption statement
    pub fn statement(&self) -> String {
        format!("{} ⊑ {}", self.label, self.parent)
    }
}

/// Compiled co-occurrence refinement
#[derive(Debug, Clone)]
pub struct CompiledRefinement {
    pub trigger_class: String,
    /// Lowercased keyword, matched against the lowercased raw text
    pub keyword: String,
    pub added_class: String,
    pub predicate: Predicate,
}

/// Pattern registry with all pre-compiled rules and the taxonomy table
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    /// Extraction rules in declaration order (the final conflict tie-break)
    pub rules: Vec<CompiledRule>,
    /// Taxonomy axioms in declaration order
    pub taxonomy: Vec<TaxonomyAxiom>,
    /// Axiom lookup by canonical label
    pub taxonomy_by_label: HashMap<String, usize>,
    /// Co-occurrence refinements in declaration order
    pub refinements: Vec<CompiledRefinement>,
    /// Version token pattern for product lookahead
    pub version_regex: Regex,
    /// Lookahead window in bytes past a version-capturing match
    pub version_window: usize,
}

impl PatternRegistry {
    /// Build the registry from the builtin rule set and taxonomy
    pub fn builtin() -> Result<Self> {
        Self::from_configs(builtin_rules(), builtin_taxonomy())
    }

    /// Load the registry from TOML configuration files
    pub fn from_config_files(rules_path: &Path, taxonomy_path: &Path) -> Result<Self> {
        let rules = RulesConfig::from_file(rules_path)?;
        let taxonomy = TaxonomyConfig::from_file(taxonomy_path)?;
        Self::from_configs(rules, taxonomy)
    }

    /// Build the registry from parsed configurations
    pub fn from_configs(rules_config: RulesConfig, taxonomy_config: TaxonomyConfig) -> Result<Self> {
        let mut rules = Vec::with_capacity(rules_config.rule.len());

        for rule_cfg in &rules_config.rule {
            // Case-insensitive at compile time so match offsets always
            // refer to the original text.
            let regex = RegexBuilder::new(&rule_cfg.pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| OntoruleError::RulePattern {
                    rule: rule_cfg.name.clone(),
                    source: e,
                })?;

            rules.push(CompiledRule {
                name: rule_cfg.name.clone(),
                category: rule_cfg.category,
                tier: rule_cfg.tier.unwrap_or_else(|| rule_cfg.category.default_tier()),
                regex,
                label: rule_cfg.label.clone(),
                captures_version: rule_cfg.captures_version,
                source: rule_cfg.source.clone(),
            });
        }

        let mut taxonomy = Vec::with_capacity(taxonomy_config.class.len());
        let mut taxonomy_by_label = HashMap::new();

        for (idx, entry) in taxonomy_config.class.iter().enumerate() {
            if taxonomy_by_label
                .insert(entry.label.clone(), idx)
                .is_some()
            {
                return Err(OntoruleError::Taxonomy {
                    label: entry.label.clone(),
                    message: "duplicate taxonomy entry".to_string(),
                });
            }
            taxonomy.push(TaxonomyAxiom {
                label: entry.label.clone(),
                parent: entry.parent.clone(),
            });
        }

        Self::validate_taxonomy(&taxonomy, &taxonomy_by_label)?;

        let refinements = rules_config
            .refinement
            .iter()
            .map(|r| CompiledRefinement {
                trigger_class: r.trigger_class.clone(),
                keyword: r.keyword.to_lowercase(),
                added_class: r.added_class.clone(),
                predicate: r.predicate,
            })
            .collect();

        // Digit groups separated by dots, optionally a short alphanumeric
        // suffix ("2.4.41", "8.5p1"). A bare integer is not a version.
        let version_regex = Regex::new(r"\d+(?:\.\d+){1,3}(?:[A-Za-z][A-Za-z0-9]{0,2})?")
            .map_err(|e| OntoruleError::Config(format!("version token pattern: {}", e)))?;

        tracing::debug!(
            rules = rules.len(),
            taxonomy = taxonomy.len(),
            refinements = rules_config.refinement.len(),
            "compiled pattern registry"
        );

        Ok(Self {
            rules,
            taxonomy,
            taxonomy_by_label,
            refinements,
            version_regex,
            version_window: rules_config.options.version_window,
        })
    }

    /// Reject self-referential or cyclic subsumption chains.
    /// Parents without their own taxonomy entry terminate a chain.
    fn validate_taxonomy(
        taxonomy: &[TaxonomyAxiom],
        by_label: &HashMap<String, usize>,
    ) -> Result<()> {
        for axiom in taxonomy {
            if axiom.label == axiom.parent {
                return Err(OntoruleError::Taxonomy {
                    label: axiom.label.clone(),
                    message: "self-referential axiom".to_string(),
                });
            }

            let mut seen = vec![axiom.label.as_str()];
            let mut current = axiom.parent.as_str();
            while let Some(&idx) = by_label.get(current) {
                if seen.contains(&current) {
                    return Err(OntoruleError::Taxonomy {
                        label: axiom.label.clone(),
                        message: format!("cyclic axiom chain through '{}'", current),
                    });
                }
                seen.push(current);
                current = taxonomy[idx].parent.as_str();
            }
        }
        Ok(())
    }

    /// Look up the taxonomy axiom for a canonical label
    pub fn axiom_for(&self, label: &str) -> Option<&TaxonomyAxiom> {
        self.taxonomy_by_label
            .get(label)
            .map(|&idx| &self.taxonomy[idx])
    }

    /// Registry statistics (deterministic ordering)
    pub fn stats(&self) -> RegistryStats {
        let rules_by_category = Category::ALL
            .iter()
            .map(|category| {
                let count = self.rules.iter().filter(|r| r.category == *category).count();
                (category.to_string(), count)
            })
            .collect();

        let mut rules_by_source: Vec<(String, usize)> = Vec::new();
        for rule in &self.rules {
            match rules_by_source.iter_mut().find(|(s, _)| s == &rule.source) {
                Some((_, count)) => *count += 1,
                None => rules_by_source.push((rule.source.clone(), 1)),
            }
        }

        RegistryStats {
            total_rules: self.rules.len(),
            rules_by_category,
            rules_by_source,
            taxonomy_entries: self.taxonomy.len(),
        }
    }
}

/// Rule counts reported by the registry
#[derive(Debug, Clone)]
pub struct RegistryStats {
    pub total_rules: usize,
    /// Counts per category, in tier order
    pub rules_by_category: Vec<(String, usize)>,
    /// Counts per source vocabulary, in first-seen order
    pub rules_by_source: Vec<(String, usize)>,
    pub taxonomy_entries: usize,
}
