//! End-to-end extraction tests against the builtin rule set

use std::sync::Arc;

use ontorule::extraction::{EnrichmentRecord, ExtractionPipeline};
use ontorule::patterns::{PatternRegistry, Predicate};
use ontorule::records::{self, InputRecord};

fn pipeline() -> ExtractionPipeline {
    let registry = PatternRegistry::builtin().expect("builtin registry must load");
    ExtractionPipeline::new(Arc::new(registry))
}

fn record(id: &str, text: &str) -> InputRecord {
    InputRecord {
        id: id.to_string(),
        prompt_input: Some(text.to_string()),
    }
}

#[test]
fn test_enrichment_of_realistic_description() {
    let pipeline = pipeline();
    let enriched = pipeline.process_record(
        "CVE-2020-2021",
        "An authentication bypass in PAN-OS 9.1 allows an unauthenticated network \
         attacker to access the web interface as an administrator",
    );

    assert!(enriched.classes.iter().any(|c| c == "AuthenticationBypass"));
    assert!(enriched.classes.iter().any(|c| c.starts_with("PaloAlto_PAN-OS_v9.1")));
    assert!(enriched.classes.iter().any(|c| c == "WebInterface"));

    assert!(enriched.relations.iter().any(|r| {
        r.subject == "AuthenticationBypass"
            && r.predicate == Predicate::Affects
            && r.object == "WebInterface"
    }));
    assert!(enriched
        .relations
        .iter()
        .any(|r| r.predicate == Predicate::Requires && r.object == "Administrator"));
}

#[test]
fn test_tier_dominance_across_categories() {
    let pipeline = pipeline();
    // "Windows privilege escalation" (vulnerability, tier 100) overlaps the
    // "Windows" product match (tier 90); only the vulnerability survives.
    let enriched = pipeline.process_record(
        "CVE-2024-0001",
        "A Windows privilege escalation was reported",
    );

    assert!(enriched
        .classes
        .iter()
        .any(|c| c == "WindowsPrivilegeEscalation"));
    assert!(!enriched.classes.iter().any(|c| c == "Windows"));
}

#[test]
fn test_batch_order_preservation() {
    let pipeline = pipeline();
    let input = vec![
        record("CVE-1", "SQL injection in MySQL"),
        record("CVE-2", "no known issues"),
        record("CVE-3", "buffer overflow in the firewall"),
    ];

    let (output, stats) = pipeline.process_batch(&input);

    let ids: Vec<&str> = output.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["CVE-1", "CVE-2", "CVE-3"]);
    assert_eq!(stats.records, 3);
    assert_eq!(stats.with_findings, 2);
}

#[test]
fn test_determinism_across_pipeline_instances() {
    let text = "Cross-site scripting in WordPress 6.2 allows JavaScript execution \
                in the browser of an authenticated user";

    let first = pipeline().process_record("CVE-A", text);
    let second = pipeline().process_record("CVE-A", text);

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_batch_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.json");
    let output_path = dir.path().join("out/enriched.json");

    std::fs::write(
        &input_path,
        r#"[
            {"id": "CVE-2023-1111", "prompt_input": "SQL injection in Apache Struts 2.3 allows authentication bypass"},
            {"id": "CVE-2023-2222", "description": "heap overflow in the DNS server"},
            {"id": "CVE-2023-3333"}
        ]"#,
    )
    .unwrap();

    let input = records::load_records(&input_path).unwrap();
    let (output, stats) = pipeline().process_batch(&input);
    records::write_records(Some(&output_path), &output, false).unwrap();

    assert_eq!(stats.records, 2);
    assert_eq!(stats.skipped, 1);

    let raw = std::fs::read_to_string(&output_path).unwrap();
    let reloaded: Vec<EnrichmentRecord> = serde_json::from_str(&raw).unwrap();
    assert_eq!(reloaded, output);

    let first = &reloaded[0];
    assert!(first.classes.iter().any(|c| c == "SQLInjection"));
    assert!(first.classes.iter().any(|c| c == "Apache_v2.3"));
    assert!(first
        .axioms
        .iter()
        .any(|a| a == "SQLInjection ⊑ DatabaseAttack"));

    let second = &reloaded[1];
    assert!(second.classes.iter().any(|c| c == "HeapOverflow"));
    assert!(second
        .axioms
        .iter()
        .any(|a| a == "HeapOverflow ⊑ MemoryCorruption"));
}

#[test]
fn test_no_relation_connects_same_category() {
    let pipeline = pipeline();
    let enriched = pipeline.process_record(
        "CVE-2024-0002",
        "SQL injection and buffer overflow in the admin panel of the payment \
         gateway require root access",
    );

    // Subjects are always vulnerability classes; objects never are.
    let vuln_subjects: Vec<&str> = enriched
        .relations
        .iter()
        .filter(|r| r.predicate != Predicate::LeadsTo)
        .map(|r| r.subject.as_str())
        .collect();
    for subject in vuln_subjects {
        assert!(!enriched
            .relations
            .iter()
            .any(|r| r.predicate != Predicate::LeadsTo && r.object == subject));
    }
}

#[test]
fn test_empty_and_whitespace_inputs() {
    let pipeline = pipeline();

    for text in ["", "   ", "no known issues"] {
        let enriched = pipeline.process_record("CVE-EMPTY", text);
        assert!(enriched.classes.is_empty(), "text {:?}", text);
        assert!(enriched.relations.is_empty());
        assert!(enriched.axioms.is_empty());
    }
}
