use std::path::{Path, PathBuf};
use std::sync::Arc;

use ontorule::cli::{Cli, Commands};
use ontorule::error::Result;
use ontorule::extraction::ExtractionPipeline;
use ontorule::patterns::{builtin_rules, builtin_taxonomy, PatternRegistry, RulesConfig, TaxonomyConfig};
use ontorule::records;

const SAMPLE_TEXT: &str = "SQL injection vulnerability in Apache Tomcat 8.5 allows remote \
                           attackers to execute arbitrary code via the admin panel";

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.verbose);

    let registry = Arc::new(build_registry(
        cli.rules.as_deref(),
        cli.taxonomy.as_deref(),
    )?);

    match cli.command {
        Commands::Extract {
            input,
            output,
            max,
            pretty,
        } => cmd_extract(registry, &input, output, max, pretty),
        Commands::Sample { text } => cmd_sample(registry, text),
        Commands::Stats => cmd_stats(&registry),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "ontorule=debug" } else { "ontorule=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Stderr keeps stdout clean for JSON output
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_registry(rules: Option<&Path>, taxonomy: Option<&Path>) -> Result<PatternRegistry> {
    let rules_config = match rules {
        Some(path) => {
            tracing::info!("loading rules from {:?}", path);
            RulesConfig::from_file(path)?
        }
        None => builtin_rules(),
    };

    let taxonomy_config = match taxonomy {
        Some(path) => {
            tracing::info!("loading taxonomy from {:?}", path);
            TaxonomyConfig::from_file(path)?
        }
        None => builtin_taxonomy(),
    };

    PatternRegistry::from_configs(rules_config, taxonomy_config)
}

fn cmd_extract(
    registry: Arc<PatternRegistry>,
    input: &Path,
    output: Option<PathBuf>,
    max: Option<usize>,
    pretty: bool,
) -> Result<()> {
    let mut input_records = records::load_records(input)?;
    if let Some(max) = max {
        input_records.truncate(max);
    }
    tracing::info!("processing {} records", input_records.len());

    let pipeline = ExtractionPipeline::new(registry);
    let (enriched, stats) = pipeline.process_batch(&input_records);

    records::write_records(output.as_deref(), &enriched, pretty)?;

    tracing::info!(
        records = stats.records,
        skipped = stats.skipped,
        with_findings = stats.with_findings,
        classes = stats.total_classes,
        relations = stats.total_relations,
        axioms = stats.total_axioms,
        elapsed_ms = stats.processing_time_ms,
        "extraction complete"
    );

    Ok(())
}

fn cmd_sample(registry: Arc<PatternRegistry>, text: Option<String>) -> Result<()> {
    let text = text.unwrap_or_else(|| SAMPLE_TEXT.to_string());

    let pipeline = ExtractionPipeline::new(registry);
    let record = pipeline.process_record("sample", &text);

    println!("Input: {}", record.prompt_input);

    println!("\nClasses ({}):", record.classes.len());
    for class in &record.classes {
        println!("  • {}", class);
    }

    println!("\nRelations ({}):", record.relations.len());
    for relation in &record.relations {
        println!(
            "  • {} → {} → {}",
            relation.subject, relation.predicate, relation.object
        );
    }

    println!("\nAxioms ({}):", record.axioms.len());
    for axiom in &record.axioms {
        println!("  • {}", axiom);
    }

    Ok(())
}

fn cmd_stats(registry: &PatternRegistry) -> Result<()> {
    let stats = registry.stats();

    println!("Loaded {} rules", stats.total_rules);

    println!("\nBy category:");
    for (category, count) in &stats.rules_by_category {
        println!("  • {}: {}", category, count);
    }

    println!("\nBy source:");
    for (source, count) in &stats.rules_by_source {
        println!("  • {}: {}", source, count);
    }

    println!("\nTaxonomy entries: {}", stats.taxonomy_entries);

    Ok(())
}
