use catwork::config::{WorkbenchConfig, load_config_from_file};
use catwork::export::{SegmentEvaluation, build_report, export_report_json};
use catwork::segmentation::read_document;
use catwork::glossary::{GlossaryTerm, glossary_source_for, load_glossary};
use catwork::translator::{MockMode, MockTranslator};
use catwork::{
    CatResult, Granularity, QualityChecker, align_texts, calculate_readability,
    create_segment_pairs, ensure_segment_integrity, pretranslate_segments, split_into_segments,
    validate_glossary_consistency,
};
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

fn cli() -> Command {
    Command::new("catwork")
        .version("0.1.0")
        .about("Segmentation, alignment and quality analysis for translators")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Log each analysis step")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("segment")
                .about("Split a text file into segments")
                .arg(Arg::new("file").required(true).index(1))
                .arg(
                    Arg::new("granularity")
                        .long("granularity")
                        .short('g')
                        .help("sentence or paragraph (default: from config)"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Run quality checks on a source/target pair")
                .arg(Arg::new("source").required(true).index(1))
                .arg(Arg::new("target").required(true).index(2)),
        )
        .subcommand(
            Command::new("align")
                .about("Align numbers, URLs, emails, dates and names")
                .arg(Arg::new("source").required(true).index(1))
                .arg(Arg::new("target").required(true).index(2)),
        )
        .subcommand(
            Command::new("readability")
                .about("Compute readability scores of a text file")
                .arg(Arg::new("file").required(true).index(1))
                .arg(
                    Arg::new("lang")
                        .long("lang")
                        .short('l')
                        .help("Language code (default: source language from config)"),
                ),
        )
        .subcommand(
            Command::new("glossary")
                .about("Check glossary consistency of a source/target pair")
                .arg(
                    Arg::new("csv")
                        .required(true)
                        .index(1)
                        .help("Glossary CSV file or http(s) URL"),
                )
                .arg(Arg::new("source").required(true).index(2))
                .arg(Arg::new("target").required(true).index(3)),
        )
        .subcommand(
            Command::new("report")
                .about("Analyze a whole document and print a JSON report")
                .arg(Arg::new("source-file").required(true).index(1))
                .arg(
                    Arg::new("target-file")
                        .long("target-file")
                        .short('t')
                        .help("Existing translation, segmented like the source"),
                )
                .arg(
                    Arg::new("glossary")
                        .long("glossary")
                        .help("Glossary CSV file or URL (default: from config)"),
                )
                .arg(
                    Arg::new("mock")
                        .long("mock")
                        .short('m')
                        .help("Pre-translate untranslated segments with the mock translator")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target language (default: from config)"),
                )
                .arg(
                    Arg::new("evaluate")
                        .long("evaluate")
                        .short('e')
                        .value_name("INDEX:CATEGORY[:NOTE]")
                        .help("Reviewer evaluation of a segment, e.g. 2:terminology:use 'nuvem'")
                        .action(ArgAction::Append),
                ),
        )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    let config = match matches.get_one::<String>("config") {
        Some(path) => load_config_from_file(Path::new(path))?,
        None => WorkbenchConfig::default(),
    };

    let level = if config.debug || matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    match matches.subcommand() {
        Some(("segment", sub)) => run_segment(sub, &config),
        Some(("check", sub)) => {
            let (source, target) = pair_args(sub);
            let checker = QualityChecker::new(config.quality.clone());
            print_json(&checker.check(source, target))
        }
        Some(("align", sub)) => {
            let (source, target) = pair_args(sub);
            print_json(&align_texts(source, target))
        }
        Some(("readability", sub)) => {
            let text = read_file(required(sub, "file"))?;
            let lang = sub
                .get_one::<String>("lang")
                .map(String::as_str)
                .unwrap_or(&config.languages.source);
            print_json(&calculate_readability(&text, lang))
        }
        Some(("glossary", sub)) => {
            let terms = fetch_glossary(Some(required(sub, "csv"))).await;
            let (source, target) = pair_args(sub);
            print_json(&validate_glossary_consistency(source, target, &terms))
        }
        Some(("report", sub)) => run_report(sub, config).await,
        _ => Ok(()),
    }
}

fn run_segment(sub: &ArgMatches, config: &WorkbenchConfig) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_file(required(sub, "file"))?;
    let granularity = match sub.get_one::<String>("granularity") {
        Some(value) => value.parse::<Granularity>()?,
        None => config.segmentation.granularity,
    };
    let segments = split_into_segments(&text, granularity);
    debug!(count = segments.len(), ?granularity, "Segmented text");
    print_json(&ensure_segment_integrity(&create_segment_pairs(
        &segments,
        &Vec::<String>::new(),
    )))
}

async fn run_report(
    sub: &ArgMatches,
    mut config: WorkbenchConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(lang) = sub.get_one::<String>("to") {
        config.languages.target = lang.clone();
    }
    let granularity = config.segmentation.granularity;

    let source_text = read_file(required(sub, "source-file"))?;
    let sources = split_into_segments(&source_text, granularity);
    let targets = match sub.get_one::<String>("target-file") {
        Some(path) => split_into_segments(&read_file(path)?, granularity),
        None => Vec::new(),
    };
    let mut pairs = ensure_segment_integrity(&create_segment_pairs(&sources, &targets));

    if sub.get_flag("mock") {
        let translator = MockTranslator::new(MockMode::Tagged);
        pairs = pretranslate_segments(
            &pairs,
            &translator,
            &config.languages.source,
            &config.languages.target,
        )
        .await?;
    }

    let location = sub
        .get_one::<String>("glossary")
        .map(String::as_str)
        .or(config.glossary.source.as_deref());
    let glossary = fetch_glossary(location).await;

    let evaluations = sub
        .get_many::<String>("evaluate")
        .unwrap_or_default()
        .map(|input| SegmentEvaluation::parse(input, &pairs))
        .collect::<CatResult<Vec<_>>>()?;

    let report = build_report(&pairs, &glossary, &config, evaluations);
    info!(
        errors = report.summary.errors,
        warnings = report.summary.warnings,
        "Report ready"
    );
    println!("{}", export_report_json(&report)?);
    Ok(())
}

async fn fetch_glossary(location: Option<&str>) -> Vec<GlossaryTerm> {
    let Some(location) = location else {
        return Vec::new();
    };
    match glossary_source_for(location) {
        Ok(source) => load_glossary(source.as_ref()).await,
        Err(e) => {
            warn!("Ignoring glossary '{}': {}", location, e);
            Vec::new()
        }
    }
}

fn required<'a>(sub: &'a ArgMatches, name: &str) -> &'a str {
    // clap enforces required positionals before we get here
    sub.get_one::<String>(name).map(String::as_str).unwrap_or_default()
}

fn pair_args(sub: &ArgMatches) -> (&str, &str) {
    (required(sub, "source"), required(sub, "target"))
}

fn read_file(path: &str) -> CatResult<String> {
    read_document(Path::new(path))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
