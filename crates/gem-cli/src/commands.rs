//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use gem_cli::summary::{
    code_lines, entry_table, translation_json, translation_summary, translation_table,
};
use gem_map::{RangeExpander, Translator};
use gem_model::{Code, EquivalenceTable};
use gem_standards::{GemConfig, GemRegistry};

use crate::cli::{ExpandArgs, LookupArgs, OutputFormatArg, TranslateArgs};

pub fn run_translate(args: &TranslateArgs, gem_dir: Option<&Path>) -> Result<()> {
    let span = info_span!("translate", direction = %args.direction);
    let _guard = span.enter();
    let registry = load_registry(gem_dir)?;
    let translation = Translator::new(registry.table(args.direction))
        .translate_detailed(&args.specifiers)
        .with_context(|| format!("translate {}", args.specifiers.join(" ")))?;

    match args.format {
        OutputFormatArg::Table => {
            println!("{}", translation_table(&translation));
            println!("{}", translation_summary(args.direction, &translation));
        }
        OutputFormatArg::Lines => print_codes(&translation.targets),
        OutputFormatArg::Json => {
            let json = translation_json(args.direction, &translation)
                .context("serialize translation")?;
            println!("{json}");
        }
    }
    Ok(())
}

pub fn run_expand(args: &ExpandArgs, gem_dir: Option<&Path>) -> Result<()> {
    let span = info_span!("expand", range = %args.range);
    let _guard = span.enter();
    let codes = match (args.direction, args.revision) {
        (Some(direction), _) => {
            let registry = load_registry(gem_dir)?;
            RangeExpander::new(registry.table(direction).source_codes()).expand(&args.range)
        }
        (None, Some(revision)) if args.defined => {
            let catalog = load_registry(gem_dir)?.defined_codes(revision);
            RangeExpander::new(&catalog).expand(&args.range)
        }
        (None, Some(revision)) => gem_map::expand(revision, &args.range),
        (None, None) => return Err(anyhow!("either --revision or --direction is required")),
    }
    .with_context(|| format!("expand {}", args.range))?;

    info!(code_count = codes.len(), "Expanded range");
    print_codes(&codes);
    Ok(())
}

pub fn run_lookup(args: &LookupArgs, gem_dir: Option<&Path>) -> Result<()> {
    let registry = load_registry(gem_dir)?;
    let code = Code::parse(args.direction.source(), &args.code)?;
    let entry = registry
        .table(args.direction)
        .get(&code)
        .ok_or_else(|| anyhow!("no {} mapping entry for {code}", args.direction))?;
    println!("{}", entry_table(entry));
    Ok(())
}

/// The process-wide registry, loaded on first use.
fn load_registry(gem_dir: Option<&Path>) -> Result<&'static GemRegistry> {
    if let Some(registry) = gem_standards::installed() {
        return Ok(registry);
    }
    let config = match gem_dir {
        Some(dir) => GemConfig::with_data_dir(dir),
        None => GemConfig::default(),
    };
    let registry = GemRegistry::load(&config).with_context(|| {
        format!(
            "load GEM files from {} (set --gem-dir or GEM_DATA_DIR)",
            config.data_dir.display()
        )
    })?;
    gem_standards::install(registry).context("install GEM registry")
}

fn print_codes(codes: &[Code]) {
    if !codes.is_empty() {
        println!("{}", code_lines(codes));
    }
}
