//! # Cache Rules Validator
//!
//! Command-line tool for checking a cache rule file before deploying it.
//! It only reads the rule file; editing is left to the operator.

use anyhow::{bail, Context};
use cache_rules::config::ResolverSettings;
use cache_rules::host::{StandardDefaultStores, StaticDefinitionRegistry, StaticSiteIdentifier};
use cache_rules::models::Definition;
use cache_rules::registry::StorePluginRegistry;
use cache_rules::resolver::{
    DiagnosticSlot, FallbackController, ResolutionOutcome, RuleConfigProvider,
    StoreRegistryBuilder,
};
use cache_rules::rules::{RuleSource, RuleSourceLoader};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "rules-validator")]
#[command(about = "Validate cache rule files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Rule file to read (default: CACHE_RULES_DEFAULT_RULE_PATH or config/cache-rules.json)
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse the rule file and instantiate its stores
    Check,

    /// Resolve definitions against the rule file and print the configuration
    Resolve {
        /// JSON file holding an array of definitions
        #[arg(short, long)]
        definitions: PathBuf,

        /// Site identifier stamped on the configuration
        #[arg(long, default_value = "local")]
        site_id: String,
    },

    /// List the store plugin types available to rule files
    Plugins,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let _subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    let result = match &cli.command {
        Some(Commands::Check) | None => check_rules(&cli),
        Some(Commands::Resolve {
            definitions,
            site_id,
        }) => resolve_rules(&cli, definitions, site_id),
        Some(Commands::Plugins) => list_plugins(),
    };

    match result {
        Ok(()) => {
            info!("Rule validation completed successfully");
            process::exit(0);
        }
        Err(e) => {
            error!("Rule validation failed: {:#}", e);
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

fn rule_source(cli: &Cli) -> RuleSource {
    match &cli.rules {
        Some(path) => RuleSource::path(path),
        None => RuleSource::default_location(),
    }
}

fn check_rules(cli: &Cli) -> anyhow::Result<()> {
    let settings = ResolverSettings::from_env()?;
    let loader = RuleSourceLoader::new(rule_source(cli), settings);

    let raw = loader.load_raw_config()?;
    println!("Rule source parsed: {} declared store(s)", raw.stores.len());

    let plugins = StorePluginRegistry::with_builtin_plugins();
    let defaults = StandardDefaultStores::new();
    let stores = StoreRegistryBuilder::new(&plugins, &defaults).build_stores(&raw.stores)?;

    for (name, record) in &stores {
        println!(
            "  {name:<24} type={:<10} modes={} default={}",
            record.plugin_type,
            record.supported_modes.bits(),
            record.is_default
        );
    }

    for (mode, rules) in [
        ("application", &raw.rules.application),
        ("session", &raw.rules.session),
        ("request", &raw.rules.request),
    ] {
        println!("Rules for {mode}: {}", rules.len());
        for rule in rules.iter() {
            for store in &rule.stores {
                if !stores.contains_key(store) {
                    println!("  warning: rule references undeclared store '{store}'");
                }
            }
        }
    }

    Ok(())
}

fn read_definitions(path: &Path) -> anyhow::Result<Vec<Definition>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading definitions from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing definitions from {}", path.display()))
}

fn resolve_rules(cli: &Cli, definitions: &Path, site_id: &str) -> anyhow::Result<()> {
    let settings = ResolverSettings::from_env()?;
    let provider = RuleConfigProvider::new(
        RuleSourceLoader::new(rule_source(cli), settings),
        StorePluginRegistry::with_builtin_plugins(),
        StaticDefinitionRegistry::new(read_definitions(definitions)?),
        StaticSiteIdentifier::new(site_id),
    );

    let slot = Arc::new(DiagnosticSlot::new());
    let mut controller = FallbackController::with_diagnostics(provider, Arc::clone(&slot));

    match controller.resolve_with_fallback() {
        ResolutionOutcome::Resolved(configuration) => {
            for error in controller.inclusion_errors() {
                eprintln!("warning: {error}");
            }
            println!("{}", serde_json::to_string_pretty(&configuration)?);
            Ok(())
        }
        ResolutionOutcome::UseNativeConfiguration => match slot.take() {
            Some(record) => bail!(
                "host would fall back to native configuration: {} ({})",
                record.message,
                record.kind
            ),
            None => bail!("host would fall back to native configuration"),
        },
    }
}

fn list_plugins() -> anyhow::Result<()> {
    let registry = StorePluginRegistry::with_builtin_plugins();
    println!("Available store plugin types:");
    for store_type in registry.plugin_types() {
        println!("  • {store_type}");
    }
    Ok(())
}
