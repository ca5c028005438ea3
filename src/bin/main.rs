use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use orbpack::{BuildPipeline, ProjectConfig, parse_override, verify_entry_point};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "orbpack")]
#[command(version, about = "version resolution, resource injection and fat jar packaging", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// path to the project root (defaults to current directory)
    #[arg(short, long, default_value = ".", global = true)]
    path: PathBuf,

    /// project file (defaults to orbpack.toml in the project root)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// output format (json or human)
    #[arg(short, long, default_value = "human", global = true)]
    format: OutputFormat,

    /// build property override, e.g. -P orbrunnerServerUrl=http://example.com:9000
    #[arg(short = 'P', long = "property", value_name = "NAME=VALUE", value_parser = parse_override, global = true)]
    properties: Vec<(String, String)>,

    /// log progress at info level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Json,
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(format!(
                "invalid output format: {}, use 'json' or 'human'",
                s
            )),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// print the version a build unit resolves to
    Version {
        /// build unit (defaults to the first declared unit)
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// print the resolved build properties
    Properties,

    /// package one or all build units
    Build {
        /// build only this unit
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// check that an artifact's Main-Class is present in it
    Verify {
        /// path to the artifact
        artifact: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match &cli.command {
        Commands::Version { unit } => {
            let pipeline = load_pipeline(&cli)?;
            handle_version(&pipeline, &cli.format, unit.as_deref())?;
        }
        Commands::Properties => {
            let pipeline = load_pipeline(&cli)?;
            handle_properties(&pipeline, &cli.format)?;
        }
        Commands::Build { unit } => {
            let pipeline = load_pipeline(&cli)?;
            handle_build(&pipeline, &cli.format, unit.as_deref())?;
        }
        Commands::Verify { artifact } => {
            handle_verify(artifact, &cli.format)?;
        }
    }

    Ok(())
}

/// load the project file and resolve build properties once
fn load_pipeline(cli: &Cli) -> Result<BuildPipeline> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => ProjectConfig::find_config_file(&cli.path).with_context(|| {
            format!(
                "no {} found in {}",
                orbpack::CONFIG_FILE_NAME,
                cli.path.display()
            )
        })?,
    };
    let config = ProjectConfig::load_from_file(&config_path)
        .with_context(|| format!("failed to load project file {}", config_path.display()))?;

    let overrides: BTreeMap<String, String> = cli.properties.iter().cloned().collect();
    Ok(BuildPipeline::with_overrides(&cli.path, config, &overrides))
}

fn handle_version(pipeline: &BuildPipeline, format: &OutputFormat, unit: Option<&str>) -> Result<()> {
    let unit = pipeline.unit_or_default(unit)?;
    let version = pipeline
        .resolve_version(unit)
        .with_context(|| format!("failed to resolve version for '{}'", unit.name))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "unit": unit.name,
                "version": version,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("{}", version);
        }
    }
    Ok(())
}

fn handle_properties(pipeline: &BuildPipeline, format: &OutputFormat) -> Result<()> {
    let properties = pipeline.properties();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(properties)?);
        }
        OutputFormat::Human => {
            println!("build properties:");
            for (name, value) in properties.iter() {
                println!("  {} = {}", name, value);
            }
        }
    }
    Ok(())
}

fn handle_build(pipeline: &BuildPipeline, format: &OutputFormat, unit: Option<&str>) -> Result<()> {
    let reports = match unit {
        Some(name) => vec![
            pipeline
                .run_named(name)
                .with_context(|| format!("failed to build unit '{}'", name))?,
        ],
        None => pipeline.run_all().context("build failed")?,
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Human => {
            for report in &reports {
                println!("{} {}", report.unit, report.version);
                println!("  artifact: {}", report.package.artifact.display());
                println!("  main class: {}", report.package.main_class);
                println!("  entries: {}", report.package.entries);
                println!(
                    "  resources: {} staged, {} expanded",
                    report.resources.staged.len(),
                    report.resources.expanded.len()
                );
                println!("  duplicates excluded: {}", report.package.excluded.len());
                println!("  sha256: {}", report.package.sha256);
                if !report.package.entry_point_found {
                    println!(
                        "  warning: {} is missing, the artifact will not launch",
                        report.package.main_class
                    );
                }
            }
        }
    }
    Ok(())
}

fn handle_verify(artifact: &Path, format: &OutputFormat) -> Result<()> {
    let main_class = verify_entry_point(artifact)
        .with_context(|| format!("verification failed for {}", artifact.display()))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "artifact": artifact,
                "main_class": main_class,
                "entry_point_found": true,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("{}: entry point {} ok", artifact.display(), main_class);
        }
    }
    Ok(())
}
