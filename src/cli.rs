use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

use crate::loader::DEFAULT_ENTRY_POINT;

/// MVC Routes - List a Rust MVC application's HTTP endpoints as wiki markup
#[derive(Parser, Debug)]
#[command(name = "mvc-routes")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the target project directory or source file
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output style
    #[arg(short = 'f', long = "format", value_enum, default_value = "long")]
    pub format: OutputStyle,

    /// Route manifest (YAML or JSON) to use instead of the registration entry point
    #[arg(short = 'r', long = "routes", value_name = "FILE")]
    pub routes_manifest: Option<PathBuf>,

    /// Name of the function that registers the routes
    #[arg(short = 'e', long = "entry-point", default_value = DEFAULT_ENTRY_POINT)]
    pub entry_point: String,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Wiki output styles
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputStyle {
    /// Headings and a table per endpoint, grouped by controller
    Long,
    /// One table row per endpoint
    Short,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.target.exists() {
        anyhow::bail!("Target does not exist: {}", args.target.display());
    }

    if let Some(ref manifest) = args.routes_manifest {
        if !manifest.is_file() {
            anyhow::bail!("Route manifest is not a file: {}", manifest.display());
        }
    }

    if args.entry_point.trim().is_empty() {
        anyhow::bail!("Entry point name must not be empty");
    }

    info!("Target: {}", args.target.display());
    info!("Format: {:?}", args.format);
    match args.routes_manifest {
        Some(ref manifest) => info!("Routes: manifest {}", manifest.display()),
        None => info!("Routes: entry point `{}`", args.entry_point),
    }
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Log builder: `RUST_LOG` filters when set, otherwise Info (Debug with `--verbose`).
pub fn logger(verbose: bool, env_filters: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    match env_filters {
        Some(filters) => {
            builder.parse_filters(filters);
        }
        None => {
            builder.filter_level(if verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            });
        }
    }
    builder
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::formatter::long::WikiLongFormatter;
    use crate::formatter::short::WikiShortFormatter;
    use crate::formatter::{render, EndpointFormatter};
    use crate::loader::{LoaderConfig, TargetLibrary};
    use crate::output::write_to_file;

    // Step 1: Load the target library
    let config = LoaderConfig::new(args.target.clone())
        .with_entry_point(args.entry_point.clone())
        .with_routes_manifest(args.routes_manifest.clone());
    let library = TargetLibrary::load(&config)?;

    if library.routes.is_empty() {
        log::warn!("The route table is empty");
    }

    // Step 2: Resolve every route into an endpoint
    info!("Inspecting routes...");
    let endpoints = library.endpoints();
    let documented = endpoints
        .iter()
        .filter(|e| e.documentation.is_documented())
        .count();

    // Step 3: Render
    let formatter: Box<dyn EndpointFormatter> = match args.format {
        OutputStyle::Long => Box::new(WikiLongFormatter),
        OutputStyle::Short => Box::new(WikiShortFormatter),
    };
    let content = render(&endpoints, formatter.as_ref());

    // Step 4: Output to file or stdout
    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
    } else {
        print!("{}", content);
    }

    info!("Summary:");
    info!("  - Source files parsed: {}", library.source_count);
    info!("  - Controllers: {}", library.registry.controllers().count());
    info!("  - Routes: {}", endpoints.len());
    info!("  - Documented endpoints: {}", documented);

    Ok(())
}
