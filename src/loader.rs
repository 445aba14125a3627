//! Loading a target library: its sources, controller registry and route table.

use crate::inspector::{Endpoint, RouteInspector};
use crate::parser::SourceParser;
use crate::registry::SourceRegistry;
use crate::route_table::RouteTable;
use crate::scanner::SourceScanner;
use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::path::PathBuf;

/// Conventional name of the route registration function.
pub const DEFAULT_ENTRY_POINT: &str = "register_routes";

/// What to load and where routes come from.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Project directory or single `.rs` file
    pub target: PathBuf,
    /// Function whose body registers the routes
    pub entry_point: String,
    /// Route manifest replacing the entry point, if set
    pub routes_manifest: Option<PathBuf>,
}

impl LoaderConfig {
    pub fn new(target: PathBuf) -> Self {
        Self {
            target,
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            routes_manifest: None,
        }
    }

    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    pub fn with_routes_manifest(mut self, manifest: Option<PathBuf>) -> Self {
        self.routes_manifest = manifest;
        self
    }
}

/// A loaded target: everything the inspector needs.
#[derive(Debug)]
pub struct TargetLibrary {
    pub registry: SourceRegistry,
    pub routes: RouteTable,
    /// Number of source files that parsed
    pub source_count: usize,
}

impl TargetLibrary {
    /// Scans and parses the target, builds its registry and route table.
    ///
    /// # Errors
    ///
    /// Fails if the target is missing, no source parses, the route manifest is unreadable,
    /// or the registration entry point does not exist.
    pub fn load(config: &LoaderConfig) -> Result<Self> {
        info!("Loading target library: {}", config.target.display());

        let scan_result = SourceScanner::new(config.target.clone()).scan()?;
        for warning in &scan_result.warnings {
            warn!("{}", warning);
        }
        if scan_result.source_files.is_empty() {
            bail!("No Rust source files found in {}", config.target.display());
        }

        let parsed_files = SourceParser::parse_files(&scan_result.source_files);
        if parsed_files.is_empty() {
            bail!("No source files could be parsed in {}", config.target.display());
        }
        info!(
            "Parsed {} of {} source files",
            parsed_files.len(),
            scan_result.source_files.len()
        );

        let registry = SourceRegistry::from_sources(&parsed_files);

        let routes = match &config.routes_manifest {
            Some(manifest) => RouteTable::from_manifest(manifest).with_context(|| {
                format!("Failed to load route manifest: {}", manifest.display())
            })?,
            None => RouteTable::from_registration(&parsed_files, &config.entry_point)
                .with_context(|| {
                    format!(
                        "Failed to register routes from {}",
                        config.target.display()
                    )
                })?,
        };
        info!("Route table holds {} routes", routes.len());

        Ok(Self {
            registry,
            routes,
            source_count: parsed_files.len(),
        })
    }

    /// One endpoint per route, in route table order.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        RouteInspector::new(&self.registry).inspect_all(&self.routes)
    }
}
