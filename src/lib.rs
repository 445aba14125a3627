//! MVC Routes - wiki listings of HTTP endpoints from a Rust MVC application.
//!
//! The target application registers its routes in a conventional entry point
//! (`register_routes`) and implements its actions as methods of `<Name>Controller` types.
//! This library reads both from source, joins every route with the verbs, parameters and
//! doc comment of the action serving it, and renders the result as wiki markup.
//!
//! # Architecture
//!
//! 1. [`scanner`] - Collects the target's Rust source files
//! 2. [`parser`] - Parses them into syntax trees
//! 3. [`registry`] - Extracts controllers, actions, verb markers and doc comments
//! 4. [`route_table`] - Reads the route table from the entry point or a manifest
//! 5. [`loader`] - Ties the above together for one target
//! 6. [`inspector`] - Resolves each route's handler and verbs into an endpoint
//! 7. [`documentation`] - Parses doc comments and builds documentation records
//! 8. [`grouping`] - Groups endpoints by controller
//! 9. [`formatter`] - Renders the long or short wiki layout
//!
//! # Example Usage
//!
//! ```no_run
//! use mvc_routes::{
//!     formatter::{long::WikiLongFormatter, render},
//!     loader::{LoaderConfig, TargetLibrary},
//! };
//! use std::path::PathBuf;
//!
//! let config = LoaderConfig::new(PathBuf::from("./my-app"));
//! let library = TargetLibrary::load(&config).unwrap();
//! let endpoints = library.endpoints();
//! println!("{}", render(&endpoints, &WikiLongFormatter));
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod scanner;
pub mod parser;
pub mod registry;
pub mod route_table;
pub mod loader;
pub mod inspector;
pub mod documentation;
pub mod grouping;
pub mod formatter;
pub mod output;
pub mod error;
