//! dprender renders infrastructure-as-code trees for data products.
//! Each data product is described by a YAML configuration file whose metadata
//! (name, owners, tags, access lists) is substituted into a shared template tree.

/// Batch processing of configuration files and directories
pub mod batch;

/// Command-line interface module for the dprender application
pub mod cli;

/// Loading of data product configuration documents
pub mod config;

/// Common constants and documented defaults
pub mod constants;

/// Mapping of configuration documents into rendering contexts
pub mod context;

/// Error types and handling for the dprender application
pub mod error;

/// File and directory ignore patterns
/// Processes .templateignore files to exclude specific template paths
pub mod ignore;

/// Logger setup for the binary
pub mod logger;

/// Template tree walking, rendering and copying
pub mod processor;

/// Template engine abstraction and its MiniJinja implementation
pub mod renderer;

/// Normalisation of data product names into slugs
pub mod slug;

/// Name-uniqueness checks over a collection of configuration documents
pub mod validation;
