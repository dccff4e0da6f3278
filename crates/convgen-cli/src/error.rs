use std::path::PathBuf;

use convgen_codegen::CodegenError;
use convgen_types::{CatalogError, ScalarType};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// CLI-specific error type that provides rich diagnostics
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Failed to {operation} {path}")]
    #[diagnostic(code(convgen::cli::io_error))]
    IoError {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code(convgen::cli::config_error),
        help("See the [catalog], [primitives] and [output] tables accepted by convgen")
    )]
    ConfigParse {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Codegen(#[from] CodegenError),

    #[error("No conversion named `{name}` takes a `{from}` argument")]
    #[diagnostic(
        code(convgen::cli::unknown_conversion),
        help("Run `convgen list --filter <name>` to see the generated signatures")
    )]
    UnknownConversion { name: String, from: String },

    #[error("{path} is out of date with the generator")]
    #[diagnostic(
        code(convgen::cli::stale_artifact),
        help("Regenerate it with `convgen generate --output <path>`")
    )]
    StaleArtifact { path: PathBuf },
}

/// Convert IO errors with context
pub fn convert_io_error(error: std::io::Error, path: PathBuf, operation: &'static str) -> CliError {
    CliError::IoError {
        path,
        operation,
        source: error,
    }
}

/// Convert TOML errors, keeping the offending span
pub fn convert_toml_error(error: toml::de::Error, path: &std::path::Path, source: &str) -> CliError {
    CliError::ConfigParse {
        src: NamedSource::new(path.display().to_string(), source.to_string()),
        span: error.span().map(SourceSpan::from),
        message: error.message().to_string(),
    }
}

impl CliError {
    pub fn unknown_conversion(name: &str, from: ScalarType) -> Self {
        CliError::UnknownConversion {
            name: name.to_string(),
            from: from.to_string(),
        }
    }
}
