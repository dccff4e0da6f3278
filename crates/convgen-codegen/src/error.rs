use convgen_types::{CatalogError, VectorWidth};
use miette::Diagnostic;
use thiserror::Error;

/// Errors that abort generation or verification of a conversion library.
#[derive(Debug, Error, Diagnostic)]
pub enum CodegenError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),

    #[error("No way to lower {signature}: {reason}")]
    #[diagnostic(
        code("CODEGEN-001"),
        help("Make the primitive available at scalar width, or drop the type from the catalog")
    )]
    NoLowering { signature: String, reason: String },

    #[error("{signature} decomposes into width {width}, which is not being generated")]
    #[diagnostic(code("CODEGEN-002"))]
    MissingWidth {
        signature: String,
        width: VectorWidth,
    },

    #[error("Conversion {0} is defined more than once")]
    #[diagnostic(code("CODEGEN-003"))]
    DuplicateSignature(String),

    #[error("Unbalanced conditional at line {line}: {message}")]
    #[diagnostic(
        code("CODEGEN-004"),
        help("Every guard opened before a definition must be closed right after it")
    )]
    UnbalancedGuard { line: usize, message: String },

    #[error("Definition of {signature} starting at line {line} crosses a conditional directive")]
    #[diagnostic(code("CODEGEN-005"))]
    StraddlingDefinition { signature: String, line: usize },

    #[error("{signature} should be assembled from {expected:?} but calls {found:?}")]
    #[diagnostic(code("CODEGEN-006"))]
    BadDecomposition {
        signature: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Failed to format the generated library")]
    #[diagnostic(code("CODEGEN-007"))]
    Format(#[from] std::fmt::Error),
}

/// Result type for code generation.
pub type CodegenResult<T> = Result<T, CodegenError>;
