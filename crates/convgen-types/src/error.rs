use miette::Diagnostic;
use thiserror::Error;

use crate::conversion::ConversionKind;
use crate::types::ScalarType;
use crate::width::VectorWidth;

/// Defects in the static tables or in a requested conversion tuple.
///
/// None of these are recoverable at generation time: they mean the generator
/// was configured with tables that cannot produce a well-formed artifact.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown scalar type `{0}`")]
    #[diagnostic(
        code("CATALOG-001"),
        help("Known types are: char, uchar, short, ushort, int, uint, long, ulong, float, double")
    )]
    UnknownType(String),

    #[error("Unknown vector width `{0}`")]
    #[diagnostic(
        code("CATALOG-002"),
        help("Vector widths are written as \"\" (scalar), \"2\", \"3\", \"4\", \"8\" or \"16\"")
    )]
    UnknownWidth(String),

    #[error("Scalar type `{0}` is listed more than once")]
    #[diagnostic(code("CATALOG-003"))]
    DuplicateType(ScalarType),

    #[error("Vector width `{0}` is listed more than once")]
    #[diagnostic(code("CATALOG-004"))]
    DuplicateWidth(VectorWidth),

    #[error("Vector width {width} decomposes into width {missing}, which is not in the width table")]
    #[diagnostic(
        code("CATALOG-005"),
        help("Add the missing width, or drop {width} from the table")
    )]
    MissingDecomposition {
        width: VectorWidth,
        missing: VectorWidth,
    },

    #[error("The {kind} conversion {src} -> {dst} does not accept saturation")]
    #[diagnostic(
        code("CATALOG-006"),
        help("Saturation is only legal when the destination is an integer type")
    )]
    IllegalSaturation {
        src: ScalarType,
        dst: ScalarType,
        kind: ConversionKind,
    },

    #[error("The {kind} conversion {src} -> {dst} does not accept an explicit rounding mode")]
    #[diagnostic(
        code("CATALOG-007"),
        help("Rounding modes apply to float <-> integer conversions and to narrowing float conversions")
    )]
    IllegalRounding {
        src: ScalarType,
        dst: ScalarType,
        kind: ConversionKind,
    },

    #[error("The type catalog is empty")]
    #[diagnostic(code("CATALOG-008"))]
    EmptyCatalog,

    #[error("The vector width table is empty")]
    #[diagnostic(code("CATALOG-009"))]
    EmptyWidthTable,
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
