//! Static data model of the conversion generator.
//!
//! This crate holds the read-only inputs of generation:
//! - the scalar type catalog ([`ScalarType`], [`Catalog`])
//! - the vector width table and its decomposition map ([`VectorWidth`], [`WidthTable`])
//! - saturation and rounding modes ([`Saturation`], [`RoundingMode`])
//! - conversion tuples and their legality rules ([`Conversion`], [`ConversionKind`])
//!
//! Everything here is immutable once built. The code generator receives these
//! values explicitly instead of reaching for module-level tables.

mod conversion;
mod error;
mod mode;
mod types;
mod width;

pub use conversion::{Conversion, ConversionKind};
pub use error::{CatalogError, CatalogResult};
pub use mode::{RoundingMode, Saturation};
pub use types::{Catalog, Extension, ScalarType, TypeCategory, TypeDescriptor};
pub use width::{Split, VectorWidth, WidthTable};
