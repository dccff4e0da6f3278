//! The scalar type catalog.
//!
//! Every conversion function the generator emits is keyed by a pair of
//! scalar types from this catalog. The descriptors are plain constant data;
//! a [`Catalog`] is an ordered, validated selection of them that is built once
//! and handed to the synthesis engine.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};

/// A scalar numeric type of the target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum ScalarType {
    // Signed and unsigned integers, narrowest first
    Char, UChar, Short, UShort, Int, UInt, Long, ULong,
    // Floating point
    Float, Double,
}

/// Broad numeric category of a scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Signed,
    Unsigned,
    Float,
}

/// Optional language extension a type depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Extension {
    /// Double precision floating point (`cl_khr_fp64`).
    Fp64,
    /// 64-bit integers (`cles_khr_int64` on embedded profiles).
    Int64,
}

/// Immutable description of a scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: &'static str,
    pub bits: u32,
    pub category: TypeCategory,
    /// Unsigned type of the same width. `None` for floats.
    pub unsigned: Option<ScalarType>,
    /// Signed type of the same width. `None` for floats.
    pub signed: Option<ScalarType>,
    /// Literal for the largest representable value.
    pub max: &'static str,
    /// Literal for the smallest representable value.
    pub min: &'static str,
    pub extension: Option<Extension>,
}

const fn int(
    name: &'static str,
    bits: u32,
    category: TypeCategory,
    signed: ScalarType,
    unsigned: ScalarType,
    max: &'static str,
    min: &'static str,
    extension: Option<Extension>,
) -> TypeDescriptor {
    TypeDescriptor {
        name,
        bits,
        category,
        unsigned: Some(unsigned),
        signed: Some(signed),
        max,
        min,
        extension,
    }
}

const fn float(
    name: &'static str,
    bits: u32,
    max: &'static str,
    min: &'static str,
    extension: Option<Extension>,
) -> TypeDescriptor {
    TypeDescriptor {
        name,
        bits,
        category: TypeCategory::Float,
        unsigned: None,
        signed: None,
        max,
        min,
        extension,
    }
}

use ScalarType::*;
use TypeCategory::{Signed, Unsigned};

const CHAR: TypeDescriptor = int("char", 8, Signed, Char, UChar, "CHAR_MAX", "CHAR_MIN", None);
const UCHAR: TypeDescriptor = int("uchar", 8, Unsigned, Char, UChar, "UCHAR_MAX", "0", None);
const SHORT: TypeDescriptor = int("short", 16, Signed, Short, UShort, "SHRT_MAX", "SHRT_MIN", None);
const USHORT: TypeDescriptor = int("ushort", 16, Unsigned, Short, UShort, "USHRT_MAX", "0", None);
const INT: TypeDescriptor = int("int", 32, Signed, Int, UInt, "INT_MAX", "INT_MIN", None);
const UINT: TypeDescriptor = int("uint", 32, Unsigned, Int, UInt, "UINT_MAX", "0", None);
const LONG: TypeDescriptor =
    int("long", 64, Signed, Long, ULong, "LONG_MAX", "LONG_MIN", Some(Extension::Int64));
const ULONG: TypeDescriptor =
    int("ulong", 64, Unsigned, Long, ULong, "ULONG_MAX", "0", Some(Extension::Int64));
const FLOAT: TypeDescriptor = float("float", 32, "FLT_MAX", "-FLT_MAX", None);
const DOUBLE: TypeDescriptor = float("double", 64, "DBL_MAX", "-DBL_MAX", Some(Extension::Fp64));

impl ScalarType {
    /// Every scalar type, in catalog order.
    pub const ALL: [ScalarType; 10] = [
        Char, UChar, Short, UShort, Int, UInt, Long, ULong, Float, Double,
    ];

    pub fn descriptor(self) -> &'static TypeDescriptor {
        match self {
            Char => &CHAR,
            UChar => &UCHAR,
            Short => &SHORT,
            UShort => &USHORT,
            Int => &INT,
            UInt => &UINT,
            Long => &LONG,
            ULong => &ULONG,
            Float => &FLOAT,
            Double => &DOUBLE,
        }
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn bits(self) -> u32 {
        self.descriptor().bits
    }

    pub fn category(self) -> TypeCategory {
        self.descriptor().category
    }

    pub fn extension(self) -> Option<Extension> {
        self.descriptor().extension
    }

    /// Returns `true` if this type is a float type (`float`, `double`).
    pub fn is_float(self) -> bool {
        self.category() == TypeCategory::Float
    }

    /// Returns `true` if this type is an integer type (signed or unsigned).
    pub fn is_integer(self) -> bool {
        !self.is_float()
    }

    pub fn is_signed(self) -> bool {
        self.category() == TypeCategory::Signed
    }

    pub fn is_unsigned(self) -> bool {
        self.category() == TypeCategory::Unsigned
    }

    pub fn unsigned_counterpart(self) -> Option<ScalarType> {
        self.descriptor().unsigned
    }

    pub fn signed_counterpart(self) -> Option<ScalarType> {
        self.descriptor().signed
    }

    /// Saturation upper bound literal.
    pub fn limit_max(self) -> &'static str {
        self.descriptor().max
    }

    /// Saturation lower bound literal.
    pub fn limit_min(self) -> &'static str {
        self.descriptor().min
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeCategory::Signed => write!(f, "signed"),
            TypeCategory::Unsigned => write!(f, "unsigned"),
            TypeCategory::Float => write!(f, "float"),
        }
    }
}

impl FromStr for ScalarType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScalarType::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| CatalogError::UnknownType(s.to_string()))
    }
}

impl TryFrom<String> for ScalarType {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An ordered, duplicate-free selection of scalar types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    types: Vec<ScalarType>,
}

impl Catalog {
    /// The full catalog.
    pub fn full() -> Self {
        Catalog {
            types: ScalarType::ALL.to_vec(),
        }
    }

    /// Builds a catalog from a selection of types.
    ///
    /// The selection is reordered into catalog order so the generated output
    /// does not depend on how the selection was written down.
    pub fn from_types(types: impl IntoIterator<Item = ScalarType>) -> CatalogResult<Self> {
        let mut selected: Vec<ScalarType> = Vec::new();
        for ty in types {
            if selected.contains(&ty) {
                return Err(CatalogError::DuplicateType(ty));
            }
            selected.push(ty);
        }
        if selected.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        selected.sort();
        log::debug!("Type catalog: {} types", selected.len());
        Ok(Catalog { types: selected })
    }

    pub fn types(&self) -> &[ScalarType] {
        &self.types
    }

    pub fn contains(&self, ty: ScalarType) -> bool {
        self.types.contains(&ty)
    }

    /// Returns `true` if any type in the catalog depends on `extension`.
    pub fn requires(&self, extension: Extension) -> bool {
        self.types.iter().any(|ty| ty.extension() == Some(extension))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::full()
    }
}
