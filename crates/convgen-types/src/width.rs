//! Vector widths and how composite widths split into narrower ones.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};

/// Number of lanes of a generated conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum VectorWidth {
    Scalar,
    Two,
    Three,
    Four,
    Eight,
    Sixteen,
}

/// How a composite width is assembled from two narrower conversions.
///
/// `low_slice` and `high_slice` are the swizzles applied to the source
/// vector before each half is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    pub low: VectorWidth,
    pub low_slice: &'static str,
    pub high: VectorWidth,
    pub high_slice: &'static str,
}

impl VectorWidth {
    pub const ALL: [VectorWidth; 6] = [
        VectorWidth::Scalar,
        VectorWidth::Two,
        VectorWidth::Three,
        VectorWidth::Four,
        VectorWidth::Eight,
        VectorWidth::Sixteen,
    ];

    pub fn lanes(self) -> u32 {
        match self {
            VectorWidth::Scalar => 1,
            VectorWidth::Two => 2,
            VectorWidth::Three => 3,
            VectorWidth::Four => 4,
            VectorWidth::Eight => 8,
            VectorWidth::Sixteen => 16,
        }
    }

    /// Type-name suffix: empty for scalars, the lane count otherwise.
    pub fn suffix(self) -> &'static str {
        match self {
            VectorWidth::Scalar => "",
            VectorWidth::Two => "2",
            VectorWidth::Three => "3",
            VectorWidth::Four => "4",
            VectorWidth::Eight => "8",
            VectorWidth::Sixteen => "16",
        }
    }

    pub fn is_scalar(self) -> bool {
        self == VectorWidth::Scalar
    }

    /// The two narrower widths this width is built from.
    ///
    /// Three lanes split as the first two plus the last one; every other
    /// composite width splits into equal halves.
    pub fn split(self) -> Option<Split> {
        let halves = |half| Split {
            low: half,
            low_slice: "lo",
            high: half,
            high_slice: "hi",
        };
        match self {
            VectorWidth::Scalar => None,
            VectorWidth::Two => Some(halves(VectorWidth::Scalar)),
            VectorWidth::Three => Some(Split {
                low: VectorWidth::Two,
                low_slice: "s01",
                high: VectorWidth::Scalar,
                high_slice: "s2",
            }),
            VectorWidth::Four => Some(halves(VectorWidth::Two)),
            VectorWidth::Eight => Some(halves(VectorWidth::Four)),
            VectorWidth::Sixteen => Some(halves(VectorWidth::Eight)),
        }
    }
}

impl fmt::Display for VectorWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorWidth::Scalar => write!(f, "scalar"),
            other => write!(f, "{}", other.lanes()),
        }
    }
}

impl FromStr for VectorWidth {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "1" || s.eq_ignore_ascii_case("scalar") {
            return Ok(VectorWidth::Scalar);
        }
        VectorWidth::ALL
            .into_iter()
            .find(|width| width.suffix() == s)
            .ok_or_else(|| CatalogError::UnknownWidth(s.to_string()))
    }
}

impl TryFrom<String> for VectorWidth {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The ordered set of widths to generate, closed under [`VectorWidth::split`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidthTable {
    widths: Vec<VectorWidth>,
}

impl WidthTable {
    pub fn full() -> Self {
        WidthTable {
            widths: VectorWidth::ALL.to_vec(),
        }
    }

    /// Builds a table from a selection of widths.
    ///
    /// Fails if a composite width's halves are missing, since such a width
    /// could not be decomposed when no primitive exists for it.
    pub fn from_widths(widths: impl IntoIterator<Item = VectorWidth>) -> CatalogResult<Self> {
        let mut selected: Vec<VectorWidth> = Vec::new();
        for width in widths {
            if selected.contains(&width) {
                return Err(CatalogError::DuplicateWidth(width));
            }
            selected.push(width);
        }
        if selected.is_empty() {
            return Err(CatalogError::EmptyWidthTable);
        }
        selected.sort();

        for &width in &selected {
            if let Some(split) = width.split() {
                for part in [split.low, split.high] {
                    if !selected.contains(&part) {
                        return Err(CatalogError::MissingDecomposition {
                            width,
                            missing: part,
                        });
                    }
                }
            }
        }
        Ok(WidthTable { widths: selected })
    }

    pub fn widths(&self) -> &[VectorWidth] {
        &self.widths
    }

    pub fn contains(&self, width: VectorWidth) -> bool {
        self.widths.contains(&width)
    }
}

impl Default for WidthTable {
    fn default() -> Self {
        WidthTable::full()
    }
}
