//! Conversion tuples: the unit of generation.

use std::fmt;

use crate::error::{CatalogError, CatalogResult};
use crate::mode::{RoundingMode, Saturation};
use crate::types::{Catalog, ScalarType};
use crate::width::{VectorWidth, WidthTable};

/// The (source category, destination category) shape of a conversion.
///
/// This decides which saturation and rounding qualifiers are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    IntToInt,
    FloatToInt,
    IntToFloat,
    /// Float to a float with fewer bits.
    FloatNarrowing,
    /// Float to a float of the same or more bits.
    FloatToFloat,
}

impl ConversionKind {
    pub fn of(src: ScalarType, dst: ScalarType) -> Self {
        match (src.is_float(), dst.is_float()) {
            (false, false) => ConversionKind::IntToInt,
            (true, false) => ConversionKind::FloatToInt,
            (false, true) => ConversionKind::IntToFloat,
            (true, true) if dst.bits() < src.bits() => ConversionKind::FloatNarrowing,
            (true, true) => ConversionKind::FloatToFloat,
        }
    }

    /// Saturation needs an integer destination.
    pub fn accepts_saturation(self) -> bool {
        matches!(self, ConversionKind::IntToInt | ConversionKind::FloatToInt)
    }

    pub fn accepts_rounding(self) -> bool {
        matches!(
            self,
            ConversionKind::FloatToInt | ConversionKind::IntToFloat | ConversionKind::FloatNarrowing
        )
    }
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionKind::IntToInt => write!(f, "integer-to-integer"),
            ConversionKind::FloatToInt => write!(f, "float-to-integer"),
            ConversionKind::IntToFloat => write!(f, "integer-to-float"),
            ConversionKind::FloatNarrowing => write!(f, "narrowing float"),
            ConversionKind::FloatToFloat => write!(f, "float-to-float"),
        }
    }
}

/// A single (source, destination, width, saturation, rounding) tuple.
///
/// Construction checks the qualifiers against [`ConversionKind`], so every
/// value of this type names exactly one legal generated function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Conversion {
    src: ScalarType,
    dst: ScalarType,
    width: VectorWidth,
    saturation: Saturation,
    rounding: RoundingMode,
}

impl Conversion {
    pub fn new(
        src: ScalarType,
        dst: ScalarType,
        width: VectorWidth,
        saturation: Saturation,
        rounding: RoundingMode,
    ) -> CatalogResult<Self> {
        let kind = ConversionKind::of(src, dst);
        if saturation.is_saturating() && !kind.accepts_saturation() {
            return Err(CatalogError::IllegalSaturation { src, dst, kind });
        }
        if rounding.is_explicit() && !kind.accepts_rounding() {
            return Err(CatalogError::IllegalRounding { src, dst, kind });
        }
        Ok(Conversion {
            src,
            dst,
            width,
            saturation,
            rounding,
        })
    }

    /// Plain conversion: no saturation, default rounding.
    pub fn plain(src: ScalarType, dst: ScalarType, width: VectorWidth) -> Self {
        Conversion {
            src,
            dst,
            width,
            saturation: Saturation::None,
            rounding: RoundingMode::Default,
        }
    }

    pub fn src(&self) -> ScalarType {
        self.src
    }

    pub fn dst(&self) -> ScalarType {
        self.dst
    }

    pub fn width(&self) -> VectorWidth {
        self.width
    }

    pub fn saturation(&self) -> Saturation {
        self.saturation
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    pub fn kind(&self) -> ConversionKind {
        ConversionKind::of(self.src, self.dst)
    }

    /// Source and destination are the same type.
    pub fn is_identity(&self) -> bool {
        self.src == self.dst
    }

    /// The same conversion at another width.
    pub fn with_width(&self, width: VectorWidth) -> Self {
        Conversion { width, ..*self }
    }

    /// Vector type name of the parameter, e.g. `int3`.
    pub fn src_type_name(&self) -> String {
        format!("{}{}", self.src, self.width.suffix())
    }

    /// Vector type name of the result, e.g. `uchar3`.
    pub fn dst_type_name(&self) -> String {
        format!("{}{}", self.dst, self.width.suffix())
    }

    /// `convert_<dst><N><_sat?><_mode?>`.
    pub fn function_name(&self) -> String {
        format!(
            "convert_{}{}{}",
            self.dst_type_name(),
            self.saturation.suffix(),
            self.rounding.suffix()
        )
    }

    /// The overload-resolved symbol, e.g. `convert_uchar3_sat(int3)`.
    ///
    /// Function names repeat across source types; the signature does not.
    pub fn signature(&self) -> String {
        format!("{}({})", self.function_name(), self.src_type_name())
    }

    /// Every legal tuple over `catalog` x `catalog` x `widths`, in emission order.
    pub fn enumerate<'a>(
        catalog: &'a Catalog,
        widths: &'a WidthTable,
    ) -> impl Iterator<Item = Conversion> + 'a {
        catalog.types().iter().flat_map(move |&src| {
            catalog.types().iter().flat_map(move |&dst| {
                let kind = ConversionKind::of(src, dst);
                widths.widths().iter().flat_map(move |&width| {
                    Saturation::ALL
                        .into_iter()
                        .filter(move |sat| !sat.is_saturating() || kind.accepts_saturation())
                        .flat_map(move |saturation| {
                            RoundingMode::ALL
                                .into_iter()
                                .filter(move |mode| !mode.is_explicit() || kind.accepts_rounding())
                                .map(move |rounding| Conversion {
                                    src,
                                    dst,
                                    width,
                                    saturation,
                                    rounding,
                                })
                        })
                })
            })
        })
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn kinds() {
        use ScalarType::*;
        assert_eq!(ConversionKind::of(Int, UChar), ConversionKind::IntToInt);
        assert_eq!(ConversionKind::of(Float, Int), ConversionKind::FloatToInt);
        assert_eq!(ConversionKind::of(ULong, Double), ConversionKind::IntToFloat);
        assert_eq!(ConversionKind::of(Double, Float), ConversionKind::FloatNarrowing);
        assert_eq!(ConversionKind::of(Float, Double), ConversionKind::FloatToFloat);
        assert_eq!(ConversionKind::of(Float, Float), ConversionKind::FloatToFloat);
    }

    #[test]
    fn rounding_on_integer_pair_is_rejected() {
        let err = Conversion::new(
            ScalarType::Int,
            ScalarType::Char,
            VectorWidth::Scalar,
            Saturation::None,
            RoundingMode::Rtz,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::IllegalRounding { .. }));
    }

    #[test]
    fn saturation_into_float_is_rejected() {
        let err = Conversion::new(
            ScalarType::Int,
            ScalarType::Float,
            VectorWidth::Four,
            Saturation::Saturating,
            RoundingMode::Default,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::IllegalSaturation {
                src: ScalarType::Int,
                dst: ScalarType::Float,
                kind: ConversionKind::IntToFloat,
            }
        );
    }

    #[test]
    fn names() {
        let conv = Conversion::new(
            ScalarType::Float,
            ScalarType::Int,
            VectorWidth::Scalar,
            Saturation::Saturating,
            RoundingMode::Rtz,
        )
        .unwrap();
        assert_eq!(conv.function_name(), "convert_int_sat_rtz");
        assert_eq!(conv.signature(), "convert_int_sat_rtz(float)");

        let conv = Conversion::plain(ScalarType::Int, ScalarType::UChar, VectorWidth::Three);
        assert_eq!(conv.function_name(), "convert_uchar3");
        assert_eq!(conv.src_type_name(), "int3");
    }

    #[test]
    fn enumeration_counts_per_pair() {
        let widths = WidthTable::from_widths([VectorWidth::Scalar]).unwrap();
        let count = |src, dst| {
            let catalog = Catalog::from_types([src, dst]).unwrap();
            Conversion::enumerate(&catalog, &widths)
                .filter(|c| c.src() == src && c.dst() == dst)
                .count()
        };
        use ScalarType::*;
        // plain + sat
        assert_eq!(count(Int, Char), 2);
        // (plain + sat) x (default + 4 modes)
        assert_eq!(count(Float, Int), 10);
        // default + 4 modes
        assert_eq!(count(Int, Float), 5);
        assert_eq!(count(Double, Float), 5);
        assert_eq!(count(Float, Double), 1);
    }

    #[test]
    fn enumeration_signatures_are_unique() {
        let catalog = Catalog::full();
        let widths = WidthTable::full();
        let mut seen = HashSet::new();
        for conv in Conversion::enumerate(&catalog, &widths) {
            assert!(seen.insert(conv.signature()), "duplicate {conv}");
        }
        // 10 types, 6 widths: 64 int pairs x 2, 16 float->int x 10,
        // 16 int->float x 5, 1 narrowing x 5, 3 other float pairs x 1.
        assert_eq!(seen.len(), 6 * (64 * 2 + 16 * 10 + 16 * 5 + 5 + 3));
    }

    #[test]
    fn enumeration_order_is_source_destination_width_saturation_rounding() {
        let catalog = Catalog::from_types([ScalarType::Float, ScalarType::Int]).unwrap();
        let widths = WidthTable::from_widths([VectorWidth::Scalar, VectorWidth::Two]).unwrap();
        let names: Vec<String> = Conversion::enumerate(&catalog, &widths)
            .filter(|c| c.src() == ScalarType::Float && c.dst() == ScalarType::Int)
            .map(|c| c.function_name())
            .take(7)
            .collect();
        assert_eq!(
            names,
            [
                "convert_int",
                "convert_int_rtz",
                "convert_int_rte",
                "convert_int_rtp",
                "convert_int_rtn",
                "convert_int_sat",
                "convert_int_sat_rtz",
            ]
        );
        let first = Conversion::enumerate(&catalog, &widths).next().unwrap();
        assert_eq!(first.signature(), "convert_int(int)");
    }
}
