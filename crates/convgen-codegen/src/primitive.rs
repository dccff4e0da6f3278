//! Mapping from conversion tuples to the platform's conversion intrinsics.

use convgen_types::{Conversion, ConversionKind, VectorWidth};

/// Default name prefix of the conversion intrinsics.
pub const DEFAULT_PREFIX: &str = "__spirv_";

/// Which intrinsics the target exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveSet {
    prefix: String,
    widths: Vec<VectorWidth>,
}

impl PrimitiveSet {
    pub fn new(prefix: impl Into<String>, widths: impl IntoIterator<Item = VectorWidth>) -> Self {
        let mut widths: Vec<VectorWidth> = widths.into_iter().collect();
        widths.sort();
        widths.dedup();
        PrimitiveSet {
            prefix: prefix.into(),
            widths,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn widths(&self) -> &[VectorWidth] {
        &self.widths
    }

    pub fn covers(&self, width: VectorWidth) -> bool {
        self.widths.contains(&width)
    }
}

impl Default for PrimitiveSet {
    /// Intrinsics for scalars and the small vector widths 2 and 4.
    fn default() -> Self {
        PrimitiveSet::new(
            DEFAULT_PREFIX,
            [VectorWidth::Scalar, VectorWidth::Two, VectorWidth::Four],
        )
    }
}

/// A conversion implemented by a single operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    /// Call to a named intrinsic.
    Intrinsic(String),
    /// Source and destination types agree; the value is returned as is.
    PassThrough,
}

/// Finds the single operation implementing `conv`.
///
/// `None` is not an error: it asks the caller to fall back to a cast or to
/// decompose the vector.
pub fn resolve(conv: &Conversion, primitives: &PrimitiveSet) -> Option<Primitive> {
    if conv.is_identity() && !conv.rounding().is_explicit() {
        return Some(Primitive::PassThrough);
    }
    if !primitives.covers(conv.width()) {
        return None;
    }

    let (src, dst) = (conv.src(), conv.dst());
    let saturating = conv.saturation().is_saturating();
    // (operation, name carries _sat, name carries rounding suffix)
    let (op, sat_suffix, mode_suffix) = match conv.kind() {
        ConversionKind::IntToInt if saturating => match (src.is_signed(), dst.is_signed()) {
            (false, true) => ("SatConvertUToS", false, false),
            (true, false) => ("SatConvertSToU", false, false),
            _ => return None,
        },
        // Same width, different signedness: a bit reinterpretation, not a conversion.
        ConversionKind::IntToInt if src.bits() == dst.bits() => return None,
        ConversionKind::IntToInt if src.is_signed() => ("SConvert", false, false),
        ConversionKind::IntToInt => ("UConvert", false, false),
        ConversionKind::FloatToInt if dst.is_signed() => ("ConvertFToS", true, true),
        ConversionKind::FloatToInt => ("ConvertFToU", true, true),
        ConversionKind::IntToFloat if src.is_signed() => ("ConvertSToF", false, true),
        ConversionKind::IntToFloat => ("ConvertUToF", false, true),
        ConversionKind::FloatNarrowing | ConversionKind::FloatToFloat => {
            if conv.rounding().is_explicit() {
                return None;
            }
            ("FConvert", false, false)
        }
    };

    let mut name = format!("{}{}_R{}", primitives.prefix(), op, conv.dst_type_name());
    if sat_suffix {
        name.push_str(conv.saturation().suffix());
    }
    if mode_suffix {
        name.push_str(conv.rounding().suffix());
    }
    Some(Primitive::Intrinsic(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use convgen_types::{RoundingMode, Saturation, ScalarType::*};

    fn intrinsic(conv: Conversion) -> Option<String> {
        match resolve(&conv, &PrimitiveSet::default()) {
            Some(Primitive::Intrinsic(name)) => Some(name),
            _ => None,
        }
    }

    fn conv(
        src: convgen_types::ScalarType,
        dst: convgen_types::ScalarType,
        width: VectorWidth,
        saturation: Saturation,
        rounding: RoundingMode,
    ) -> Conversion {
        Conversion::new(src, dst, width, saturation, rounding).unwrap()
    }

    #[test]
    fn float_to_int_carries_both_qualifiers() {
        let c = conv(Float, Int, VectorWidth::Scalar, Saturation::Saturating, RoundingMode::Rtz);
        assert_eq!(intrinsic(c).as_deref(), Some("__spirv_ConvertFToS_Rint_sat_rtz"));

        let c = conv(Double, UShort, VectorWidth::Four, Saturation::None, RoundingMode::Rtn);
        assert_eq!(intrinsic(c).as_deref(), Some("__spirv_ConvertFToU_Rushort4_rtn"));
    }

    #[test]
    fn int_to_float_carries_rounding() {
        let c = conv(UInt, Float, VectorWidth::Two, Saturation::None, RoundingMode::Rte);
        assert_eq!(intrinsic(c).as_deref(), Some("__spirv_ConvertUToF_Rfloat2_rte"));
    }

    #[test]
    fn saturating_sign_changes() {
        let c = conv(Int, UChar, VectorWidth::Scalar, Saturation::Saturating, RoundingMode::Default);
        assert_eq!(intrinsic(c).as_deref(), Some("__spirv_SatConvertSToU_Ruchar"));
        let c = conv(ULong, Char, VectorWidth::Two, Saturation::Saturating, RoundingMode::Default);
        assert_eq!(intrinsic(c).as_deref(), Some("__spirv_SatConvertUToS_Rchar2"));
        // no intrinsic clamps within one signedness
        let c = conv(Int, Char, VectorWidth::Scalar, Saturation::Saturating, RoundingMode::Default);
        assert_eq!(resolve(&c, &PrimitiveSet::default()), None);
    }

    #[test]
    fn plain_integer_conversions_follow_source_signedness() {
        let c = Conversion::plain(Char, UInt, VectorWidth::Scalar);
        assert_eq!(intrinsic(c).as_deref(), Some("__spirv_SConvert_Ruint"));
        let c = Conversion::plain(UShort, Long, VectorWidth::Four);
        assert_eq!(intrinsic(c).as_deref(), Some("__spirv_UConvert_Rlong4"));
        let c = Conversion::plain(Int, UInt, VectorWidth::Scalar);
        assert_eq!(resolve(&c, &PrimitiveSet::default()), None);
    }

    #[test]
    fn float_to_float() {
        let c = Conversion::plain(Float, Double, VectorWidth::Scalar);
        assert_eq!(intrinsic(c).as_deref(), Some("__spirv_FConvert_Rdouble"));
        let c = conv(Double, Float, VectorWidth::Scalar, Saturation::None, RoundingMode::Rtz);
        assert_eq!(resolve(&c, &PrimitiveSet::default()), None);
    }

    #[test]
    fn identity_is_a_pass_through_at_every_width() {
        for width in VectorWidth::ALL {
            let c = Conversion::plain(Short, Short, width);
            assert_eq!(resolve(&c, &PrimitiveSet::default()), Some(Primitive::PassThrough));
        }
        let c = conv(UInt, UInt, VectorWidth::Eight, Saturation::Saturating, RoundingMode::Default);
        assert_eq!(resolve(&c, &PrimitiveSet::default()), Some(Primitive::PassThrough));
    }

    #[test]
    fn uncovered_widths_have_no_primitive() {
        let c = Conversion::plain(Int, Float, VectorWidth::Three);
        assert_eq!(resolve(&c, &PrimitiveSet::default()), None);
        let c = Conversion::plain(Int, Float, VectorWidth::Sixteen);
        assert_eq!(resolve(&c, &PrimitiveSet::default()), None);

        let wide = PrimitiveSet::new("__clc_", VectorWidth::ALL);
        assert_eq!(
            resolve(&c, &wide),
            Some(Primitive::Intrinsic("__clc_ConvertSToF_Rfloat16".to_string()))
        );
    }
}
