//! Return expressions of generated conversion functions.

use std::fmt;

use convgen_types::{Conversion, ScalarType};

/// The expression a generated function returns, always in terms of `x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// `<callee>(x)`
    Call { callee: String },
    /// `(<ty>)(x)` where `ty` is also the type of `x`.
    PassThrough { ty: String },
    /// `(<ty>)(x)`, a scalar numeric conversion.
    Cast { ty: ScalarType },
    /// `as_<ty>(x)`, same-width signed/unsigned reinterpretation.
    Reinterpret { ty: ScalarType },
    /// Clamp in the source type, then cast.
    Clamp {
        ty: ScalarType,
        src: ScalarType,
        min: Option<&'static str>,
        max: Option<&'static str>,
    },
    /// Build the result from two narrower conversions of slices of `x`.
    Concat {
        ty: String,
        low: Conversion,
        low_slice: &'static str,
        high: Conversion,
        high_slice: &'static str,
    },
}

impl Body {
    /// Conversion functions this body calls, in call order.
    pub fn calls(&self) -> Vec<String> {
        match self {
            Body::Concat { low, high, .. } => vec![low.function_name(), high.function_name()],
            _ => Vec::new(),
        }
    }

    /// Returns `true` if this body is a single intrinsic call.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Body::Call { .. })
    }
}

/// Saturating integer conversion without an intrinsic.
///
/// Only the bounds the source range can actually exceed are clamped; a
/// conversion that can never go out of range is a plain cast.
pub fn saturate(src: ScalarType, dst: ScalarType) -> Body {
    let narrower = dst.bits() < src.bits();
    let (exceeds_max, exceeds_min) = match (src.is_signed(), dst.is_signed()) {
        (true, true) | (false, false) => (narrower, narrower && src.is_signed()),
        (true, false) => (narrower, true),
        (false, true) => (dst.bits() <= src.bits(), false),
    };
    if !exceeds_max && !exceeds_min {
        return Body::Cast { ty: dst };
    }
    Body::Clamp {
        ty: dst,
        src,
        min: exceeds_min.then(|| dst.limit_min()),
        max: exceeds_max.then(|| dst.limit_max()),
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Call { callee } => write!(f, "{callee}(x)"),
            Body::PassThrough { ty } => write!(f, "({ty})(x)"),
            Body::Cast { ty } => write!(f, "({ty})(x)"),
            Body::Reinterpret { ty } => write!(f, "as_{ty}(x)"),
            Body::Clamp { ty, src, min, max } => match (min, max) {
                (Some(min), Some(max)) => {
                    write!(f, "({ty})(clamp(x, ({src}){min}, ({src}){max}))")
                }
                (None, Some(max)) => write!(f, "({ty})(min(x, ({src}){max}))"),
                (Some(min), None) => write!(f, "({ty})(max(x, ({src}){min}))"),
                (None, None) => write!(f, "({ty})(x)"),
            },
            Body::Concat {
                ty,
                low,
                low_slice,
                high,
                high_slice,
            } => write!(
                f,
                "({ty})({}(x.{low_slice}), {}(x.{high_slice}))",
                low.function_name(),
                high.function_name()
            ),
        }
    }
}
