//! Conditional-compilation guards for extension-dependent conversions.

use convgen_types::{Extension, ScalarType};

/// Open/close directive pair bracketing one definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guard {
    pub extension: Extension,
    pub open: &'static str,
    pub close: &'static str,
}

pub const FP64_GUARD: Guard = Guard {
    extension: Extension::Fp64,
    open: "#ifdef cl_khr_fp64",
    close: "#endif",
};

pub const INT64_GUARD: Guard = Guard {
    extension: Extension::Int64,
    open: "#if defined cles_khr_int64 || !defined(__EMBEDDED_PROFILE__)",
    close: "#endif",
};

impl Guard {
    pub fn for_extension(extension: Extension) -> Guard {
        match extension {
            Extension::Fp64 => FP64_GUARD,
            Extension::Int64 => INT64_GUARD,
        }
    }
}

/// The guard a conversion between `src` and `dst` needs, if any.
///
/// At most one guard is ever returned. fp64 takes precedence over int64:
/// the library prelude rejects fp64 without int64, so the fp64 guard alone
/// is enough when the two types need different extensions.
pub fn guard_for(src: ScalarType, dst: ScalarType) -> Option<Guard> {
    [src.extension(), dst.extension()]
        .into_iter()
        .flatten()
        .min()
        .map(Guard::for_extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ScalarType::*;

    #[test]
    fn unguarded_types() {
        assert_eq!(guard_for(Int, Float), None);
        assert_eq!(guard_for(UChar, Char), None);
    }

    #[test]
    fn single_guard_when_both_need_the_same_extension() {
        assert_eq!(guard_for(Double, Double), Some(FP64_GUARD));
        assert_eq!(guard_for(Long, ULong), Some(INT64_GUARD));
    }

    #[test]
    fn either_side_triggers_the_guard() {
        assert_eq!(guard_for(Float, Double), Some(FP64_GUARD));
        assert_eq!(guard_for(Double, Int), Some(FP64_GUARD));
        assert_eq!(guard_for(Long, Short), Some(INT64_GUARD));
        assert_eq!(guard_for(Char, ULong), Some(INT64_GUARD));
    }

    #[test]
    fn fp64_wins_over_int64() {
        assert_eq!(guard_for(Long, Double), Some(FP64_GUARD));
        assert_eq!(guard_for(Double, ULong), Some(FP64_GUARD));
    }
}
