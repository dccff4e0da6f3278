//! The synthesis engine: one definition per legal conversion tuple.

use std::fmt;

use convgen_types::{Catalog, Conversion, ConversionKind, WidthTable};

use crate::body::{saturate, Body};
use crate::error::{CodegenError, CodegenResult};
use crate::guard::{guard_for, Guard};
use crate::primitive::{resolve, Primitive, PrimitiveSet};

/// A generated conversion function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub conversion: Conversion,
    pub guard: Option<Guard>,
    pub body: Body,
}

impl Definition {
    /// Writes the function text, bracketed by its guard if it has one.
    pub fn render(&self, decorations: &[String], out: &mut impl fmt::Write) -> fmt::Result {
        if let Some(guard) = &self.guard {
            writeln!(out, "{}", guard.open)?;
        }
        if !decorations.is_empty() {
            writeln!(out, "{}", decorations.join(" "))?;
        }
        let conv = &self.conversion;
        writeln!(
            out,
            "{} {}({} x)",
            conv.dst_type_name(),
            conv.function_name(),
            conv.src_type_name()
        )?;
        writeln!(out, "{{")?;
        writeln!(out, "  return {};", self.body)?;
        writeln!(out, "}}")?;
        if let Some(guard) = &self.guard {
            writeln!(out, "{}", guard.close)?;
        }
        Ok(())
    }
}

/// How a conversion bottoms out, down to primitives and scalar casts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoweringTree {
    pub conversion: Conversion,
    pub body: Body,
    pub parts: Vec<LoweringTree>,
}

impl LoweringTree {
    /// Number of leaf operations (intrinsic calls and casts).
    pub fn leaves(&self) -> usize {
        if self.parts.is_empty() {
            1
        } else {
            self.parts.iter().map(LoweringTree::leaves).sum()
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{:indent$}{} = {}", "", self.conversion, self.body, indent = depth * 2)?;
        for part in &self.parts {
            part.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for LoweringTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// Drives generation over the configured catalog and width table.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    catalog: Catalog,
    widths: WidthTable,
    primitives: PrimitiveSet,
}

impl Synthesizer {
    pub fn new(catalog: Catalog, widths: WidthTable, primitives: PrimitiveSet) -> Self {
        Synthesizer {
            catalog,
            widths,
            primitives,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn widths(&self) -> &WidthTable {
        &self.widths
    }

    pub fn primitives(&self) -> &PrimitiveSet {
        &self.primitives
    }

    /// Every legal tuple, in emission order.
    pub fn conversions(&self) -> impl Iterator<Item = Conversion> + '_ {
        Conversion::enumerate(&self.catalog, &self.widths)
    }

    /// Picks the body of the function implementing `conv`.
    pub fn lower(&self, conv: &Conversion) -> CodegenResult<Body> {
        match resolve(conv, &self.primitives) {
            Some(Primitive::Intrinsic(callee)) => return Ok(Body::Call { callee }),
            Some(Primitive::PassThrough) => {
                return Ok(Body::PassThrough {
                    ty: conv.dst_type_name(),
                })
            }
            None => {}
        }

        let Some(split) = conv.width().split() else {
            return scalar_fallback(conv);
        };
        for part in [split.low, split.high] {
            if !self.widths.contains(part) {
                return Err(CodegenError::MissingWidth {
                    signature: conv.signature(),
                    width: part,
                });
            }
        }
        Ok(Body::Concat {
            ty: conv.dst_type_name(),
            low: conv.with_width(split.low),
            low_slice: split.low_slice,
            high: conv.with_width(split.high),
            high_slice: split.high_slice,
        })
    }

    /// The full definition of `conv`, guard included.
    pub fn define(&self, conv: Conversion) -> CodegenResult<Definition> {
        let guard = guard_for(conv.src(), conv.dst());
        let body = self.lower(&conv)?;
        log::trace!("{conv}: {body}");
        Ok(Definition {
            conversion: conv,
            guard,
            body,
        })
    }

    /// Definitions for every legal tuple. Stops at the first defect.
    pub fn definitions(&self) -> CodegenResult<Vec<Definition>> {
        let definitions = self
            .conversions()
            .map(|conv| self.define(conv))
            .collect::<CodegenResult<Vec<_>>>()?;

        log::debug!(
            "Synthesized {} definitions ({} primitive, {} decomposed)",
            definitions.len(),
            definitions.iter().filter(|def| def.body.is_primitive()).count(),
            definitions
                .iter()
                .filter(|def| matches!(def.body, Body::Concat { .. }))
                .count(),
        );
        Ok(definitions)
    }

    /// Follows the decomposition of `conv` all the way down.
    pub fn explain(&self, conv: Conversion) -> CodegenResult<LoweringTree> {
        let body = self.lower(&conv)?;
        let parts = match &body {
            Body::Concat { low, high, .. } => vec![self.explain(*low)?, self.explain(*high)?],
            _ => Vec::new(),
        };
        Ok(LoweringTree {
            conversion: conv,
            body,
            parts,
        })
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Synthesizer::new(Catalog::full(), WidthTable::full(), PrimitiveSet::default())
    }
}

/// Body of a scalar conversion with no intrinsic.
fn scalar_fallback(conv: &Conversion) -> CodegenResult<Body> {
    let (src, dst) = (conv.src(), conv.dst());
    match conv.kind() {
        ConversionKind::IntToInt if conv.saturation().is_saturating() => Ok(saturate(src, dst)),
        ConversionKind::IntToInt if src.bits() == dst.bits() => Ok(Body::Reinterpret { ty: dst }),
        ConversionKind::IntToInt
        | ConversionKind::FloatNarrowing
        | ConversionKind::FloatToFloat => Ok(Body::Cast { ty: dst }),
        ConversionKind::FloatToInt | ConversionKind::IntToFloat => {
            if conv.saturation().is_saturating() || conv.rounding().is_explicit() {
                return Err(CodegenError::NoLowering {
                    signature: conv.signature(),
                    reason: format!(
                        "a plain cast cannot express {} with {}",
                        conv.saturation(),
                        conv.rounding()
                    ),
                });
            }
            Ok(Body::Cast { ty: dst })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convgen_types::{RoundingMode, Saturation, ScalarType::*, VectorWidth};

    #[test]
    fn scalar_reinterpretation() {
        let synth = Synthesizer::default();
        let body = synth.lower(&Conversion::plain(UShort, Short, VectorWidth::Scalar)).unwrap();
        assert_eq!(body.to_string(), "as_short(x)");
    }

    #[test]
    fn vector_without_primitive_decomposes_into_halves() {
        let synth = Synthesizer::default();
        let conv = Conversion::plain(Int, Float, VectorWidth::Sixteen);
        let body = synth.lower(&conv).unwrap();
        assert_eq!(
            body.to_string(),
            "(float16)(convert_float8(x.lo), convert_float8(x.hi))"
        );
        assert_eq!(body.calls(), ["convert_float8", "convert_float8"]);
    }

    #[test]
    fn explain_reaches_primitives() {
        let synth = Synthesizer::default();
        let conv = Conversion::plain(Int, Float, VectorWidth::Sixteen);
        let tree = synth.explain(conv).unwrap();
        // 16 -> 8 + 8 -> (4 + 4) x 2, and width 4 has an intrinsic
        assert_eq!(tree.leaves(), 4);
        assert!(tree.parts[0].parts.iter().all(|part| part.body.is_primitive()));
    }

    #[test]
    fn missing_scalar_primitive_is_a_defect() {
        let synth = Synthesizer::new(
            Catalog::full(),
            WidthTable::full(),
            PrimitiveSet::new("__spirv_", [VectorWidth::Four]),
        );
        let conv = Conversion::new(
            Float,
            Int,
            VectorWidth::Two,
            Saturation::Saturating,
            RoundingMode::Default,
        )
        .unwrap();
        // width 2 decomposes fine; the scalar half cannot be lowered
        assert!(synth.lower(&conv).is_ok());
        let err = synth.explain(conv).unwrap_err();
        assert!(matches!(err, CodegenError::NoLowering { .. }), "{err:?}");
        assert!(synth.definitions().is_err());
    }

    #[test]
    fn narrowing_float_rounding_falls_back_to_a_cast() {
        let synth = Synthesizer::default();
        let conv = Conversion::new(
            Double,
            Float,
            VectorWidth::Scalar,
            Saturation::None,
            RoundingMode::Rtp,
        )
        .unwrap();
        assert_eq!(synth.lower(&conv).unwrap(), Body::Cast { ty: Float });
    }
}
