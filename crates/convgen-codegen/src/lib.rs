//! Conversion rule resolution and code synthesis.
//!
//! For every legal [`Conversion`](convgen_types::Conversion) the
//! [`Synthesizer`] decides how the generated function is implemented:
//! - a single intrinsic call, when [`primitive::resolve`] finds one;
//! - a scalar cast, reinterpretation or clamp when it does not and the
//!   conversion is scalar;
//! - otherwise a concatenation of the same conversion at the two narrower
//!   widths given by [`VectorWidth::split`](convgen_types::VectorWidth::split).
//!
//! [`guard::guard_for`] decides which definitions sit behind an extension
//! check, and [`emit::render_artifact`] assembles the final library text.

pub mod body;
pub mod emit;
mod error;
pub mod guard;
pub mod primitive;
pub mod synth;
pub mod verify;

pub use body::Body;
pub use emit::{render_artifact, ArtifactOptions};
pub use error::{CodegenError, CodegenResult};
pub use guard::{guard_for, Guard};
pub use primitive::{resolve, Primitive, PrimitiveSet};
pub use synth::{Definition, LoweringTree, Synthesizer};
pub use verify::{verify_artifact, verify_definitions, ArtifactSummary};
