//! Rendering of the complete conversion library.

use std::fmt::Write;

use convgen_types::Extension;

use crate::error::CodegenResult;
use crate::synth::Synthesizer;

pub const DEFAULT_HEADER: &str = "\
/* !!!! AUTOGENERATED FILE generated by convgen !!!!!

   DON'T CHANGE THIS FILE. MAKE YOUR CHANGES TO THE GENERATOR AND RUN:
   $ convgen generate --output <this file>

   OpenCL type conversion functions

   Permission is hereby granted, free of charge, to any person obtaining a copy
   of this software and associated documentation files (the \"Software\"), to deal
   in the Software without restriction, including without limitation the rights
   to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
   copies of the Software, and to permit persons to whom the Software is
   furnished to do so, subject to the following conditions:

   The above copyright notice and this permission notice shall be included in
   all copies or substantial portions of the Software.

   THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
   IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
   FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
   AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
   LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
   OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
   THE SOFTWARE.
*/
";

pub const DEFAULT_INCLUDES: [&str; 2] = ["clc/clc.h", "spirv/spirv.h"];

pub const DEFAULT_DECORATIONS: [&str; 2] = ["_CLC_DEF", "_CLC_OVERLOAD"];

const FP64_PRELUDE: &str = "\
#ifdef cl_khr_fp64
#pragma OPENCL EXTENSION cl_khr_fp64 : enable

#if defined(__EMBEDDED_PROFILE__) && !defined(cles_khr_int64)
#error Embedded profile that supports cl_khr_fp64 also has to support cles_khr_int64
#endif

#endif
";

const INT64_PRELUDE: &str = "\
#ifdef cles_khr_int64
#pragma OPENCL EXTENSION cles_khr_int64 : enable
#endif
";

/// Text surrounding the generated definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactOptions {
    /// Leading comment block, emitted verbatim.
    pub header: String,
    /// Headers pulled in with `#include <...>`.
    pub includes: Vec<String>,
    /// Qualifiers placed on the line before each signature.
    pub decorations: Vec<String>,
}

impl Default for ArtifactOptions {
    fn default() -> Self {
        ArtifactOptions {
            header: DEFAULT_HEADER.to_string(),
            includes: DEFAULT_INCLUDES.iter().map(|s| s.to_string()).collect(),
            decorations: DEFAULT_DECORATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Renders the whole library into memory.
///
/// Nothing is returned unless every definition could be synthesized, so a
/// caller never sees a truncated library.
pub fn render_artifact(synth: &Synthesizer, options: &ArtifactOptions) -> CodegenResult<String> {
    let definitions = synth.definitions()?;

    let mut out = String::new();
    out.push_str(&options.header);
    if !options.header.is_empty() && !options.header.ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');

    for include in &options.includes {
        writeln!(out, "#include <{include}>")?;
    }
    if !options.includes.is_empty() {
        out.push('\n');
    }

    if synth.catalog().requires(Extension::Fp64) {
        out.push_str(FP64_PRELUDE);
        out.push('\n');
    }
    if synth.catalog().requires(Extension::Int64) {
        out.push_str(INT64_PRELUDE);
        out.push('\n');
    }

    for definition in &definitions {
        definition.render(&options.decorations, &mut out)?;
    }

    log::info!(
        "Rendered {} conversion functions ({} bytes)",
        definitions.len(),
        out.len()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use convgen_types::{Catalog, ScalarType, VectorWidth, WidthTable};
    use crate::primitive::PrimitiveSet;

    fn tiny(types: &[ScalarType]) -> Synthesizer {
        Synthesizer::new(
            Catalog::from_types(types.iter().copied()).unwrap(),
            WidthTable::from_widths([VectorWidth::Scalar]).unwrap(),
            PrimitiveSet::default(),
        )
    }

    #[test]
    fn preludes_follow_the_catalog() {
        let options = ArtifactOptions::default();

        let text = render_artifact(&tiny(&[ScalarType::Int]), &options).unwrap();
        assert!(!text.contains("cl_khr_fp64"));
        assert!(!text.contains("cles_khr_int64"));

        let text = render_artifact(&tiny(&[ScalarType::Double]), &options).unwrap();
        assert!(text.contains("#pragma OPENCL EXTENSION cl_khr_fp64 : enable"));
        assert!(!text.contains("#pragma OPENCL EXTENSION cles_khr_int64 : enable"));

        let text = render_artifact(&tiny(&[ScalarType::Long]), &options).unwrap();
        assert!(text.contains("#pragma OPENCL EXTENSION cles_khr_int64 : enable"));
    }

    #[test]
    fn layout_without_header_or_includes() {
        let options = ArtifactOptions {
            header: String::new(),
            includes: Vec::new(),
            decorations: vec!["inline".to_string()],
        };
        let text = render_artifact(&tiny(&[ScalarType::Int]), &options).unwrap();
        expect_test::expect![[r#"

            inline
            int convert_int(int x)
            {
              return (int)(x);
            }
            inline
            int convert_int_sat(int x)
            {
              return (int)(x);
            }
        "#]]
        .assert_eq(&text);
    }
}
