//! Structural checks on synthesized definitions and rendered libraries.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::body::Body;
use crate::error::{CodegenError, CodegenResult};
use crate::synth::Definition;

lazy_static! {
    static ref SIGNATURE: Regex =
        Regex::new(r"^(?P<ret>\w+) (?P<name>convert_\w+)\((?P<param>\w+) x\)$").unwrap();
    static ref OPEN_DIRECTIVE: Regex = Regex::new(r"^#\s*if(def|ndef)?\b").unwrap();
    static ref CLOSE_DIRECTIVE: Regex = Regex::new(r"^#\s*endif\b").unwrap();
}

/// What [`verify_artifact`] found in a rendered library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArtifactSummary {
    /// Number of conversion functions defined.
    pub functions: usize,
    /// Functions defined inside a conditional block.
    pub guarded: usize,
}

/// Checks signature uniqueness and decomposition shape of `definitions`.
pub fn verify_definitions(definitions: &[Definition]) -> CodegenResult<()> {
    let mut seen = HashSet::new();
    for definition in definitions {
        let conv = &definition.conversion;
        if !seen.insert(conv.signature()) {
            return Err(CodegenError::DuplicateSignature(conv.signature()));
        }

        if let Some(split) = conv.width().split() {
            if let Body::Concat { .. } = definition.body {
                let expected = vec![
                    conv.with_width(split.low).function_name(),
                    conv.with_width(split.high).function_name(),
                ];
                let found = definition.body.calls();
                if found != expected {
                    return Err(CodegenError::BadDecomposition {
                        signature: conv.signature(),
                        expected,
                        found,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Checks a rendered library line by line.
///
/// Every conditional must be closed, no definition may cross a directive,
/// and every (name, parameter type) signature must appear once.
pub fn verify_artifact(text: &str) -> CodegenResult<ArtifactSummary> {
    let mut summary = ArtifactSummary::default();
    let mut depth: usize = 0;
    let mut open_at: Vec<usize> = Vec::new();
    let mut seen = HashSet::new();
    // (signature, line) of the definition being scanned
    let mut current: Option<(String, usize)> = None;
    let mut in_comment = false;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();

        if in_comment {
            in_comment = !trimmed.contains("*/");
            continue;
        }
        if trimmed.starts_with("/*") {
            in_comment = !trimmed.contains("*/");
            continue;
        }

        let is_open = OPEN_DIRECTIVE.is_match(trimmed);
        let is_close = CLOSE_DIRECTIVE.is_match(trimmed);
        if is_open || is_close {
            if let Some((signature, line)) = current.take() {
                return Err(CodegenError::StraddlingDefinition { signature, line });
            }
        }
        if is_open {
            depth += 1;
            open_at.push(line_no);
            continue;
        }
        if is_close {
            if depth == 0 {
                return Err(CodegenError::UnbalancedGuard {
                    line: line_no,
                    message: "#endif without a matching #if".to_string(),
                });
            }
            depth -= 1;
            open_at.pop();
            continue;
        }

        if let Some(caps) = SIGNATURE.captures(trimmed) {
            let signature = format!("{}({})", &caps["name"], &caps["param"]);
            if !seen.insert(signature.clone()) {
                return Err(CodegenError::DuplicateSignature(signature));
            }
            summary.functions += 1;
            if depth > 0 {
                summary.guarded += 1;
            }
            current = Some((signature, line_no));
        } else if trimmed == "}" {
            current = None;
        }
    }

    if let Some(line) = open_at.pop() {
        return Err(CodegenError::UnbalancedGuard {
            line,
            message: "conditional is never closed".to_string(),
        });
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUARDED: &str = "\
#ifdef cl_khr_fp64
_CLC_DEF _CLC_OVERLOAD
double convert_double(int x)
{
  return __spirv_ConvertSToF_Rdouble(x);
}
#endif
_CLC_DEF _CLC_OVERLOAD
int convert_int(float x)
{
  return __spirv_ConvertFToS_Rint(x);
}
";

    #[test]
    fn counts_guarded_functions() {
        let summary = verify_artifact(GUARDED).unwrap();
        assert_eq!(
            summary,
            ArtifactSummary {
                functions: 2,
                guarded: 1
            }
        );
    }

    #[test]
    fn comments_are_skipped() {
        let text = format!("/* #if inside a comment\n   #endif */\n{GUARDED}");
        assert_eq!(verify_artifact(&text).unwrap().functions, 2);
    }

    #[test]
    fn rejects_unclosed_guard() {
        let text = GUARDED.replacen("#endif\n", "", 1);
        let err = verify_artifact(&text).unwrap_err();
        assert!(matches!(err, CodegenError::UnbalancedGuard { line: 1, .. }), "{err:?}");
    }

    #[test]
    fn rejects_stray_endif() {
        let text = format!("{GUARDED}#endif\n");
        assert!(matches!(
            verify_artifact(&text),
            Err(CodegenError::UnbalancedGuard { line: 13, .. })
        ));
    }

    #[test]
    fn rejects_definition_crossing_a_directive() {
        let text = GUARDED.replace("  return __spirv_ConvertFToS_Rint(x);\n", "#endif\n");
        assert!(matches!(
            verify_artifact(&text),
            Err(CodegenError::StraddlingDefinition { line: 9, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_signatures() {
        let text = format!("{GUARDED}{}", &GUARDED[GUARDED.find("_CLC_DEF _CLC_OVERLOAD\nint").unwrap()..]);
        let err = verify_artifact(&text).unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateSignature(ref s) if s == "convert_int(float)"));
    }
}
