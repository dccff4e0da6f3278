use crate::config::GeneratorConfig;
use crate::error::CliError;
use crate::io::write_stdout;
use convgen_types::ScalarType;
use std::path::PathBuf;

/// Prints how `name(from x)` is lowered, down to intrinsics and casts.
pub fn handle_explain(config: Option<PathBuf>, name: String, from: ScalarType) -> Result<(), CliError> {
    let (config, base) = GeneratorConfig::load(config.as_deref())?;
    let setup = config.setup(&base)?;
    let synth = &setup.synthesizer;

    let conv = synth
        .conversions()
        .find(|conv| conv.function_name() == name && conv.src() == from)
        .ok_or_else(|| CliError::unknown_conversion(&name, from))?;

    let tree = synth.explain(conv)?;
    log::debug!("{conv} lowers to {} leaf operations", tree.leaves());
    write_stdout(&tree.to_string())
}
