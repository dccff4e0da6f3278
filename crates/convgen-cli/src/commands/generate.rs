use crate::config::GeneratorConfig;
use crate::error::CliError;
use crate::io::{write_atomic, write_stdout};
use convgen_codegen::{render_artifact, verify_artifact};
use std::path::PathBuf;

pub fn handle_generate(config: Option<PathBuf>, output: Option<PathBuf>) -> Result<(), CliError> {
    let (config, base) = GeneratorConfig::load(config.as_deref())?;
    let setup = config.setup(&base)?;

    // Render everything before touching the destination.
    let text = render_artifact(&setup.synthesizer, &setup.options)?;
    let summary = verify_artifact(&text)?;

    match output.or(setup.output) {
        Some(path) => {
            write_atomic(&path, &text)?;
            log::info!(
                "Wrote {} conversion functions ({} guarded) to {}",
                summary.functions,
                summary.guarded,
                path.display()
            );
        }
        None => write_stdout(&text)?,
    }
    Ok(())
}
