use crate::config::GeneratorConfig;
use crate::error::CliError;
use crate::io::read_file;
use convgen_codegen::{render_artifact, verify_artifact, verify_definitions};
use std::path::PathBuf;

/// Validates the configuration and, if given, an already generated library.
pub fn handle_check(config: Option<PathBuf>, artifact: Option<PathBuf>) -> Result<(), CliError> {
    let (config, base) = GeneratorConfig::load(config.as_deref())?;
    let setup = config.setup(&base)?;

    let definitions = setup.synthesizer.definitions()?;
    verify_definitions(&definitions)?;
    println!("Configuration OK: {} conversion functions", definitions.len());

    let Some(path) = artifact else {
        return Ok(());
    };
    let existing = read_file(&path)?;
    let summary = verify_artifact(&existing)?;
    let expected = render_artifact(&setup.synthesizer, &setup.options)?;
    if existing != expected {
        log::warn!(
            "{} has {} functions, the generator produces {}",
            path.display(),
            summary.functions,
            definitions.len()
        );
        return Err(CliError::StaleArtifact { path });
    }
    println!(
        "{} is up to date: {} functions, {} guarded",
        path.display(),
        summary.functions,
        summary.guarded
    );
    Ok(())
}
