use crate::config::GeneratorConfig;
use crate::error::CliError;
use crate::io::write_stdout;
use std::fmt::Write;
use std::path::PathBuf;

pub fn handle_list(config: Option<PathBuf>, filter: Option<String>) -> Result<(), CliError> {
    let (config, base) = GeneratorConfig::load(config.as_deref())?;
    let setup = config.setup(&base)?;

    let mut listing = String::new();
    let mut count = 0;
    for conv in setup.synthesizer.conversions() {
        let signature = conv.signature();
        if filter.as_deref().is_some_and(|f| !signature.contains(f)) {
            continue;
        }
        // Writing to a String cannot fail
        let _ = writeln!(listing, "{} {}", conv.dst_type_name(), signature);
        count += 1;
    }
    log::info!("{count} conversions listed");
    write_stdout(&listing)
}
