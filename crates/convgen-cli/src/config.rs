use std::path::{Path, PathBuf};

use convgen_codegen::primitive::DEFAULT_PREFIX;
use convgen_codegen::{ArtifactOptions, PrimitiveSet, Synthesizer};
use convgen_types::{Catalog, ScalarType, VectorWidth, WidthTable};
use serde::Deserialize;

use crate::error::{convert_toml_error, CliError};
use crate::io::read_file;

/// Name of the configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "convgen.toml";

/// Contents of a `convgen.toml` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub catalog: CatalogSection,

    #[serde(default)]
    pub primitives: PrimitiveSection,

    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSection {
    /// Scalar types to generate conversions between
    #[serde(default)]
    pub types: Option<Vec<ScalarType>>,

    /// Vector widths to generate, `""` being the scalar width
    #[serde(default)]
    pub widths: Option<Vec<VectorWidth>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrimitiveSection {
    /// Name prefix of the conversion intrinsics
    #[serde(default)]
    pub prefix: Option<String>,

    /// Widths at which intrinsics exist
    #[serde(default)]
    pub widths: Option<Vec<VectorWidth>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Where `generate` writes when no `--output` is given
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// File whose text replaces the built-in header comment
    #[serde(default)]
    pub header: Option<PathBuf>,

    #[serde(default)]
    pub includes: Option<Vec<String>>,

    #[serde(default)]
    pub decorations: Option<Vec<String>>,
}

/// Everything a command needs, resolved from a configuration.
#[derive(Debug, Clone)]
pub struct Setup {
    pub synthesizer: Synthesizer,
    pub options: ArtifactOptions,
    pub output: Option<PathBuf>,
}

impl GeneratorConfig {
    pub fn from_toml(source: &str, path: &Path) -> Result<Self, CliError> {
        toml::from_str(source).map_err(|e| convert_toml_error(e, path, source))
    }

    /// Loads the configuration named on the command line, or `convgen.toml`
    /// from the working directory if present, or the defaults.
    ///
    /// Returns the configuration and the directory relative paths in it
    /// are resolved against.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, PathBuf), CliError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = PathBuf::from(DEFAULT_CONFIG_NAME);
                if !candidate.is_file() {
                    log::debug!("No {DEFAULT_CONFIG_NAME} found, using built-in defaults");
                    return Ok((GeneratorConfig::default(), PathBuf::from(".")));
                }
                candidate
            }
        };

        log::info!("Loading configuration from {}", path.display());
        let source = read_file(&path)?;
        let config = GeneratorConfig::from_toml(&source, &path)?;
        let base = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok((config, base))
    }

    /// Validates the tables and builds the generator.
    pub fn setup(&self, base: &Path) -> Result<Setup, CliError> {
        let catalog = match &self.catalog.types {
            Some(types) => Catalog::from_types(types.iter().copied())?,
            None => Catalog::full(),
        };
        let widths = match &self.catalog.widths {
            Some(widths) => WidthTable::from_widths(widths.iter().copied())?,
            None => WidthTable::full(),
        };
        let primitives = match (&self.primitives.prefix, &self.primitives.widths) {
            (None, None) => PrimitiveSet::default(),
            (prefix, widths) => PrimitiveSet::new(
                prefix.as_deref().unwrap_or(DEFAULT_PREFIX),
                widths
                    .clone()
                    .unwrap_or_else(|| PrimitiveSet::default().widths().to_vec()),
            ),
        };

        let mut options = ArtifactOptions::default();
        if let Some(header) = &self.output.header {
            options.header = read_file(&base.join(header))?;
        }
        if let Some(includes) = &self.output.includes {
            options.includes = includes.clone();
        }
        if let Some(decorations) = &self.output.decorations {
            options.decorations = decorations.clone();
        }

        log::debug!(
            "Generator setup: {} types, {} widths, intrinsics at {:?}",
            catalog.types().len(),
            widths.widths().len(),
            primitives.widths()
        );
        Ok(Setup {
            synthesizer: Synthesizer::new(catalog, widths, primitives),
            options,
            output: self.output.path.as_ref().map(|path| base.join(path)),
        })
    }
}
