use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::AcroError;
use crate::AcroResult;
use crate::DEFAULT_MARKER;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["acrotex.toml", ".acrotex.toml", ".config/acrotex.toml"];

/// How to treat a key that is declared by more than one
/// `\DeclareAcronym` block.
#[derive(Debug, Clone, Copy, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
	/// Keep the last declaration and record a diagnostic.
	#[default]
	LastWins,
	/// Refuse to load the definitions.
	Error,
}

/// Configuration loaded from an `acrotex.toml` file.
///
/// ```toml
/// acronyms = "tex/acronyms.tex"
/// marker = "\\printacronyms[include=abbrev, heading=none]"
/// duplicates = "error"
/// ```
#[derive(Debug, Deserialize)]
pub struct AcroConfig {
	/// Definitions file used when `--acronyms` isn't passed. Relative paths
	/// resolve against the project root.
	#[serde(default)]
	pub acronyms: Option<PathBuf>,
	/// Placeholder replaced by the listing of used acronyms.
	#[serde(default = "default_marker")]
	pub marker: String,
	/// Duplicate key handling.
	#[serde(default)]
	pub duplicates: DuplicatePolicy,
}

impl Default for AcroConfig {
	fn default() -> Self {
		Self {
			acronyms: None,
			marker: default_marker(),
			duplicates: DuplicatePolicy::default(),
		}
	}
}

fn default_marker() -> String {
	DEFAULT_MARKER.to_string()
}

impl AcroConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> AcroResult<Option<AcroConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: AcroConfig =
			toml::from_str(&content).map_err(|e| AcroError::ConfigParse(e.to_string()))?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Load the config at `root`, falling back to defaults when no file
	/// exists.
	pub fn load_or_default(root: &Path) -> AcroResult<AcroConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	/// The configured definitions file resolved against `root`.
	pub fn acronyms_path(&self, root: &Path) -> Option<PathBuf> {
		self.acronyms.as_ref().map(|path| {
			if path.is_absolute() {
				path.clone()
			} else {
				root.join(path)
			}
		})
	}
}
