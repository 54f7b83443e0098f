use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::Classifier;
use crate::HlError;
use crate::HlResult;
use crate::NumberSeparator;
use crate::SlideshowConfig;
use crate::StyleMap;
use crate::highlighter::DEFAULT_BASE_CLASS;
use crate::scan::DEFAULT_MARKER_CLASS;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["hlcode.toml", ".hlcode.toml", ".config/hlcode.toml"];

/// Configuration loaded from an `hlcode.toml` file.
///
/// ```toml
/// marker_class = "highlight"
/// base_class = "hljs"
///
/// [classifier]
/// number_separator = "literal"
///
/// [styles]
/// keyword = "hljs-keyword"
/// variable = "hljs-variable"
/// number = "hljs-number"
///
/// [slideshow]
/// width = 1152
/// height = 864
/// transition = "convex"
///
/// [deck]
/// title = "Slides"
/// stylesheets = ["reveal.css", "theme.css"]
/// scripts = ["reveal.js", "highlight.js"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HlConfig {
	/// Class marking an element as processed by a scan.
	pub marker_class: String,
	/// Class the block highlighter applies. Removed again from table cell
	/// code.
	pub base_class: String,
	pub classifier: ClassifierConfig,
	pub styles: StyleMap,
	pub slideshow: SlideshowConfig,
	pub deck: DeckConfig,
}

impl Default for HlConfig {
	fn default() -> Self {
		Self {
			marker_class: DEFAULT_MARKER_CLASS.to_string(),
			base_class: DEFAULT_BASE_CLASS.to_string(),
			classifier: ClassifierConfig::default(),
			styles: StyleMap::default(),
			slideshow: SlideshowConfig::default(),
			deck: DeckConfig::default(),
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
	/// `literal` only accepts `.` between the digits of a number. `any_char`
	/// accepts any single character there.
	pub number_separator: NumberSeparator,
}

impl ClassifierConfig {
	pub fn classifier(self) -> Classifier {
		Classifier::new(self.number_separator)
	}
}

/// Page level settings for rendered decks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
	pub title: String,
	/// Stylesheet URLs linked from the page head.
	pub stylesheets: Vec<String>,
	/// Script URLs loaded before the slideshow is initialized. These are
	/// expected to provide the slideshow engine and the block highlighter.
	pub scripts: Vec<String>,
}

impl Default for DeckConfig {
	fn default() -> Self {
		Self {
			title: String::from("Slides"),
			stylesheets: vec![],
			scripts: vec![],
		}
	}
}

impl HlConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> HlResult<Option<HlConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			debug!(root = %root.display(), "no config file found");
			return Ok(None);
		};

		debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;

		Ok(Some(config))
	}

	/// Load the config at `root`, falling back to the defaults.
	pub fn load_or_default(root: &Path) -> HlResult<HlConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	pub fn parse(content: &str) -> HlResult<HlConfig> {
		toml::from_str(content).map_err(|e| HlError::ConfigParse(e.to_string()))
	}
}
