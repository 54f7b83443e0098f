use serde::Deserialize;
use serde::Serialize;

use crate::Classification;

pub const DEFAULT_KEYWORD_CLASS: &str = "hljs-keyword";
pub const DEFAULT_VARIABLE_CLASS: &str = "hljs-variable";
pub const DEFAULT_NUMBER_CLASS: &str = "hljs-number";

/// Maps a [`Classification`] to the class carried by the wrapping span.
///
/// ```toml
/// [styles]
/// keyword = "hljs-keyword"
/// variable = "hljs-variable"
/// number = "hljs-number"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleMap {
	pub keyword: String,
	pub variable: String,
	pub number: String,
}

impl Default for StyleMap {
	fn default() -> Self {
		Self {
			keyword: DEFAULT_KEYWORD_CLASS.to_string(),
			variable: DEFAULT_VARIABLE_CLASS.to_string(),
			number: DEFAULT_NUMBER_CLASS.to_string(),
		}
	}
}

impl StyleMap {
	/// The style class for a classification. `Plain` never has one.
	pub fn class_for(&self, classification: Classification) -> Option<&str> {
		match classification {
			Classification::Keyword => Some(&self.keyword),
			Classification::Variable => Some(&self.variable),
			Classification::Number => Some(&self.number),
			Classification::Plain => None,
		}
	}
}
