use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::HlError;
use crate::HlResult;

/// Options handed to the slideshow engine when the deck starts.
///
/// Serialized with the engine's camelCase keys. The config file may use
/// either spelling.
///
/// ```toml
/// [slideshow]
/// width = 1152
/// height = 864
/// margin = 0.1
/// min_scale = 0.1
/// max_scale = 1.0
/// transition = "convex"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlideshowConfig {
	pub width: u32,
	pub height: u32,
	pub margin: f64,
	#[serde(alias = "min_scale")]
	pub min_scale: f64,
	#[serde(alias = "max_scale")]
	pub max_scale: f64,
	pub transition: Transition,
}

impl Default for SlideshowConfig {
	fn default() -> Self {
		Self {
			width: 1152,
			height: 864,
			margin: 0.1,
			min_scale: 0.1,
			max_scale: 1.0,
			transition: Transition::Convex,
		}
	}
}

impl SlideshowConfig {
	/// The options as a JSON object literal for the engine's initializer.
	pub fn to_json(&self) -> String {
		serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
	None,
	Fade,
	Slide,
	#[default]
	Convex,
	Concave,
	Zoom,
}

/// Position of the current slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlideState {
	/// Horizontal index.
	pub indexh: usize,
	/// Vertical index within the horizontal stack.
	pub indexv: usize,
}

impl SlideState {
	pub fn new(indexh: usize, indexv: usize) -> Self {
		Self { indexh, indexv }
	}

	/// The address fragment for this position: `#/<h>/<v>`.
	pub fn to_hash(self) -> String {
		format!("#/{}/{}", self.indexh, self.indexv)
	}

	/// Parse `#/<h>/<v>` or `#/<h>`. Anything else gives `None`.
	pub fn from_hash(hash: &str) -> Option<Self> {
		let path = hash.strip_prefix("#/")?;
		let mut parts = path.split('/');
		let indexh = parts.next()?.parse().ok()?;
		let indexv = match parts.next() {
			Some(part) => part.parse().ok()?,
			None => 0,
		};

		if parts.next().is_some() {
			return None;
		}

		Some(Self { indexh, indexv })
	}
}

impl Display for SlideState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.to_hash())
	}
}

impl FromStr for SlideState {
	type Err = HlError;

	fn from_str(hash: &str) -> HlResult<Self> {
		Self::from_hash(hash).ok_or_else(|| HlError::InvalidSlideHash(hash.to_string()))
	}
}

/// The engine state queried when a slide changes.
pub trait SlideshowEngine {
	fn state(&self) -> SlideState;
}

/// An in-process slideshow engine tracking the current position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slideshow {
	config: SlideshowConfig,
	state: SlideState,
}

impl Slideshow {
	pub fn new(config: SlideshowConfig) -> Self {
		Self {
			config,
			state: SlideState::default(),
		}
	}

	pub fn config(&self) -> &SlideshowConfig {
		&self.config
	}

	/// Move to a slide.
	pub fn navigate(&mut self, state: SlideState) {
		self.state = state;
	}
}

impl SlideshowEngine for Slideshow {
	fn state(&self) -> SlideState {
		self.state
	}
}

/// Keeps the address fragment in step with the current slide so reloading
/// the page returns to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashSync {
	hash: String,
}

impl HashSync {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn hash(&self) -> &str {
		&self.hash
	}

	/// The slide the fragment points at, if it holds a position.
	pub fn restored_state(&self) -> Option<SlideState> {
		SlideState::from_hash(&self.hash)
	}

	/// Handler for the engine's slide changed event.
	pub fn on_slide_changed(&mut self, engine: &impl SlideshowEngine) {
		self.hash = engine.state().to_hash();
	}
}
