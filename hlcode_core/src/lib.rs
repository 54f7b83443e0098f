//! `hlcode_core` marks up code in slide decks. It classifies short code
//! fragments as keywords, variables or numbers, runs an idempotent highlight
//! scan over a document tree, and renders markdown slides into a standalone
//! deck page.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Markdown slides
//!   → Renderer (mdast → Document, one `section` per slide)
//!   → Page bootstrap (startup tasks queued on DocumentReady)
//!   → Highlight scan (block → inline → table cell → paragraph passes)
//!   → Serializer (Document → HTML page with slideshow options)
//! ```
//!
//! ## Modules
//!
//! - [`classifier`]: Whole-string keyword, variable and number rules.
//! - [`config`]: Configuration loading from `hlcode.toml`.
//! - [`dom`]: The document tree the scan reads and mutates.
//! - [`scan`]: The highlight scan driver and its passes.
//!
//! ## Key Types
//!
//! - [`Classifier`]: Maps a code fragment to a [`Classification`].
//! - [`HighlightScan`]: Applies the passes to a [`Document`] without ever
//!   processing an element twice.
//! - [`Highlighter`]: The block highlighter the scan delegates to.
//! - [`DocumentReady`]: One-shot readiness signal running startup tasks.
//! - [`HlConfig`]: Configuration loaded from `hlcode.toml`.
//!
//! ## Quick Start
//!
//! ```rust
//! use hlcode_core::BaseStyleHighlighter;
//! use hlcode_core::Classification;
//! use hlcode_core::HighlightScan;
//! use hlcode_core::classify;
//! use hlcode_core::render_slides;
//!
//! assert_eq!(classify("g:name"), Classification::Variable);
//!
//! let mut document = render_slides("Set `g:name` first.").unwrap();
//! let mut scan = HighlightScan::new(BaseStyleHighlighter::default());
//! let summary = scan.scan(&mut document).unwrap();
//! assert_eq!(summary.inline, 1);
//!
//! // Scanning again leaves everything as it is.
//! assert!(scan.scan(&mut document).unwrap().is_empty());
//! ```

pub use classifier::*;
pub use config::*;
pub use dom::*;
pub use error::*;
pub use highlighter::*;
pub use page::*;
pub use ready::*;
pub use render::*;
pub use scan::*;
pub use slideshow::*;
pub use styles::*;

pub mod classifier;
pub mod config;
pub mod dom;
#[allow(unused_assignments)]
mod error;
mod highlighter;
mod page;
mod ready;
mod render;
pub mod scan;
mod slideshow;
mod styles;

#[cfg(test)]
mod __fixtures;
