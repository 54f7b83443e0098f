use crate::Document;
use crate::HlResult;
use crate::NodeId;

/// Default class a block highlighter puts on every element it processes.
pub const DEFAULT_BASE_CLASS: &str = "hljs";

/// Language-aware block highlighting, owned by a collaborator.
///
/// The scan driver treats implementations as opaque: it hands over an
/// element and expects its content to be highlighted in place, with the base
/// class applied. Errors are returned to whoever called the scan.
pub trait Highlighter {
	fn highlight_block(&mut self, document: &mut Document, element: NodeId) -> HlResult<()>;
}

impl<H: Highlighter + ?Sized> Highlighter for &mut H {
	fn highlight_block(&mut self, document: &mut Document, element: NodeId) -> HlResult<()> {
		(**self).highlight_block(document, element)
	}
}

impl<H: Highlighter + ?Sized> Highlighter for Box<H> {
	fn highlight_block(&mut self, document: &mut Document, element: NodeId) -> HlResult<()> {
		(**self).highlight_block(document, element)
	}
}

/// Applies the base class and nothing else.
///
/// Rendered decks ship the real highlighter as a page script; this keeps the
/// markup in the state it expects while leaving tokenization to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseStyleHighlighter {
	base_class: String,
}

impl Default for BaseStyleHighlighter {
	fn default() -> Self {
		Self::new(DEFAULT_BASE_CLASS)
	}
}

impl BaseStyleHighlighter {
	pub fn new(base_class: impl Into<String>) -> Self {
		Self {
			base_class: base_class.into(),
		}
	}
}

impl Highlighter for BaseStyleHighlighter {
	fn highlight_block(&mut self, document: &mut Document, element: NodeId) -> HlResult<()> {
		document.add_class(element, &self.base_class)
	}
}
