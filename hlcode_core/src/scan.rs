use std::fmt::Display;

use serde::Serialize;
use tracing::debug;
use tracing::trace;

use crate::Classifier;
use crate::Document;
use crate::HlResult;
use crate::Highlighter;
use crate::NodeId;
use crate::StyleMap;
use crate::highlighter::DEFAULT_BASE_CLASS;

/// Default class marking an element as already processed.
pub const DEFAULT_MARKER_CLASS: &str = "highlight";

/// The passes a scan runs over `code` elements.
///
/// An element can match more than one pass (inline code in a table cell
/// matches [`Pass::Inline`] and [`Pass::TableCell`]). The pass listed first
/// in [`Pass::ORDER`] captures it and later passes skip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
	/// `code` inside `pre`: handed to the block highlighter.
	Block,
	/// Any `code`: classified and wrapped in a styled span when it matches.
	Inline,
	/// `code` inside `td`: block highlighted, then the base class is removed.
	TableCell,
	/// `code` inside `p`: block highlighted, base class kept.
	Paragraph,
}

impl Pass {
	/// Priority order. Passes run in this order and the first one to take an
	/// element wins.
	pub const ORDER: [Self; 4] = [Self::Block, Self::Inline, Self::TableCell, Self::Paragraph];

	/// The element a candidate `code` must be nested in, if any.
	pub fn context(self) -> Option<&'static str> {
		match self {
			Self::Block => Some("pre"),
			Self::Inline => None,
			Self::TableCell => Some("td"),
			Self::Paragraph => Some("p"),
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Block => "block",
			Self::Inline => "inline",
			Self::TableCell => "table_cell",
			Self::Paragraph => "paragraph",
		}
	}
}

impl Display for Pass {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Number of elements each pass processed during one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
	pub block: usize,
	pub inline: usize,
	pub table_cell: usize,
	pub paragraph: usize,
}

impl ScanSummary {
	pub fn count(&self, pass: Pass) -> usize {
		match pass {
			Pass::Block => self.block,
			Pass::Inline => self.inline,
			Pass::TableCell => self.table_cell,
			Pass::Paragraph => self.paragraph,
		}
	}

	pub fn total(&self) -> usize {
		self.block + self.inline + self.table_cell + self.paragraph
	}

	pub fn is_empty(&self) -> bool {
		self.total() == 0
	}

	pub fn merge(&mut self, other: ScanSummary) {
		self.block += other.block;
		self.inline += other.inline;
		self.table_cell += other.table_cell;
		self.paragraph += other.paragraph;
	}

	fn record(&mut self, pass: Pass) {
		match pass {
			Pass::Block => self.block += 1,
			Pass::Inline => self.inline += 1,
			Pass::TableCell => self.table_cell += 1,
			Pass::Paragraph => self.paragraph += 1,
		}
	}
}

/// The text of one `code` element, read at the moment it is visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFragment {
	pub element: NodeId,
	pub text: String,
	pub already_processed: bool,
}

impl CodeFragment {
	pub fn extract(document: &Document, element: NodeId, marker_class: &str) -> Self {
		Self {
			element,
			text: document.text_content(element),
			already_processed: document.has_class(element, marker_class),
		}
	}
}

/// Marks up `code` elements in a [`Document`].
///
/// Every element the scan processes gains the marker class, and elements
/// carrying it are never touched again, so scanning the same tree any number
/// of times gives the same result as scanning it once. New content can be
/// scanned with [`HighlightScan::scan_subtree`] without disturbing what was
/// already processed.
#[derive(Debug, Clone)]
pub struct HighlightScan<H> {
	highlighter: H,
	classifier: Classifier,
	styles: StyleMap,
	marker_class: String,
	base_class: String,
}

impl<H: Highlighter> HighlightScan<H> {
	pub fn new(highlighter: H) -> Self {
		Self {
			highlighter,
			classifier: Classifier::default(),
			styles: StyleMap::default(),
			marker_class: DEFAULT_MARKER_CLASS.to_string(),
			base_class: DEFAULT_BASE_CLASS.to_string(),
		}
	}

	#[must_use]
	pub fn with_classifier(mut self, classifier: Classifier) -> Self {
		self.classifier = classifier;
		self
	}

	#[must_use]
	pub fn with_styles(mut self, styles: StyleMap) -> Self {
		self.styles = styles;
		self
	}

	#[must_use]
	pub fn with_marker_class(mut self, marker_class: impl Into<String>) -> Self {
		self.marker_class = marker_class.into();
		self
	}

	/// The class the block highlighter applies, removed again from table cell
	/// code.
	#[must_use]
	pub fn with_base_class(mut self, base_class: impl Into<String>) -> Self {
		self.base_class = base_class.into();
		self
	}

	pub fn highlighter(&self) -> &H {
		&self.highlighter
	}

	pub fn highlighter_mut(&mut self) -> &mut H {
		&mut self.highlighter
	}

	pub fn into_highlighter(self) -> H {
		self.highlighter
	}

	pub fn classifier(&self) -> &Classifier {
		&self.classifier
	}

	pub fn marker_class(&self) -> &str {
		&self.marker_class
	}

	pub fn is_processed(&self, document: &Document, element: NodeId) -> bool {
		document.has_class(element, &self.marker_class)
	}

	/// Scan the whole document body.
	pub fn scan(&mut self, document: &mut Document) -> HlResult<ScanSummary> {
		let body = document.body();
		self.scan_subtree(document, body)
	}

	/// Scan the elements under `root`. A root with no matching descendants is
	/// left alone.
	pub fn scan_subtree(&mut self, document: &mut Document, root: NodeId) -> HlResult<ScanSummary> {
		let mut summary = ScanSummary::default();

		for pass in Pass::ORDER {
			self.run_pass(document, root, pass, &mut summary)?;
		}

		debug!(
			root = root.index(),
			block = summary.block,
			inline = summary.inline,
			table_cell = summary.table_cell,
			paragraph = summary.paragraph,
			"highlight scan complete"
		);

		Ok(summary)
	}

	/// Unprocessed `code` elements under `root` matching the pass context.
	fn candidates(&self, document: &Document, root: NodeId, pass: Pass) -> Vec<NodeId> {
		document
			.elements_named(root, "code")
			.into_iter()
			.filter(|&element| !self.is_processed(document, element))
			.filter(|&element| {
				pass.context()
					.is_none_or(|context| document.has_ancestor_named(element, context))
			})
			.collect()
	}

	fn run_pass(
		&mut self,
		document: &mut Document,
		root: NodeId,
		pass: Pass,
		summary: &mut ScanSummary,
	) -> HlResult<()> {
		// Candidates are collected up front so mutations made while
		// processing one element never change which elements this pass sees.
		let candidates = self.candidates(document, root, pass);

		for element in candidates {
			if self.is_processed(document, element) || !document.contains(root, element) {
				continue;
			}

			let processed = match pass {
				Pass::Block | Pass::Paragraph => {
					document.add_class(element, &self.marker_class)?;
					self.highlighter.highlight_block(document, element)?;
					true
				}
				Pass::TableCell => {
					document.add_class(element, &self.marker_class)?;
					self.highlighter.highlight_block(document, element)?;
					document.remove_class(element, &self.base_class)?;
					true
				}
				Pass::Inline => self.wrap_fragment(document, element)?,
			};

			if processed {
				summary.record(pass);
			}
		}

		trace!(%pass, processed = summary.count(pass), "highlight pass complete");

		Ok(())
	}

	/// Classify the element text and wrap it in a styled span. Unstyled text
	/// is left as is and stays eligible for later passes and scans.
	fn wrap_fragment(&self, document: &mut Document, element: NodeId) -> HlResult<bool> {
		let fragment = CodeFragment::extract(document, element, &self.marker_class);
		let classification = self.classifier.classify(&fragment.text);
		trace!(text = %fragment.text, %classification, "classified code fragment");

		let Some(style) = self.styles.class_for(classification) else {
			return Ok(false);
		};

		document.add_class(element, &self.marker_class)?;

		let span = document.create_element("span");
		document.add_class(span, style)?;
		let text = document.create_text(fragment.text);
		document.append_child(span, text)?;
		document.replace_children(element, &[span])?;

		Ok(true)
	}
}
