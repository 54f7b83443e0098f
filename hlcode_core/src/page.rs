use tracing::debug;

use crate::Document;
use crate::DocumentReady;
use crate::HashSync;
use crate::HighlightScan;
use crate::Highlighter;
use crate::HlResult;
use crate::NodeId;
use crate::ScanSummary;
use crate::SlideState;
use crate::Slideshow;

/// Class added to `body` once page scripts run, so styles can tell.
pub const SCRIPT_ENABLED_CLASS: &str = "js";

/// Id of the anti-spam input filled in by page scripts.
pub const VERIFY_FIELD_ID: &str = "id_verify";

/// Value written into the verification input.
pub const VERIFY_ANSWER: u32 = 347 * 347;

/// A slide page together with the collaborators its startup tasks use.
#[derive(Debug)]
pub struct Page<H> {
	pub document: Document,
	highlight: HighlightScan<H>,
	slideshow: Slideshow,
	location: HashSync,
	scanned: ScanSummary,
}

impl<H: Highlighter + 'static> Page<H> {
	pub fn new(document: Document, highlight: HighlightScan<H>, slideshow: Slideshow) -> Self {
		Self {
			document,
			highlight,
			slideshow,
			location: HashSync::new(),
			scanned: ScanSummary::default(),
		}
	}

	/// Register the startup tasks: flag the body, fill the verification
	/// field, then scan the whole document.
	pub fn bootstrap(&mut self, ready: &mut DocumentReady<Self>) -> HlResult<()> {
		ready.on_ready(self, Self::mark_script_enabled)?;
		ready.on_ready(self, Self::fill_verify_field)?;
		ready.on_ready(self, |page| page.scan().map(|_| ()))
	}

	/// Scan the whole document.
	pub fn scan(&mut self) -> HlResult<ScanSummary> {
		let body = self.document.body();
		self.rescan(body)
	}

	/// Scan content below `root`, e.g. after it was inserted.
	pub fn rescan(&mut self, root: NodeId) -> HlResult<ScanSummary> {
		let summary = self.highlight.scan_subtree(&mut self.document, root)?;
		self.scanned.merge(summary);

		Ok(summary)
	}

	/// Totals across every scan of this page.
	pub fn scanned(&self) -> ScanSummary {
		self.scanned
	}

	pub fn highlight(&self) -> &HighlightScan<H> {
		&self.highlight
	}

	pub fn slideshow(&self) -> &Slideshow {
		&self.slideshow
	}

	/// The current address fragment.
	pub fn location_hash(&self) -> &str {
		self.location.hash()
	}

	/// Move to a slide and record it in the address fragment.
	pub fn slide_changed(&mut self, state: SlideState) {
		self.slideshow.navigate(state);
		self.location.on_slide_changed(&self.slideshow);
		debug!(hash = self.location.hash(), "slide changed");
	}

	fn mark_script_enabled(&mut self) -> HlResult<()> {
		let body = self.document.body();
		self.document.add_class(body, SCRIPT_ENABLED_CLASS)
	}

	fn fill_verify_field(&mut self) -> HlResult<()> {
		let Some(field) = self.document.get_element_by_id(VERIFY_FIELD_ID) else {
			return Ok(());
		};

		if self
			.document
			.element(field)
			.is_some_and(|element| element.is("input"))
		{
			self.document
				.set_attribute(field, "value", VERIFY_ANSWER.to_string())?;
		}

		Ok(())
	}
}
