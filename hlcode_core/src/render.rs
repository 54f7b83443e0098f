use markdown::ParseOptions;
use markdown::mdast::Node;
use markdown::to_mdast;
use serde::Serialize;
use tracing::debug;

use crate::BaseStyleHighlighter;
use crate::DeckConfig;
use crate::Document;
use crate::DocumentReady;
use crate::HighlightScan;
use crate::Highlighter;
use crate::HlConfig;
use crate::HlError;
use crate::HlResult;
use crate::NodeId;
use crate::Page;
use crate::ScanSummary;
use crate::Slideshow;
use crate::SlideshowConfig;

/// Rewrites the address fragment whenever the engine reports a new slide.
const SLIDE_HASH_HOOK: &str = "document.body.addEventListener('slidechanged', () => {\n  const \
                               state = Reveal.getState()\n  window.location.hash = '#/' + \
                               state.indexh + '/' + state.indexv\n})";

/// A deck rendered to a standalone page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDeck {
	pub html: String,
	pub slides: usize,
	pub summary: ScanSummary,
}

/// Parse markdown slides into a page. Slides are separated by thematic
/// breaks (`---`) and each becomes a `section` under
/// `div.reveal > div.slides`.
pub fn render_slides(content: impl AsRef<str>) -> HlResult<Document> {
	let options = ParseOptions::gfm();
	let mdast =
		to_mdast(content.as_ref(), &options).map_err(|e| HlError::Markdown(e.to_string()))?;

	let mut document = Document::new();
	let body = document.body();
	let reveal = document.create_element("div");
	document.add_class(reveal, "reveal")?;
	document.append_child(body, reveal)?;
	let slides = document.create_element("div");
	document.add_class(slides, "slides")?;
	document.append_child(reveal, slides)?;

	let mut section = new_section(&mut document, slides)?;

	for node in mdast.children().map(Vec::as_slice).unwrap_or_default() {
		if matches!(node, Node::ThematicBreak(_)) {
			section = new_section(&mut document, slides)?;
			continue;
		}

		append_node(&mut document, section, node, false)?;
	}

	Ok(document)
}

/// Render a complete deck page with the default block highlighter.
pub fn render_deck(content: impl AsRef<str>, config: &HlConfig) -> HlResult<RenderedDeck> {
	let highlighter = BaseStyleHighlighter::new(config.base_class.clone());
	render_deck_with(content, config, highlighter)
}

/// Render a complete deck page: slides, head, page scripts, then the startup
/// tasks (including the initial highlight scan) once the page is ready.
pub fn render_deck_with<H: Highlighter + 'static>(
	content: impl AsRef<str>,
	config: &HlConfig,
	highlighter: H,
) -> HlResult<RenderedDeck> {
	let mut document = render_slides(content)?;
	let slides = document.elements_named(document.body(), "section").len();
	append_head(&mut document, &config.deck)?;
	append_scripts(&mut document, &config.deck, &config.slideshow)?;

	let highlight = HighlightScan::new(highlighter)
		.with_classifier(config.classifier.classifier())
		.with_styles(config.styles.clone())
		.with_marker_class(config.marker_class.clone())
		.with_base_class(config.base_class.clone());
	let mut page = Page::new(document, highlight, Slideshow::new(config.slideshow.clone()));

	let mut ready = DocumentReady::new();
	page.bootstrap(&mut ready)?;
	ready.mark_interactive(&mut page)?;

	let summary = page.scanned();
	debug!(slides, highlighted = summary.total(), "rendered deck");

	Ok(RenderedDeck {
		html: page.document.to_html(),
		slides,
		summary,
	})
}

fn new_section(document: &mut Document, slides: NodeId) -> HlResult<NodeId> {
	let section = document.create_element("section");
	document.append_child(slides, section)?;
	Ok(section)
}

fn append_head(document: &mut Document, deck: &DeckConfig) -> HlResult<()> {
	let head = document.head();

	let charset = document.create_element("meta");
	document.set_attribute(charset, "charset", "utf-8")?;
	document.append_child(head, charset)?;

	let title = document.create_element("title");
	document.set_text_content(title, deck.title.clone())?;
	document.append_child(head, title)?;

	for href in &deck.stylesheets {
		let link = document.create_element("link");
		document.set_attribute(link, "rel", "stylesheet")?;
		document.set_attribute(link, "href", href.clone())?;
		document.append_child(head, link)?;
	}

	Ok(())
}

fn append_scripts(
	document: &mut Document,
	deck: &DeckConfig,
	slideshow: &SlideshowConfig,
) -> HlResult<()> {
	let body = document.body();

	for src in &deck.scripts {
		let script = document.create_element("script");
		document.set_attribute(script, "src", src.clone())?;
		document.append_child(body, script)?;
	}

	let options = slideshow.to_json().replace("</", "<\\/");
	let source = format!("\nReveal.initialize({options})\n\n{SLIDE_HASH_HOOK}\n");
	let script = document.create_element("script");
	let inline = document.create_raw(source);
	document.append_child(script, inline)?;
	document.append_child(body, script)?;

	Ok(())
}

fn append_children(
	document: &mut Document,
	parent: NodeId,
	children: &[Node],
	tight: bool,
) -> HlResult<()> {
	for child in children {
		append_node(document, parent, child, tight)?;
	}

	Ok(())
}

fn append_element(
	document: &mut Document,
	parent: NodeId,
	name: &str,
	children: &[Node],
) -> HlResult<NodeId> {
	let element = document.create_element(name);
	document.append_child(parent, element)?;
	append_children(document, element, children, false)?;
	Ok(element)
}

/// Append the markup for `node`. In tight list items paragraphs are unwrapped.
fn append_node(document: &mut Document, parent: NodeId, node: &Node, tight: bool) -> HlResult<()> {
	match node {
		Node::Paragraph(paragraph) if tight => {
			append_children(document, parent, &paragraph.children, false)?;
		}
		Node::Paragraph(paragraph) => {
			append_element(document, parent, "p", &paragraph.children)?;
		}
		Node::Heading(heading) => {
			let name = format!("h{}", heading.depth.clamp(1, 6));
			append_element(document, parent, &name, &heading.children)?;
		}
		Node::Text(text) => {
			let text = document.create_text(text.value.clone());
			document.append_child(parent, text)?;
		}
		Node::InlineCode(code) => {
			let element = document.create_element("code");
			document.set_text_content(element, code.value.clone())?;
			document.append_child(parent, element)?;
		}
		Node::Code(code) => {
			let pre = document.create_element("pre");
			document.append_child(parent, pre)?;
			let element = document.create_element("code");

			if let Some(lang) = &code.lang {
				document.add_class(element, &format!("language-{lang}"))?;
			}

			let mut value = code.value.clone();

			if !value.is_empty() {
				value.push('\n');
			}

			document.set_text_content(element, value)?;
			document.append_child(pre, element)?;
		}
		Node::Emphasis(emphasis) => {
			append_element(document, parent, "em", &emphasis.children)?;
		}
		Node::Strong(strong) => {
			append_element(document, parent, "strong", &strong.children)?;
		}
		Node::Delete(delete) => {
			append_element(document, parent, "del", &delete.children)?;
		}
		Node::Blockquote(quote) => {
			append_element(document, parent, "blockquote", &quote.children)?;
		}
		Node::List(list) => {
			let name = if list.ordered { "ol" } else { "ul" };
			let element = document.create_element(name);

			if let Some(start) = list.start.filter(|&start| list.ordered && start != 1) {
				document.set_attribute(element, "start", start.to_string())?;
			}

			document.append_child(parent, element)?;
			append_children(document, element, &list.children, !list.spread)?;
		}
		Node::ListItem(item) => {
			let element = document.create_element("li");
			document.append_child(parent, element)?;
			append_children(document, element, &item.children, tight && !item.spread)?;
		}
		Node::Link(link) => {
			let element = append_element(document, parent, "a", &link.children)?;
			document.set_attribute(element, "href", link.url.clone())?;

			if let Some(title) = &link.title {
				document.set_attribute(element, "title", title.clone())?;
			}
		}
		Node::Image(image) => {
			let element = document.create_element("img");
			document.set_attribute(element, "src", image.url.clone())?;
			document.set_attribute(element, "alt", image.alt.clone())?;

			if let Some(title) = &image.title {
				document.set_attribute(element, "title", title.clone())?;
			}

			document.append_child(parent, element)?;
		}
		Node::Break(_) => {
			let element = document.create_element("br");
			document.append_child(parent, element)?;
		}
		Node::ThematicBreak(_) => {
			let element = document.create_element("hr");
			document.append_child(parent, element)?;
		}
		Node::Html(html) => {
			let raw = document.create_raw(html.value.clone());
			document.append_child(parent, raw)?;
		}
		Node::Table(table) => {
			let element = document.create_element("table");
			document.append_child(parent, element)?;

			for (index, row) in table.children.iter().enumerate() {
				let Node::TableRow(row) = row else {
					continue;
				};

				let cell_name = if index == 0 { "th" } else { "td" };
				let tr = document.create_element("tr");
				document.append_child(element, tr)?;

				for cell in &row.children {
					if let Node::TableCell(cell) = cell {
						append_element(document, tr, cell_name, &cell.children)?;
					}
				}
			}
		}
		Node::Definition(_) | Node::FootnoteDefinition(_) => {}
		other => {
			if let Some(children) = other.children() {
				append_children(document, parent, children, tight)?;
			}
		}
	}

	Ok(())
}
