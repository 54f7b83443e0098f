use crate::Document;
use crate::HlError;
use crate::HlResult;
use crate::Highlighter;
use crate::NodeId;

/// Block highlighter which records every element it receives and applies the
/// base class like a real highlighter would.
#[derive(Debug, Default)]
pub struct RecordingHighlighter {
	pub calls: Vec<NodeId>,
}

impl Highlighter for RecordingHighlighter {
	fn highlight_block(&mut self, document: &mut Document, element: NodeId) -> HlResult<()> {
		self.calls.push(element);
		document.add_class(element, "hljs")
	}
}

/// Block highlighter which always fails.
#[derive(Debug, Default)]
pub struct FailingHighlighter;

impl Highlighter for FailingHighlighter {
	fn highlight_block(&mut self, _document: &mut Document, _element: NodeId) -> HlResult<()> {
		Err(HlError::Highlighter("highlighter unavailable".to_string()))
	}
}

/// Append `<name>` to `parent`.
pub fn element(document: &mut Document, parent: NodeId, name: &str) -> NodeId {
	let element = document.create_element(name);
	document
		.append_child(parent, element)
		.unwrap_or_else(|e| panic!("failed to append `{name}`: {e}"));
	element
}

/// Append `<code>text</code>` to `parent`.
pub fn code(document: &mut Document, parent: NodeId, text: &str) -> NodeId {
	let code = element(document, parent, "code");
	document
		.set_text_content(code, text)
		.unwrap_or_else(|e| panic!("failed to set code text: {e}"));
	code
}

/// Append `<context><code>text</code></context>` to the body and return the
/// code element.
pub fn code_in(document: &mut Document, context: &str, text: &str) -> NodeId {
	let body = document.body();
	let parent = element(document, body, context);
	code(document, parent, text)
}

/// A `<pre><code>` block with a language class, the way markdown fences are
/// rendered.
pub fn code_block(document: &mut Document, text: &str) -> NodeId {
	let body = document.body();
	let pre = element(document, body, "pre");
	let code = code(document, pre, text);
	document
		.add_class(code, "language-rust")
		.unwrap_or_else(|e| panic!("failed to add class: {e}"));
	code
}

pub fn classes(document: &Document, id: NodeId) -> Vec<String> {
	document
		.element(id)
		.map(|element| element.classes().to_vec())
		.unwrap_or_default()
}

pub const SAMPLE_DECK: &str = r"# Vim script

Set `g:name` before `call` runs.

---

## Blocks

```vim
let g:name = 1
```

| option | default |
| ------ | ------- |
| `tabstop` | `8` |
| `a + b` | none |

- tight `s:local`
- items `x + y`
";
