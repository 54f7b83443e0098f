use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum HlError {
	#[error(transparent)]
	#[diagnostic(code(hlcode::io_error))]
	Io(#[from] std::io::Error),

	#[error("failure to load markdown: {0}")]
	#[diagnostic(code(hlcode::markdown))]
	Markdown(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(hlcode::config_parse),
		help("check that hlcode.toml is valid TOML with [classifier], [styles], [slideshow] and/or [deck] sections")
	)]
	ConfigParse(String),

	#[error("block highlighter failed: {0}")]
	#[diagnostic(code(hlcode::highlighter))]
	Highlighter(String),

	#[error("node `{0}` is not an element")]
	#[diagnostic(
		code(hlcode::not_an_element),
		help("scans and class changes only apply to element nodes")
	)]
	NotAnElement(usize),

	#[error("node `{child}` cannot be inserted under node `{parent}`")]
	#[diagnostic(
		code(hlcode::hierarchy_request),
		help("a node cannot be moved into itself or one of its descendants")
	)]
	HierarchyRequest { parent: usize, child: usize },

	#[error("invalid slide hash: `{0}`")]
	#[diagnostic(
		code(hlcode::invalid_slide_hash),
		help("slide positions are written as `#/<horizontal>/<vertical>`")
	)]
	InvalidSlideHash(String),
}

pub type HlResult<T> = Result<T, HlError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
