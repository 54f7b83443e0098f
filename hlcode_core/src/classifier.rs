use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

/// Any character a line can hold. Matches what `.` accepts in browser
/// regular expressions, so generic suffixes never span lines.
const LINE_CHAR: &str = r"[^\n\r\x{2028}\x{2029}]";

/// A single character that browser regular expressions match with `.`:
/// one UTF-16 code unit, so characters outside the Basic Multilingual Plane
/// are excluded.
const SEPARATOR_CHAR: &str = r"[^\n\r\x{2028}\x{2029}\x{10000}-\x{10FFFF}]";

static KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
	let pattern = format!(
		r"\A(?:[$a-zA-Z_][a-zA-Z0-9_]*|[a-zA-Z_][a-zA-Z0-9_]*<{LINE_CHAR}*>|v:true|v:false|v:null|@nogc|@disable)\z"
	);
	Regex::new(&pattern).expect("keyword pattern is valid")
});

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\A[glasvbwt]:[a-zA-Z0-9_]*\z").expect("variable pattern is valid")
});

static NUMBER_LITERAL_DOT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\A[0-9]+(?:\.[0-9]+)?\z").expect("number pattern is valid")
});

static NUMBER_ANY_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
	let pattern = format!(r"\A(?:[0-9]+|[0-9]+{SEPARATOR_CHAR}[0-9]+)\z");
	Regex::new(&pattern).expect("number pattern is valid")
});

/// The category a code fragment falls into.
///
/// `Plain` means no style is applied. Every string maps to exactly one
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
	Keyword,
	Variable,
	Number,
	Plain,
}

impl Classification {
	/// Every classification, in rule priority order.
	pub const ALL: [Self; 4] = [Self::Keyword, Self::Variable, Self::Number, Self::Plain];

	/// Whether this classification results in a styled span.
	pub fn is_styled(self) -> bool {
		!matches!(self, Self::Plain)
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Keyword => "keyword",
			Self::Variable => "variable",
			Self::Number => "number",
			Self::Plain => "plain",
		}
	}
}

impl Display for Classification {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// How the number rule treats the character between the integer and
/// fractional digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum NumberSeparator {
	/// Only a literal `.` separates the digits: `3.14`.
	#[default]
	Literal,
	/// Any single character on the line separates the digits, so `3x14` and
	/// `3-14` are numbers too. Characters outside the Basic Multilingual
	/// Plane do not count as a single character. Reproduces output rendered
	/// by older decks.
	AnyChar,
}

/// Rule-based classifier for short code fragments.
///
/// Rules are anchored to the whole string and evaluated in a fixed order:
/// keyword, then variable, then number. The first rule to match wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classifier {
	number_separator: NumberSeparator,
}

impl Classifier {
	pub fn new(number_separator: NumberSeparator) -> Self {
		Self { number_separator }
	}

	pub fn number_separator(&self) -> NumberSeparator {
		self.number_separator
	}

	pub fn classify(&self, text: &str) -> Classification {
		if is_keyword(text) {
			Classification::Keyword
		} else if is_variable(text) {
			Classification::Variable
		} else if self.is_number(text) {
			Classification::Number
		} else {
			Classification::Plain
		}
	}

	fn is_number(&self, text: &str) -> bool {
		match self.number_separator {
			NumberSeparator::Literal => NUMBER_LITERAL_DOT.is_match(text),
			NumberSeparator::AnyChar => NUMBER_ANY_SEPARATOR.is_match(text),
		}
	}
}

/// Classify `text` with the default rules.
pub fn classify(text: &str) -> Classification {
	Classifier::default().classify(text)
}

/// Identifiers, generic types such as `Vec<T>`, and the fixed literal tokens.
pub fn is_keyword(text: &str) -> bool {
	KEYWORD.is_match(text)
}

/// Scoped variables such as `g:name` or `b:`.
pub fn is_variable(text: &str) -> bool {
	VARIABLE.is_match(text)
}
