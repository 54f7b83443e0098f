use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Render markdown slide decks with highlighted code.",
	long_about = "hlcode renders markdown slides into a standalone deck page and marks up the code \
	              in it.\n\nCode blocks are handed to the page's block highlighter. Short inline \
	              code that looks like a keyword, a scoped variable or a number is wrapped in a \
	              styled span.\n\nQuick start:\n  hlcode render slides.md -o index.html  Render \
	              a deck\n  hlcode classify g:name 42               Show how fragments are \
	              classified\n  hlcode info                             Show the resolved \
	              configuration"
)]
pub struct HlcodeCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Directory searched for `hlcode.toml`.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Render a markdown deck into a standalone page.
	///
	/// Slides are separated by thematic breaks (`---`). The rendered page
	/// carries the slideshow options from `hlcode.toml` and has every code
	/// element marked up by the highlight scan. Without `--output` the page
	/// is written to stdout.
	Render {
		/// The markdown file holding the slides.
		input: PathBuf,

		/// File to write the rendered page to.
		#[arg(long, short)]
		output: Option<PathBuf>,

		/// Compare the rendered page with `--output` instead of writing it.
		/// Exits with a non-zero status code when the file is out of date.
		#[arg(long, default_value_t = false, requires = "output")]
		check: bool,

		/// With `--check`, show a diff between the existing and the freshly
		/// rendered page.
		#[arg(long, default_value_t = false, requires = "check")]
		diff: bool,
	},
	/// Classify code fragments the way the highlight scan does.
	///
	/// Prints whether each fragment is a keyword, variable, number or plain
	/// text, along with the class its span would carry.
	Classify {
		/// The fragments to classify.
		#[arg(required = true)]
		texts: Vec<String>,

		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Print the resolved configuration.
	///
	/// Shows which config file was found (if any) and the effective marker,
	/// style, classifier and slideshow settings.
	Info {
		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
