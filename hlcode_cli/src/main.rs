use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use hlcode_cli::Commands;
use hlcode_cli::HlcodeCli;
use hlcode_cli::OutputFormat;
use hlcode_core::Classification;
use hlcode_core::HlConfig;
use hlcode_core::render_deck;
use owo_colors::OwoColorize;
use serde::Serialize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing::debug;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = HlcodeCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Render {
			input,
			output,
			check,
			diff,
		}) => run_render(&args, input, output.as_deref(), *check, *diff),
		Some(Commands::Classify { texts, format }) => run_classify(&args, texts, *format),
		Some(Commands::Info { format }) => run_info(&args, *format),
		None => {
			eprintln!("No subcommand specified. Run `hlcode --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<hlcode_core::HlError>() {
			Ok(hl_err) => {
				let report: miette::Report = (*hl_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_directive = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directive));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.try_init();
}

fn resolve_root(args: &HlcodeCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn print_section(title: &str) {
	println!();
	println!("{}", colored!(title, bold));
}

fn print_field(label: &str, value: impl std::fmt::Display) {
	println!("{label:<28} {value}");
}

fn run_render(
	args: &HlcodeCli,
	input: &Path,
	output: Option<&Path>,
	check: bool,
	diff: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = HlConfig::load_or_default(&root)?;
	let content = std::fs::read_to_string(input)?;
	let deck = render_deck(&content, &config)?;
	debug!(input = %input.display(), slides = deck.slides, "rendered");

	let Some(output) = output else {
		print!("{}", deck.html);
		return Ok(());
	};

	if check {
		let current = std::fs::read_to_string(output).unwrap_or_default();

		if current == deck.html {
			println!("{} is up to date.", output.display());
			return Ok(());
		}

		eprintln!(
			"{} {} is out of date. Run `hlcode render` to regenerate it.",
			colored!("stale:", yellow),
			output.display()
		);

		if diff {
			print_diff(&current, &deck.html);
		}

		process::exit(1);
	}

	std::fs::write(output, &deck.html)?;

	let summary = deck.summary;
	println!(
		"{} {} slide(s) to {}",
		colored!("Rendered", green),
		deck.slides,
		output.display()
	);
	println!(
		"Highlighted {} code element(s): {} block, {} inline, {} table cell, {} paragraph",
		summary.total(),
		summary.block,
		summary.inline,
		summary.table_cell,
		summary.paragraph
	);

	Ok(())
}

#[derive(Serialize)]
struct ClassifiedFragment<'a> {
	text: &'a str,
	classification: Classification,
	class: Option<&'a str>,
}

fn run_classify(
	args: &HlcodeCli,
	texts: &[String],
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = HlConfig::load_or_default(&root)?;
	let classifier = config.classifier.classifier();

	let fragments: Vec<ClassifiedFragment<'_>> = texts
		.iter()
		.map(|text| {
			let classification = classifier.classify(text);
			ClassifiedFragment {
				text,
				classification,
				class: config.styles.class_for(classification),
			}
		})
		.collect();

	match format {
		OutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&fragments)?);
		}
		OutputFormat::Text => {
			for fragment in &fragments {
				let label = format!("{:?}", fragment.text);

				match fragment.class {
					Some(class) => {
						println!(
							"{label} -> {} ({class})",
							colored!(fragment.classification, green)
						);
					}
					None => println!("{label} -> {}", fragment.classification),
				}
			}
		}
	}

	Ok(())
}

#[derive(Serialize)]
struct InfoReport<'a> {
	config_path: Option<String>,
	config: &'a HlConfig,
}

fn run_info(args: &HlcodeCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config_path = HlConfig::resolve_path(&root);
	let config = HlConfig::load_or_default(&root)?;

	if let OutputFormat::Json = format {
		let report = InfoReport {
			config_path: config_path.as_deref().map(|path| path.display().to_string()),
			config: &config,
		};
		println!("{}", serde_json::to_string_pretty(&report)?);
		return Ok(());
	}

	println!("{}", colored!("hlcode info", bold));
	print_field(
		"Config file:",
		config_path.map_or_else(
			|| String::from("none (using defaults)"),
			|path| path.display().to_string(),
		),
	);

	print_section("Scan");
	print_field("Marker class:", &config.marker_class);
	print_field("Base class:", &config.base_class);
	print_field(
		"Number separator:",
		format!("{:?}", config.classifier.number_separator),
	);

	print_section("Styles");
	print_field("Keyword:", &config.styles.keyword);
	print_field("Variable:", &config.styles.variable);
	print_field("Number:", &config.styles.number);

	print_section("Slideshow");
	print_field(
		"Size:",
		format!("{}x{}", config.slideshow.width, config.slideshow.height),
	);
	print_field("Margin:", config.slideshow.margin);
	print_field(
		"Scale:",
		format!("{} - {}", config.slideshow.min_scale, config.slideshow.max_scale),
	);
	print_field("Transition:", format!("{:?}", config.slideshow.transition));

	print_section("Deck");
	print_field("Title:", &config.deck.title);
	print_field("Stylesheets:", config.deck.stylesheets.len());
	print_field("Scripts:", config.deck.scripts.len());

	Ok(())
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}
