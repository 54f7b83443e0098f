mod common;

use clap::Parser;
use hlcode_cli::Commands;
use hlcode_cli::HlcodeCli;
use hlcode_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

const DECK: &str = "# Intro\n\nSet `g:name` to `42`.\n\n---\n\n```vim\nlet g:name = 1\n```\n";

#[test]
fn render_prints_page_to_stdout() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("slides.md"), DECK)?;

	common::hlcode_cmd()
		.arg("render")
		.arg(tmp.path().join("slides.md"))
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::starts_with("<!DOCTYPE html>"))
		.stdout(predicates::str::contains(
			r#"<code class="highlight"><span class="hljs-variable">g:name</span></code>"#,
		))
		.stdout(predicates::str::contains(
			r#"<span class="hljs-number">42</span>"#,
		))
		.stdout(predicates::str::contains("Reveal.initialize("));

	Ok(())
}

#[test]
fn render_writes_output_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("slides.md"), DECK)?;
	let output = tmp.path().join("index.html");

	common::hlcode_cmd()
		.arg("render")
		.arg(tmp.path().join("slides.md"))
		.arg("-o")
		.arg(&output)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Rendered 2 slide(s)"))
		.stdout(predicates::str::contains(
			"Highlighted 3 code element(s): 1 block, 2 inline, 0 table cell, 0 paragraph",
		));

	let html = std::fs::read_to_string(&output)?;
	assert!(html.contains(r#"<div class="reveal">"#));
	assert_eq!(html.matches("<section>").count(), 2);

	Ok(())
}

#[test]
fn render_uses_config_from_path() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("slides.md"), DECK)?;
	std::fs::write(
		tmp.path().join("hlcode.toml"),
		"[styles]\nvariable = \"scoped\"\n\n[deck]\ntitle = \"Vim Talk\"\n\n[slideshow]\ntransition = \"fade\"\n",
	)?;

	common::hlcode_cmd()
		.arg("render")
		.arg(tmp.path().join("slides.md"))
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(r#"<span class="scoped">g:name</span>"#))
		.stdout(predicates::str::contains("<title>Vim Talk</title>"))
		.stdout(predicates::str::contains(r#""transition":"fade""#));

	Ok(())
}

#[test]
fn render_check_passes_when_up_to_date() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("slides.md"), DECK)?;
	let output = tmp.path().join("index.html");

	common::hlcode_cmd()
		.arg("render")
		.arg(tmp.path().join("slides.md"))
		.arg("-o")
		.arg(&output)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::hlcode_cmd()
		.arg("render")
		.arg(tmp.path().join("slides.md"))
		.arg("-o")
		.arg(&output)
		.arg("--check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("up to date"));

	Ok(())
}

#[test]
fn render_check_fails_when_stale() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("slides.md"), DECK)?;
	let output = tmp.path().join("index.html");
	std::fs::write(&output, "<p>old</p>\n")?;

	common::hlcode_cmd()
		.arg("render")
		.arg(tmp.path().join("slides.md"))
		.arg("-o")
		.arg(&output)
		.arg("--check")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("out of date"))
		.stderr(predicates::str::contains("-<p>old</p>"));

	assert_eq!(std::fs::read_to_string(&output)?, "<p>old</p>\n");

	Ok(())
}

#[test]
fn render_check_fails_when_output_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("slides.md"), DECK)?;
	let output = tmp.path().join("index.html");

	common::hlcode_cmd()
		.arg("render")
		.arg(tmp.path().join("slides.md"))
		.arg("-o")
		.arg(&output)
		.arg("--check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("out of date"));

	assert!(!output.exists());

	Ok(())
}

#[test]
fn render_fails_on_invalid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("slides.md"), DECK)?;
	std::fs::write(tmp.path().join("hlcode.toml"), "[styles\nkeyword = 1\n")?;

	common::hlcode_cmd()
		.arg("render")
		.arg(tmp.path().join("slides.md"))
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("hlcode::config_parse"));

	Ok(())
}

#[test]
fn render_fails_on_missing_input() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::hlcode_cmd()
		.arg("render")
		.arg(tmp.path().join("missing.md"))
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stdout(predicates::str::is_empty())
		.stderr(predicates::str::is_empty().not());

	Ok(())
}

#[test]
fn render_check_requires_output() {
	common::hlcode_cmd()
		.arg("render")
		.arg("slides.md")
		.arg("--check")
		.assert()
		.failure();
}

#[test]
fn render_flags_are_accepted_by_cli_parser() {
	let cli = HlcodeCli::parse_from(["hlcode", "render", "slides.md", "-o", "out.html", "--check"]);
	match cli.command {
		Some(Commands::Render {
			input,
			output,
			check,
			diff,
		}) => {
			assert_eq!(input.to_string_lossy(), "slides.md");
			assert_eq!(
				output.map(|path| path.to_string_lossy().into_owned()),
				Some("out.html".to_string())
			);
			assert!(check);
			assert!(!diff);
		}
		_ => panic!("expected Render command"),
	}
}

#[test]
fn missing_subcommand_fails() {
	common::hlcode_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("No subcommand specified"));
}
