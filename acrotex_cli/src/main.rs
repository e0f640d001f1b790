use std::path::Path;
use std::path::PathBuf;
use std::process;

use acrotex_core::AcroConfig;
use acrotex_core::AcroError;
use acrotex_core::DefinitionRegistry;
use acrotex_core::DuplicatePolicy;
use acrotex_core::convert;
use acrotex_core::expand;
use acrotex_core::generate;
use acrotex_cli::AcroCli;
use acrotex_cli::Commands;
use acrotex_cli::DefinitionArgs;
use acrotex_cli::OutputFormat;
use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
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
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
	let args = AcroCli::parse();

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
		Some(Commands::Convert {
			definitions,
			input,
			output,
			marker,
			dry_run,
		}) => run_convert(
			&args,
			definitions,
			input,
			output.as_deref(),
			marker.as_deref(),
			*dry_run,
		),
		Some(Commands::Check {
			definitions,
			input,
			format,
		}) => run_check(&args, definitions, input, *format),
		Some(Commands::List { definitions, input }) => {
			run_list(&args, definitions, input.as_deref())
		}
		None => {
			eprintln!("No subcommand specified. Run `acrotex --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<AcroError>() {
			Ok(acro_err) => {
				let report: miette::Report = (*acro_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `ACROTEX_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_env("ACROTEX_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn resolve_root(args: &AcroCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn read_file(path: &Path) -> Result<String, AcroError> {
	std::fs::read_to_string(path).map_err(|e| AcroError::ReadFile {
		path: path.display().to_string(),
		reason: e.to_string(),
	})
}

fn write_file(path: &Path, content: &str) -> Result<(), AcroError> {
	std::fs::write(path, content).map_err(|e| AcroError::WriteFile {
		path: path.display().to_string(),
		reason: e.to_string(),
	})
}

/// The loaded config together with the definitions it points at.
struct Session {
	config: AcroConfig,
	registry: DefinitionRegistry,
	acronyms_path: PathBuf,
}

fn load_session(args: &AcroCli, definitions: &DefinitionArgs) -> CliResult<Session> {
	let root = resolve_root(args);
	let config = AcroConfig::load_or_default(&root)?;
	tracing::debug!(root = %root.display(), marker = %config.marker, "resolved config");

	let acronyms_path = definitions
		.acronyms
		.clone()
		.or_else(|| config.acronyms_path(&root))
		.ok_or(AcroError::MissingAcronymsFile)?;

	let policy = if args.deny_duplicates {
		DuplicatePolicy::Error
	} else {
		config.duplicates
	};

	let source = read_file(&acronyms_path)?;
	let registry = DefinitionRegistry::parse_with_policy(&source, policy)?;
	eprintln!(
		"Loaded {} acronyms from {}",
		registry.len(),
		acronyms_path.display()
	);

	if args.verbose {
		for diagnostic in registry.diagnostics() {
			eprintln!(
				"{} {}: {diagnostic}",
				colored!("warning:", yellow),
				acronyms_path.display()
			);
		}
	}

	Ok(Session {
		config,
		registry,
		acronyms_path,
	})
}

fn run_convert(
	args: &AcroCli,
	definitions: &DefinitionArgs,
	input: &Path,
	output: Option<&Path>,
	marker: Option<&str>,
	dry_run: bool,
) -> CliResult<()> {
	let session = load_session(args, definitions)?;
	let document = read_file(input)?;
	let marker = marker.unwrap_or(&session.config.marker);

	let conversion = convert(&document, &session.registry, marker);

	if !conversion.unknown.is_empty() {
		eprintln!(
			"{} {} command(s) reference undefined acronyms and were left unchanged (run `acrotex \
			 check` for details)",
			colored!("warning:", yellow),
			conversion.unknown.len()
		);
	}

	if dry_run {
		if conversion.text == document {
			println!("Nothing to expand in {}.", input.display());
		} else {
			println!("Would expand {}:", input.display());
			print_diff(&document, &conversion.text);
		}
		return Ok(());
	}

	match output {
		Some(output) => {
			write_file(output, &conversion.text)?;
			println!(
				"Expanded {} acronym(s); processed text written to {}",
				conversion.used.len(),
				output.display()
			);
		}
		None => print!("{}", conversion.text),
	}

	Ok(())
}

fn run_check(
	args: &AcroCli,
	definitions: &DefinitionArgs,
	input: &Path,
	format: OutputFormat,
) -> CliResult<()> {
	let session = load_session(args, definitions)?;
	let document = read_file(input)?;
	let expansion = expand(&document, &session.registry);
	let commands = expansion.commands;
	let diagnostics = session.registry.diagnostics();
	let input_display = input.display().to_string();
	let acronyms_display = session.acronyms_path.display().to_string();

	let is_ok = expansion.unknown.is_empty() && diagnostics.is_empty();

	match format {
		OutputFormat::Json => {
			let unknown: Vec<serde_json::Value> = expansion
				.unknown
				.iter()
				.map(|entry| {
					serde_json::json!({
						"file": input_display,
						"key": entry.key,
						"command": entry.command,
						"line": entry.line,
						"column": entry.column,
					})
				})
				.collect();
			let skipped: Vec<serde_json::Value> = diagnostics
				.iter()
				.map(|diagnostic| {
					serde_json::json!({
						"file": acronyms_display,
						"key": diagnostic.key,
						"line": diagnostic.line,
						"message": diagnostic.to_string(),
					})
				})
				.collect();
			let output = serde_json::json!({
				"ok": is_ok,
				"commands": commands,
				"used": expansion.used.clone().into_sorted_keys(),
				"unknown": unknown,
				"diagnostics": skipped,
			});
			println!("{output}");
		}
		OutputFormat::Github => {
			let input_file = escape_annotation_property(&input_display);
			let acronyms_file = escape_annotation_property(&acronyms_display);
			for entry in &expansion.unknown {
				println!(
					"::error file={input_file},line={},col={}::{}",
					entry.line,
					entry.column,
					escape_annotation_data(&format!("unknown acronym `{}`", entry.key))
				);
			}
			for diagnostic in diagnostics {
				println!(
					"::warning file={acronyms_file},line={}::{}",
					diagnostic.line,
					escape_annotation_data(&diagnostic.to_string())
				);
			}
			if is_ok {
				println!("All {commands} acronym command(s) resolved.");
			}
		}
		OutputFormat::Text => {
			for diagnostic in diagnostics {
				eprintln!(
					"{} {acronyms_display}: {diagnostic}",
					colored!("warning:", yellow)
				);
			}
			for entry in &expansion.unknown {
				eprintln!(
					"{} {input_display}:{}:{}: unknown acronym `{}` in `{}`",
					colored!("error:", red),
					entry.line,
					entry.column,
					entry.key,
					entry.command
				);
			}

			if is_ok {
				println!(
					"Check passed: all {commands} acronym command(s) resolved, {} acronym(s) used.",
					expansion.used.len()
				);
			} else {
				println!(
					"Check failed: {} unknown command(s), {} skipped definition(s).",
					expansion.unknown.len(),
					diagnostics.len()
				);
			}
		}
	}

	if !is_ok {
		process::exit(1);
	}

	Ok(())
}

fn run_list(args: &AcroCli, definitions: &DefinitionArgs, input: Option<&Path>) -> CliResult<()> {
	let session = load_session(args, definitions)?;

	let Some(input) = input else {
		for definition in session.registry.iter() {
			println!(
				"{:<16} {:<12} {}",
				definition.key, definition.short, definition.long
			);
		}
		return Ok(());
	};

	let document = read_file(input)?;
	let expansion = expand(&document, &session.registry);
	let listing = generate(&expansion.used, &session.registry);

	if listing.is_empty() {
		eprintln!("No acronyms used in {}.", input.display());
	} else {
		println!("{listing}");
	}

	Ok(())
}

/// Escape the message of a GitHub Actions workflow command so it stays on
/// one line.
fn escape_annotation_data(text: &str) -> String {
	text.replace('%', "%25")
		.replace('\r', "%0D")
		.replace('\n', "%0A")
}

/// Escape a `key=value` property of a workflow command.
fn escape_annotation_property(text: &str) -> String {
	escape_annotation_data(text)
		.replace(':', "%3A")
		.replace(',', "%2C")
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!("   {change}");
			}
		}
	}
}
