use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Expand LaTeX acronym macros into plain text.",
	long_about = "acrotex replaces the acronym commands of the LaTeX `acro` package (\\ac, \\acs, \
	              \\acl, \\acf and their plural and capitalized forms) with literal text.\n\nThe \
	              first use of an acronym renders as `Long Form (SHORT)`, later uses as `SHORT`, \
	              just like a typeset document. A listing of used acronyms replaces the \
	              `\\printacronyms` marker.\n\nQuick start:\n  acrotex convert -a acronyms.tex -i \
	              paper.tex -o paper-plain.tex\n  acrotex check -a acronyms.tex -i paper.tex\n  \
	              acrotex list -a acronyms.tex"
)]
pub struct AcroCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Project root used to discover `acrotex.toml`.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,

	/// Fail when an acronym key is declared more than once instead of keeping
	/// the last declaration.
	#[arg(long, global = true, default_value_t = false)]
	pub deny_duplicates: bool,
}

/// Where the `\DeclareAcronym` definitions come from.
#[derive(Args, Debug, Clone)]
pub struct DefinitionArgs {
	/// Path to the LaTeX file with `\DeclareAcronym` definitions. Defaults to
	/// the `acronyms` entry of `acrotex.toml`.
	#[arg(long, short)]
	pub acronyms: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Replace acronym commands in a document with their expanded text.
	///
	/// Every known command is replaced in document order. Unknown keys are
	/// left untouched. The `\printacronyms[include=abbrev, heading=none]`
	/// marker (or the configured marker) is replaced with a listing of every
	/// acronym that was used.
	Convert {
		#[command(flatten)]
		definitions: DefinitionArgs,

		/// Path to the document containing acronym commands.
		#[arg(long, short)]
		input: PathBuf,

		/// Path for the expanded document. Prints to stdout when omitted.
		#[arg(long, short)]
		output: Option<PathBuf>,

		/// Placeholder replaced with the listing of used acronyms.
		#[arg(long)]
		marker: Option<String>,

		/// Show a diff of the expansion instead of writing it.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// Report acronym commands with unknown keys and skipped definitions.
	///
	/// Exits with a non-zero status code when the document references an
	/// undefined acronym or a definition block could not be read.
	Check {
		#[command(flatten)]
		definitions: DefinitionArgs,

		/// Path to the document containing acronym commands.
		#[arg(long, short)]
		input: PathBuf,

		/// Output format for check results.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// List acronym definitions.
	///
	/// Without `--input`, prints every definition. With `--input`, prints the
	/// listing of acronyms used by that document, exactly as `convert` would
	/// splice it in.
	List {
		#[command(flatten)]
		definitions: DefinitionArgs,

		/// Only list acronyms used by this document.
		#[arg(long, short)]
		input: Option<PathBuf>,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
	/// GitHub Actions annotation format. Emits `::error` annotations that
	/// appear inline on pull request diffs.
	Github,
}
