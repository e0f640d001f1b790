use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum AcroError {
	#[error(transparent)]
	#[diagnostic(code(acrotex::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read `{path}`: {reason}")]
	#[diagnostic(code(acrotex::read_file))]
	ReadFile { path: String, reason: String },

	#[error("failed to write `{path}`: {reason}")]
	#[diagnostic(code(acrotex::write_file))]
	WriteFile { path: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(acrotex::config_parse),
		help("check that acrotex.toml is valid TOML with `marker`, `duplicates` or `acronyms` keys")
	)]
	ConfigParse(String),

	#[error("duplicate acronym `{key}`")]
	#[diagnostic(
		code(acrotex::duplicate_acronym),
		help(
			"each `\\DeclareAcronym{{{key}}}` key must be unique, or set `duplicates = \
			 \"last-wins\"` in acrotex.toml"
		)
	)]
	DuplicateAcronym { key: String },

	#[error("no acronym definitions file given")]
	#[diagnostic(
		code(acrotex::missing_acronyms),
		help("pass `--acronyms <file>` or set `acronyms = \"<file>\"` in acrotex.toml")
	)]
	MissingAcronymsFile,
}

pub type AcroResult<T> = Result<T, AcroError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
