use std::collections::HashMap;
use std::fmt::Display;
use std::ops::Range;

use logos::Logos;

use crate::AcroError;
use crate::AcroResult;
use crate::config::DuplicatePolicy;

/// A single `\DeclareAcronym` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcronymDefinition {
	pub key: String,
	pub short: String,
	pub long: String,
}

impl AcronymDefinition {
	pub fn new(key: impl Into<String>, short: impl Into<String>, long: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			short: short.into(),
			long: long.into(),
		}
	}
}

/// What went wrong with a definition block that was skipped or overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionDiagnosticKind {
	/// The block has no braced key or body, or the body never closes.
	MalformedBlock,
	/// The key contains something other than word characters.
	InvalidKey,
	/// `short` or `long` is missing or empty.
	MissingField(&'static str),
	/// The key was declared earlier. The later block replaced it.
	DuplicateKey,
}

/// A non-fatal problem found while reading definition blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionDiagnostic {
	pub kind: DefinitionDiagnosticKind,
	/// The block's key, when one could be read.
	pub key: Option<String>,
	/// 1-indexed line of the `\DeclareAcronym` that opened the block.
	pub line: usize,
}

impl Display for DefinitionDiagnostic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let key = self.key.as_deref().unwrap_or("?");
		match &self.kind {
			DefinitionDiagnosticKind::MalformedBlock => {
				write!(f, "line {}: malformed definition block `{key}`", self.line)
			}
			DefinitionDiagnosticKind::InvalidKey => {
				write!(f, "line {}: invalid acronym key `{key}`", self.line)
			}
			DefinitionDiagnosticKind::MissingField(field) => {
				write!(f, "line {}: acronym `{key}` has no `{field}` field", self.line)
			}
			DefinitionDiagnosticKind::DuplicateKey => {
				write!(
					f,
					"line {}: acronym `{key}` is declared more than once",
					self.line
				)
			}
		}
	}
}

/// Raw tokens of a definition source.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(skip r"[ \t\r\n]+")]
enum DefToken {
	#[token(r"\DeclareAcronym")]
	Declare,
	/// A brace group without nested braces, e.g. `{API}`.
	#[regex(r"\{[^{}]*\}")]
	Braced,
	#[token("{")]
	BraceOpen,
	#[token("}")]
	BraceClose,
	#[token("=")]
	Equals,
	#[token(",")]
	Comma,
	#[regex(r"[A-Za-z0-9_\-]+")]
	Word,
}

/// Walks the definition token stream one block at a time. Problems are
/// recorded and the walker resumes at the next `\DeclareAcronym`.
struct DefinitionWalker<'a> {
	source: &'a str,
	tokens: Vec<(Result<DefToken, ()>, Range<usize>)>,
	cursor: usize,
	definitions: Vec<(AcronymDefinition, usize)>,
	diagnostics: Vec<DefinitionDiagnostic>,
}

/// Fields collected from one block body.
#[derive(Default)]
struct BlockFields {
	short: Option<String>,
	long: Option<String>,
}

impl<'a> DefinitionWalker<'a> {
	fn new(source: &'a str) -> Self {
		Self {
			source,
			tokens: DefToken::lexer(source).spanned().collect(),
			cursor: 0,
			definitions: vec![],
			diagnostics: vec![],
		}
	}

	fn peek(&self) -> Option<Result<DefToken, ()>> {
		self.tokens.get(self.cursor).map(|(result, _)| *result)
	}

	fn slice(&self) -> &'a str {
		let (_, span) = &self.tokens[self.cursor];
		&self.source[span.clone()]
	}

	/// The contents of the current `Braced` token without its braces.
	fn braced_inner(&self) -> &'a str {
		let slice = self.slice();
		&slice[1..slice.len() - 1]
	}

	fn line_at(&self, offset: usize) -> usize {
		self.source[..offset].matches('\n').count() + 1
	}

	fn diagnose(&mut self, kind: DefinitionDiagnosticKind, key: Option<&str>, line: usize) {
		tracing::debug!(line, key, ?kind, "skipping acronym definition");
		self.diagnostics.push(DefinitionDiagnostic {
			kind,
			key: key.map(ToString::to_string),
			line,
		});
	}

	fn process(&mut self) {
		while let Some(token) = self.peek() {
			if token == Ok(DefToken::Declare) {
				self.process_block();
			} else {
				self.cursor += 1;
			}
		}
	}

	fn process_block(&mut self) {
		let line = self.line_at(self.tokens[self.cursor].1.start);
		self.cursor += 1;

		if self.peek() != Some(Ok(DefToken::Braced)) {
			self.diagnose(DefinitionDiagnosticKind::MalformedBlock, None, line);
			return;
		}
		let key = self.braced_inner();
		self.cursor += 1;

		let fields = match self.peek() {
			Some(Ok(DefToken::BraceOpen)) => {
				self.cursor += 1;
				self.read_fields()
			}
			// A body without any inner braces cannot carry braced fields.
			Some(Ok(DefToken::Braced)) => {
				self.cursor += 1;
				Some(BlockFields::default())
			}
			_ => None,
		};

		let Some(fields) = fields else {
			self.diagnose(DefinitionDiagnosticKind::MalformedBlock, Some(key), line);
			return;
		};

		if !is_valid_key(key) {
			self.diagnose(DefinitionDiagnosticKind::InvalidKey, Some(key), line);
			return;
		}

		match fields {
			BlockFields {
				short: Some(short),
				long: Some(long),
			} => {
				self.definitions
					.push((AcronymDefinition::new(key, short, long), line));
			}
			BlockFields { short: None, .. } => {
				self.diagnose(DefinitionDiagnosticKind::MissingField("short"), Some(key), line);
			}
			BlockFields { long: None, .. } => {
				self.diagnose(DefinitionDiagnosticKind::MissingField("long"), Some(key), line);
			}
		}
	}

	/// Read `name = value` pairs up to and including the closing brace.
	/// Returns `None` when the body is cut short by another block or the
	/// end of input.
	fn read_fields(&mut self) -> Option<BlockFields> {
		let mut fields = BlockFields::default();

		loop {
			match self.peek()? {
				Ok(DefToken::BraceClose) => {
					self.cursor += 1;
					return Some(fields);
				}
				Ok(DefToken::Comma) => self.cursor += 1,
				Ok(DefToken::Word) => {
					let name = self.slice();
					self.cursor += 1;
					if self.peek()? != Ok(DefToken::Equals) {
						self.skip_field()?;
						continue;
					}
					self.cursor += 1;

					if self.peek()? == Ok(DefToken::Braced) {
						let value = self.braced_inner();
						self.cursor += 1;
						if !value.is_empty() {
							match name {
								"short" => fields.short = Some(value.to_string()),
								"long" => fields.long = Some(value.to_string()),
								_ => {}
							}
						}
					} else {
						self.skip_field()?;
					}
				}
				Ok(DefToken::Declare) => return None,
				_ => self.skip_field()?,
			}
		}
	}

	/// Skip an unbraced value (such as `tag = tech`) up to the next `,` or
	/// closing brace without consuming it.
	fn skip_field(&mut self) -> Option<()> {
		loop {
			match self.peek()? {
				Ok(DefToken::Comma | DefToken::BraceClose) => return Some(()),
				Ok(DefToken::Declare | DefToken::BraceOpen) => return None,
				_ => self.cursor += 1,
			}
		}
	}
}

/// Keys are restricted to word characters.
fn is_valid_key(key: &str) -> bool {
	!key.is_empty() && key.chars().all(|ch| ch.is_alphanumeric() || ch == '_')
}

/// Every acronym declared in a definition source, keyed by acronym key.
///
/// The registry is built once and never changes during expansion.
#[derive(Debug, Clone, Default)]
pub struct DefinitionRegistry {
	definitions: HashMap<String, AcronymDefinition>,
	diagnostics: Vec<DefinitionDiagnostic>,
}

impl DefinitionRegistry {
	/// Parse every `\DeclareAcronym` block in `source`.
	///
	/// ```latex
	/// \DeclareAcronym{api}{
	///     short = {API},
	///     long  = {Application Programming Interface},
	///     tag   = tech
	/// }
	/// ```
	///
	/// Blocks without a braced `short` and `long` are skipped and recorded in
	/// [`DefinitionRegistry::diagnostics`]. When a key is declared twice the
	/// last declaration wins.
	pub fn parse(source: &str) -> Self {
		let mut walker = DefinitionWalker::new(source);
		walker.process();

		let mut registry = Self {
			definitions: HashMap::with_capacity(walker.definitions.len()),
			diagnostics: walker.diagnostics,
		};

		for (definition, line) in walker.definitions {
			let key = definition.key.clone();
			if registry.definitions.insert(key.clone(), definition).is_some() {
				tracing::warn!(line, key = %key, "acronym declared more than once, keeping the last");
				registry.diagnostics.push(DefinitionDiagnostic {
					kind: DefinitionDiagnosticKind::DuplicateKey,
					key: Some(key),
					line,
				});
			}
		}

		registry.diagnostics.sort_by_key(|diagnostic| diagnostic.line);
		tracing::debug!(
			count = registry.len(),
			skipped = registry.diagnostics.len(),
			"parsed acronym definitions"
		);

		registry
	}

	/// Parse `source`, failing on the first duplicate key when `policy` is
	/// [`DuplicatePolicy::Error`].
	pub fn parse_with_policy(source: &str, policy: DuplicatePolicy) -> AcroResult<Self> {
		let registry = Self::parse(source);

		if policy == DuplicatePolicy::Error {
			if let Some(diagnostic) = registry
				.diagnostics
				.iter()
				.find(|diagnostic| diagnostic.kind == DefinitionDiagnosticKind::DuplicateKey)
			{
				return Err(AcroError::DuplicateAcronym {
					key: diagnostic.key.clone().unwrap_or_default(),
				});
			}
		}

		Ok(registry)
	}

	/// Build a registry from definitions directly. Later entries replace
	/// earlier ones with the same key.
	pub fn from_definitions(definitions: impl IntoIterator<Item = AcronymDefinition>) -> Self {
		Self {
			definitions: definitions
				.into_iter()
				.map(|definition| (definition.key.clone(), definition))
				.collect(),
			diagnostics: vec![],
		}
	}

	pub fn get(&self, key: &str) -> Option<&AcronymDefinition> {
		self.definitions.get(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.definitions.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}

	/// All definitions sorted by key.
	pub fn iter(&self) -> impl Iterator<Item = &AcronymDefinition> {
		let mut definitions: Vec<_> = self.definitions.values().collect();
		definitions.sort_by(|a, b| a.key.cmp(&b.key));
		definitions.into_iter()
	}

	/// Blocks that were skipped or overridden while parsing, in source order.
	pub fn diagnostics(&self) -> &[DefinitionDiagnostic] {
		&self.diagnostics
	}
}
