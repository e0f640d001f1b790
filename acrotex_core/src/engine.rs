use std::collections::HashSet;
use std::ops::Range;

use derive_more::Deref;

use crate::AcronymDefinition;
use crate::DefinitionRegistry;
use crate::Form;
use crate::Variant;
use crate::lexer::CommandLexer;
use crate::tokens::CommandToken;

/// Keys that have been introduced during an expansion pass.
///
/// A key enters the set when a short, full or default command renders it.
/// Long commands never add to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct UsageState(HashSet<String>);

impl UsageState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record `key` as introduced. Returns `true` if it wasn't already.
	pub fn mark(&mut self, key: &str) -> bool {
		if self.0.contains(key) {
			return false;
		}

		self.0.insert(key.to_string())
	}

	pub fn is_used(&self, key: &str) -> bool {
		self.0.contains(key)
	}

	/// The used keys in ascending order.
	pub fn into_sorted_keys(self) -> Vec<String> {
		let mut keys: Vec<_> = self.0.into_iter().collect();
		keys.sort();
		keys
	}
}

impl<S: Into<String>> FromIterator<S> for UsageState {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

/// A command left untouched because its key isn't defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand {
	/// The command exactly as written, e.g. `\ac{xyz}`.
	pub command: String,
	pub key: String,
	pub span: Range<usize>,
	/// 1-indexed line of the command.
	pub line: usize,
	/// 1-indexed column of the command.
	pub column: usize,
}

impl UnknownCommand {
	fn new(token: &CommandToken, document: &str) -> Self {
		let (line, column) = token.line_column(document);

		Self {
			command: token.source(document).to_string(),
			key: token.key.clone(),
			span: token.span.clone(),
			line,
			column,
		}
	}
}

/// Result of one expansion pass over a document.
#[derive(Debug, Clone)]
pub struct Expansion {
	/// The document with every known command replaced.
	pub text: String,
	/// Keys introduced during the pass.
	pub used: UsageState,
	/// Commands passed through because their key is undefined, in document
	/// order.
	pub unknown: Vec<UnknownCommand>,
	/// Number of commands scanned, known or not.
	pub commands: usize,
}

impl Expansion {
	pub fn into_parts(self) -> (String, UsageState) {
		(self.text, self.used)
	}
}

/// Upper-case the first character and lower-case the rest, so
/// `Application Programming Interface` becomes `Application programming
/// interface`.
pub fn capitalize(text: &str) -> String {
	let mut chars = text.chars();
	let Some(first) = chars.next() else {
		return String::new();
	};

	first
		.to_uppercase()
		.chain(chars.flat_map(char::to_lowercase))
		.collect()
}

/// Render a single command for `definition`.
///
/// `already_used` only matters for the default family: it switches the
/// output from `long (short)` to `short`.
pub fn render(variant: Variant, definition: &AcronymDefinition, already_used: bool) -> String {
	let suffix = if variant.plural { "s" } else { "" };
	let short = &definition.short;
	let long = || {
		if variant.capitalized {
			capitalize(&definition.long)
		} else {
			definition.long.clone()
		}
	};

	match variant.form {
		Form::Short => format!("{short}{suffix}"),
		Form::Long => format!("{}{suffix}", long()),
		Form::Default if already_used => format!("{short}{suffix}"),
		Form::Default | Form::Full => format!("{}{suffix} ({short}{suffix})", long()),
	}
}

/// Expand every acronym command in `document` with a fresh usage state.
pub fn expand(document: &str, registry: &DefinitionRegistry) -> Expansion {
	expand_with_state(document, registry, UsageState::new())
}

/// Expand every acronym command in `document`, continuing from `used`.
///
/// Use this when several documents should share "already introduced"
/// state, e.g. chapters expanded one after another.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = document.len()))]
pub fn expand_with_state(
	document: &str,
	registry: &DefinitionRegistry,
	mut used: UsageState,
) -> Expansion {
	let mut text = String::with_capacity(document.len());
	let mut unknown = Vec::new();
	let mut last_end = 0;
	let mut replaced = 0usize;
	let mut commands = 0usize;

	for token in CommandLexer::new(document) {
		commands += 1;
		text.push_str(&document[last_end..token.span.start]);
		last_end = token.span.end;

		let (Some(variant), Some(definition)) = (token.variant(), registry.get(&token.key)) else {
			text.push_str(token.source(document));
			unknown.push(UnknownCommand::new(&token, document));
			continue;
		};

		let already_used = variant.reads_usage() && used.is_used(&token.key);
		text.push_str(&render(variant, definition, already_used));
		replaced += 1;

		if variant.marks_used() {
			used.mark(&token.key);
		}
	}

	text.push_str(&document[last_end..]);

	tracing::debug!(
		replaced,
		unknown = unknown.len(),
		used = used.len(),
		"expanded acronym commands"
	);

	Expansion {
		text,
		used,
		unknown,
		commands,
	}
}
