use logos::Logos;
use logos::SpannedIter;

use crate::tokens::CommandToken;

/// Raw tokens produced by logos for a flat scan of the document. Anything
/// that isn't an acronym command is a lexer error and gets skipped.
#[derive(Logos, Debug, PartialEq)]
enum RawToken {
	#[regex(r"\\[aA]c[sfl]?p?\{[^}]+\}")]
	Command,
}

/// Yields every acronym command in a document, in order, with byte spans.
///
/// Matches never overlap. A key runs to the first `}` and may contain
/// newlines, so `\ac{a\ac{b}` is a single command with the key `a\ac{b`.
pub struct CommandLexer<'a> {
	document: &'a str,
	inner: SpannedIter<'a, RawToken>,
}

impl<'a> CommandLexer<'a> {
	pub fn new(document: &'a str) -> Self {
		Self {
			document,
			inner: RawToken::lexer(document).spanned(),
		}
	}
}

impl Iterator for CommandLexer<'_> {
	type Item = CommandToken;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			let (result, span) = self.inner.next()?;
			let Ok(RawToken::Command) = result else {
				continue;
			};

			let slice = &self.document[span.clone()];
			// The regex guarantees the shape `\name{key}`.
			let Some(open) = slice.find('{') else {
				continue;
			};

			return Some(CommandToken {
				spelling: slice[1..open].to_string(),
				key: slice[open + 1..slice.len() - 1].to_string(),
				span,
			});
		}
	}
}

/// Collect every command in `document`.
pub fn tokenize(document: &str) -> Vec<CommandToken> {
	CommandLexer::new(document).collect()
}
