use std::fmt::Display;
use std::ops::Range;

/// The four command families. Each decides how a key renders and whether
/// rendering it introduces the key for later default renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form {
	/// `\ac`: full form on first use, short form afterwards.
	Default,
	/// `\acs`: always the short form.
	Short,
	/// `\acl`: always the long form.
	Long,
	/// `\acf`: always `long (short)`.
	Full,
}

/// Rendering descriptor for one command spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant {
	pub form: Form,
	/// Append `s` to every rendered form.
	pub plural: bool,
	/// Capitalize the long form. The short form is never touched.
	pub capitalized: bool,
}

/// Every recognized spelling, without the leading backslash.
pub const SPELLINGS: [&str; 16] = [
	"ac", "acp", "acf", "acfp", "acl", "aclp", "acs", "acsp", "Ac", "Acp", "Acf", "Acfp", "Acl",
	"Aclp", "Acs", "Acsp",
];

impl Variant {
	pub const fn new(form: Form, plural: bool, capitalized: bool) -> Self {
		Self {
			form,
			plural,
			capitalized,
		}
	}

	/// Look up the descriptor for a command spelling such as `acp` or `Acl`.
	/// Returns `None` for anything outside the sixteen recognized spellings.
	pub fn from_spelling(spelling: &str) -> Option<Self> {
		let (capitalized, rest) = match spelling.strip_prefix('A') {
			Some(rest) => (true, rest),
			None => (false, spelling.strip_prefix('a')?),
		};

		let (form, plural) = match rest {
			"c" => (Form::Default, false),
			"cp" => (Form::Default, true),
			"cf" => (Form::Full, false),
			"cfp" => (Form::Full, true),
			"cl" => (Form::Long, false),
			"clp" => (Form::Long, true),
			"cs" => (Form::Short, false),
			"csp" => (Form::Short, true),
			_ => return None,
		};

		Some(Self::new(form, plural, capitalized))
	}

	/// Whether rendering this variant introduces the key. Only the long
	/// family leaves the usage state alone.
	pub fn marks_used(self) -> bool {
		!matches!(self.form, Form::Long)
	}

	/// Whether the rendered text depends on the usage state.
	pub fn reads_usage(self) -> bool {
		matches!(self.form, Form::Default)
	}
}

impl Display for Variant {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let lead = if self.capitalized { 'A' } else { 'a' };
		let family = match self.form {
			Form::Default => "",
			Form::Short => "s",
			Form::Long => "l",
			Form::Full => "f",
		};
		let plural = if self.plural { "p" } else { "" };

		write!(f, "{lead}c{family}{plural}")
	}
}

/// One `\<spelling>{<key>}` occurrence found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandToken {
	/// The spelling without the backslash, e.g. `Acp`.
	pub spelling: String,
	/// The raw key between the braces. It is not trimmed.
	pub key: String,
	/// Byte range of the whole command in the document.
	pub span: Range<usize>,
}

impl CommandToken {
	/// The rendering descriptor for this token. The lexer only produces
	/// recognized spellings, so this is always `Some` for lexed tokens.
	pub fn variant(&self) -> Option<Variant> {
		Variant::from_spelling(&self.spelling)
	}

	/// The original command text as it appears in the document.
	pub fn source<'a>(&self, document: &'a str) -> &'a str {
		&document[self.span.clone()]
	}

	/// 1-indexed line and column of the command's backslash.
	pub fn line_column(&self, document: &str) -> (usize, usize) {
		let before = &document[..self.span.start];
		let line = before.matches('\n').count() + 1;
		let line_start = before.rfind('\n').map_or(0, |index| index + 1);
		let column = before[line_start..].chars().count() + 1;

		(line, column)
	}
}

impl Display for CommandToken {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "\\{}{{{}}}", self.spelling, self.key)
	}
}
