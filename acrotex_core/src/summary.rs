use crate::DefinitionRegistry;
use crate::UnknownCommand;
use crate::UsageState;
use crate::expand;

/// The placeholder the listing of used acronyms replaces by default.
pub const DEFAULT_MARKER: &str = r"\printacronyms[include=abbrev, heading=none]";

/// Build the listing of every used acronym.
///
/// Each entry is `\textbf{SHORT}, Long Form`. Entries are separated by a
/// blank line and sorted by short form, ignoring case. Returns an empty
/// string when nothing was used.
pub fn generate(used: &UsageState, registry: &DefinitionRegistry) -> String {
	let mut entries: Vec<_> = used
		.iter()
		.filter_map(|key| registry.get(key))
		.map(|definition| (definition.short.to_lowercase(), definition))
		.collect();

	entries.sort_by(|(a_sort, a), (b_sort, b)| a_sort.cmp(b_sort).then_with(|| a.key.cmp(&b.key)));

	entries
		.iter()
		.map(|(_, definition)| format!("\\textbf{{{}}}, {}", definition.short, definition.long))
		.collect::<Vec<_>>()
		.join("\n\n")
}

/// Replace every occurrence of `marker` in `text` with `listing`.
pub fn splice_listing(text: &str, marker: &str, listing: &str) -> String {
	if marker.is_empty() {
		return text.to_string();
	}

	text.replace(marker, listing)
}

/// Output of the full expand, list and splice pipeline.
#[derive(Debug, Clone)]
pub struct Conversion {
	/// The expanded document with the marker replaced.
	pub text: String,
	/// The generated listing, also spliced into `text`.
	pub listing: String,
	pub used: UsageState,
	pub unknown: Vec<UnknownCommand>,
}

/// Expand `document`, generate the listing of used acronyms and splice it
/// in place of `marker`.
///
/// The marker is replaced after expansion, so a listing is never itself
/// scanned for commands.
pub fn convert(document: &str, registry: &DefinitionRegistry, marker: &str) -> Conversion {
	let expansion = expand(document, registry);
	let listing = generate(&expansion.used, registry);
	let text = splice_listing(&expansion.text, marker, &listing);

	Conversion {
		text,
		listing,
		used: expansion.used,
		unknown: expansion.unknown,
	}
}
