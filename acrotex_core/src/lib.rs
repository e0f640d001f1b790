//! `acrotex_core` expands the acronym macros of the LaTeX `acro` package
//! into plain text. It tracks which acronyms have been introduced so the
//! first use renders in full and later uses render short, the same way the
//! package does when typesetting.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Definition source (\DeclareAcronym blocks)
//!   → DefinitionRegistry (key → short + long form, diagnostics for skipped blocks)
//! Document
//!   → Lexer (yields `\ac{key}`-style commands with byte spans, in order)
//!   → Engine (renders each command, updating the usage state)
//!   → Summary (sorted listing of used acronyms, spliced at the marker)
//! ```
//!
//! ## Commands
//!
//! | Command           | Output                                             | Introduces key |
//! | ----------------- | -------------------------------------------------- | -------------- |
//! | `\ac`, `\acp`     | `Long (SHORT)` the first time, `SHORT` afterwards  | yes            |
//! | `\acf`, `\acfp`   | always `Long (SHORT)`                              | yes            |
//! | `\acs`, `\acsp`   | always `SHORT`                                     | yes            |
//! | `\acl`, `\aclp`   | always `Long`                                      | no             |
//!
//! Plural spellings append `s` to each form. A leading capital (`\Ac`,
//! `\Acl`, ...) capitalizes the long form. Commands with an unknown key are
//! left exactly as written.
//!
//! ## Quick Start
//!
//! ```rust
//! use acrotex_core::DEFAULT_MARKER;
//! use acrotex_core::DefinitionRegistry;
//! use acrotex_core::convert;
//!
//! let registry = DefinitionRegistry::parse(
//! 	r"\DeclareAcronym{api}{
//! 		short = {API},
//! 		long  = {Application Programming Interface},
//! 		tag   = tech
//! 	}",
//! );
//!
//! let document = r"An \ac{api} is an \ac{api}.";
//! let conversion = convert(document, &registry, DEFAULT_MARKER);
//!
//! assert_eq!(
//! 	conversion.text,
//! 	"An Application Programming Interface (API) is an API."
//! );
//! assert_eq!(
//! 	conversion.listing,
//! 	r"\textbf{API}, Application Programming Interface"
//! );
//! ```

pub use config::*;
pub use engine::*;
pub use error::*;
pub use lexer::*;
pub use registry::*;
pub use summary::*;
pub use tokens::*;

pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
mod lexer;
mod registry;
mod summary;
mod tokens;

#[cfg(test)]
mod __fixtures;
