use std::path::Path;
use std::path::PathBuf;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub const DEFINITIONS: &str = r"\DeclareAcronym{api}{
    short = {API},
    long  = {Application Programming Interface},
    tag   = tech
}

\DeclareAcronym{cpu}{
    short = {CPU},
    long  = {Central Processing Unit},
    tag   = hardware
}
";

pub fn acrotex_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("acrotex"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("ACROTEX_LOG");
	cmd
}

/// Write `acronyms.tex` and `doc.tex` into `dir`, returning both paths.
pub fn write_project(dir: &Path, document: &str) -> std::io::Result<(PathBuf, PathBuf)> {
	let acronyms = dir.join("acronyms.tex");
	let input = dir.join("doc.tex");
	std::fs::write(&acronyms, DEFINITIONS)?;
	std::fs::write(&input, document)?;

	Ok((acronyms, input))
}
