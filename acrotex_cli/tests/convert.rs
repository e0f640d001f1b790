mod common;

use acrotex_core::AnyEmptyResult;

#[test]
fn convert_writes_expanded_document() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let (acronyms, input) = common::write_project(
		tmp.path(),
		"An \\ac{api} talks to the \\acs{cpu}.\nEvery \\ac{api} and \\Acl{cpu}.\n\n\\printacronyms[include=abbrev, heading=none]\n",
	)?;
	let output = tmp.path().join("out.tex");

	common::acrotex_cmd()
		.arg("convert")
		.arg("--path")
		.arg(tmp.path())
		.arg("-a")
		.arg(&acronyms)
		.arg("-i")
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.assert()
		.success()
		.stderr(predicates::str::contains("Loaded 2 acronyms"))
		.stdout(predicates::str::contains("processed text written to"));

	let content = std::fs::read_to_string(&output)?;
	assert_eq!(
		content,
		"An Application Programming Interface (API) talks to the CPU.\nEvery API and Central \
		 processing unit.\n\n\\textbf{API}, Application Programming Interface\n\n\\textbf{CPU}, \
		 Central Processing Unit\n"
	);

	Ok(())
}

#[test]
fn convert_prints_to_stdout_without_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let (acronyms, input) = common::write_project(tmp.path(), "\\acsp{api} and \\acp{api}\n")?;

	common::acrotex_cmd()
		.arg("convert")
		.arg("--path")
		.arg(tmp.path())
		.arg("-a")
		.arg(&acronyms)
		.arg("-i")
		.arg(&input)
		.assert()
		.success()
		.stdout(predicates::str::diff("APIs and APIs\n"));

	Ok(())
}

#[test]
fn convert_leaves_unknown_commands_and_warns() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let (acronyms, input) = common::write_project(tmp.path(), "\\ac{xyz} and \\ac{api}\n")?;

	common::acrotex_cmd()
		.arg("convert")
		.arg("--path")
		.arg(tmp.path())
		.arg("-a")
		.arg(&acronyms)
		.arg("-i")
		.arg(&input)
		.assert()
		.success()
		.stdout(predicates::str::diff(
			"\\ac{xyz} and Application Programming Interface (API)\n",
		))
		.stderr(predicates::str::contains("1 command(s) reference undefined acronyms"));

	Ok(())
}

#[test]
fn convert_dry_run_does_not_write() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let (acronyms, input) = common::write_project(tmp.path(), "\\ac{cpu}\n")?;
	let output = tmp.path().join("out.tex");

	common::acrotex_cmd()
		.arg("convert")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.arg("-a")
		.arg(&acronyms)
		.arg("-i")
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.assert()
		.success()
		.stdout(predicates::str::contains("Would expand"))
		.stdout(predicates::str::contains("+Central Processing Unit (CPU)"));

	assert!(!output.exists());

	Ok(())
}

#[test]
fn convert_uses_config_defaults() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let (_, input) = common::write_project(tmp.path(), "\\acf{api}\n%%LIST%%\n")?;
	std::fs::write(
		tmp.path().join("acrotex.toml"),
		"acronyms = \"acronyms.tex\"\nmarker = \"%%LIST%%\"\n",
	)?;

	common::acrotex_cmd()
		.arg("convert")
		.arg("--path")
		.arg(tmp.path())
		.arg("-i")
		.arg(&input)
		.assert()
		.success()
		.stdout(predicates::str::diff(
			"Application Programming Interface (API)\n\\textbf{API}, Application Programming \
			 Interface\n",
		));

	Ok(())
}

#[test]
fn convert_requires_definitions() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("doc.tex");
	std::fs::write(&input, "\\ac{api}\n")?;

	common::acrotex_cmd()
		.arg("convert")
		.arg("--path")
		.arg(tmp.path())
		.arg("-i")
		.arg(&input)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("no acronym definitions file given"));

	Ok(())
}

#[test]
fn convert_reports_missing_input() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let (acronyms, _) = common::write_project(tmp.path(), "")?;

	common::acrotex_cmd()
		.arg("convert")
		.arg("--path")
		.arg(tmp.path())
		.arg("-a")
		.arg(&acronyms)
		.arg("-i")
		.arg(tmp.path().join("missing.tex"))
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to read"));

	Ok(())
}

#[test]
fn convert_deny_duplicates_rejects_redeclared_keys() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let (acronyms, input) = common::write_project(tmp.path(), "\\ac{api}\n")?;
	let duplicated = format!(
		"{}\\DeclareAcronym{{api}}{{short = {{API}}, long = {{Another Interface}}}}\n",
		common::DEFINITIONS
	);
	std::fs::write(&acronyms, duplicated)?;

	common::acrotex_cmd()
		.arg("convert")
		.arg("--path")
		.arg(tmp.path())
		.arg("-a")
		.arg(&acronyms)
		.arg("-i")
		.arg(&input)
		.assert()
		.success()
		.stdout(predicates::str::diff("Another Interface (API)\n"));

	common::acrotex_cmd()
		.arg("convert")
		.arg("--deny-duplicates")
		.arg("--path")
		.arg(tmp.path())
		.arg("-a")
		.arg(&acronyms)
		.arg("-i")
		.arg(&input)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("duplicate acronym `api`"));

	Ok(())
}
