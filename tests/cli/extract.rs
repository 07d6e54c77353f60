use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const HEADER: &str = r#"msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"
"Plural-Forms: nplurals = 2; plural = (n !== 1);\n"
"#;

#[test]
fn test_extract_writes_catalog() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.js",
        r#"// translators: greeting on the home page
gettext("Hello");
ngettext("One file", "%d files", n);
pgettext("menu", "Open");
"#,
    )?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Extracted 3 messages from 1 of 1 source file into gettext.po\n"
    );

    let expected = format!(
        r#"{HEADER}
# greeting on the home page
#: src/app.js:2
msgid "Hello"
msgstr ""

#: src/app.js:3
msgid "One file"
msgid_plural "%d files"
msgstr[0] ""
msgstr[1] ""

#: src/app.js:4
msgctxt "menu"
msgid "Open"
msgstr ""
"#
    );
    assert_eq!(test.read_file("gettext.po")?, expected);

    Ok(())
}

#[test]
fn test_extract_merges_references_across_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/b.jsx", "const el = <p>{gettext('Save')}</p>;\n")?;
    test.write_file("src/a.ts", "\n\nexport const label: string = gettext('Save');\n")?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let expected = format!(
        r#"{HEADER}
#: src/a.ts:3
#: src/b.jsx:1
msgid "Save"
msgstr ""
"#
    );
    assert_eq!(test.read_file("gettext.po")?, expected);

    Ok(())
}

#[test]
fn test_extract_is_deterministic() -> Result<()> {
    let test = CliTest::new()?;
    for i in 0..8 {
        test.write_file(
            &format!("src/file{i}.js"),
            &format!("gettext('Shared');\ngettext('Only {i}');\n"),
        )?;
    }

    test.extract_command().output()?;
    let first = test.read_file("gettext.po")?;
    test.extract_command().output()?;
    let second = test.read_file("gettext.po")?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_extract_to_stdout() -> Result<()> {
    let test = CliTest::with_file("app.js", "gettext('Hello');\n")?;

    let output = test.extract_command().arg("--stdout").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let expected = format!("{HEADER}\n#: app.js:1\nmsgid \"Hello\"\nmsgstr \"\"\n");
    assert_eq!(stdout(&output), expected);
    assert!(stderr(&output).contains("Extracted 1 message from 1 of 1 source file"));
    assert!(!test.root().join("gettext.po").exists());

    Ok(())
}

#[test]
fn test_extract_output_override() -> Result<()> {
    let test = CliTest::with_file("app.js", "gettext('Hello');\n")?;

    let output = test
        .extract_command()
        .args(["--output", "locale/messages.pot"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("into locale/messages.pot"));

    let catalog = test.read_file("locale/messages.pot")?;
    assert!(catalog.contains("msgid \"Hello\""));
    assert!(!test.root().join("gettext.po").exists());

    Ok(())
}

#[test]
fn test_extract_without_base_directory_keeps_full_paths() -> Result<()> {
    let test = CliTest::with_file("app.js", "gettext('Hello');\n")?;

    let output = test.command().args(["extract", "--stdout"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let reference = format!("#: {}/app.js:1\n", test.root().display());
    assert!(stdout(&output).contains(&reference));

    Ok(())
}

#[test]
fn test_extract_with_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".potgenrc.json",
        r#"{
          "functionNames": {
            "__": ["msgid"],
            "__n": ["msgid", "msgid_plural", "count"]
          },
          "fileName": "i18n/app.pot",
          "headers": {
            "Language": "pl",
            "Plural-Forms": "nplurals=3; plural=(n==1 ? 0 : n%10>=2 && n%10<=4 ? 1 : 2);"
          },
          "baseDirectory": "."
        }"#,
    )?;
    test.write_file(
        "src/app.ts",
        "__('Title');\n__n('%d file', '%d files', count);\ngettext('Not registered');\n",
    )?;

    let output = test.command().arg("extract").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let catalog = test.read_file("i18n/app.pot")?;
    assert!(catalog.contains("\"Language: pl\\n\"\n"));
    assert!(catalog.contains("\"Content-Type: text/plain; charset=UTF-8\\n\"\n"));
    assert!(catalog.contains("#: src/app.ts:1\nmsgid \"Title\"\n"));
    assert!(catalog.contains("msgstr[0] \"\"\nmsgstr[1] \"\"\nmsgstr[2] \"\"\n"));
    assert!(!catalog.contains("Not registered"));

    Ok(())
}

#[test]
fn test_extract_skips_ignored_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/app.js", "gettext('App');\n")?;
    test.write_file("src/app.test.js", "gettext('From test');\n")?;
    test.write_file("node_modules/lib/index.js", "gettext('From dependency');\n")?;
    test.write_file("src/types.d.ts", "declare function gettext(s: string): string;\n")?;

    let output = test.extract_command().arg("--stdout").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let catalog = stdout(&output);
    assert!(catalog.contains("msgid \"App\""));
    assert!(!catalog.contains("From test"));
    assert!(!catalog.contains("From dependency"));

    Ok(())
}

#[test]
fn test_extract_reports_parse_errors() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/ok.js", "gettext('Kept');\n")?;
    test.write_file("src/broken.js", "gettext('Lost'\n")?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(
        stderr(&output).contains("warning: 1 file(s) could not be parsed (use -v for details)")
    );
    assert!(test.read_file("gettext.po")?.contains("msgid \"Kept\""));

    let verbose = test.extract_command().arg("-v").output()?;
    assert!(stderr(&verbose).contains("broken.js - Failed to parse"));

    Ok(())
}

#[test]
fn test_extract_invalid_plural_forms() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".potgenrc.json",
        r#"{ "headers": { "plural-forms": "plural=(n != 1);" } }"#,
    )?;
    test.write_file("app.js", "ngettext('file', 'files', n);\n")?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid 'headers' in config"));
    assert!(!test.root().join("gettext.po").exists());

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;
    assert!(output.status.success());
    let help = stdout(&output);
    assert!(help.contains("extract"));
    assert!(help.contains("init"));

    Ok(())
}
