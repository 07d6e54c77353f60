use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["fileName"], "gettext.po");
    assert_eq!(parsed["baseDirectory"], ".");
    assert_eq!(parsed["ignoreTestFiles"], true);
    assert_eq!(parsed["functionNames"]["gettext"], serde_json::json!(["msgid"]));
    assert_eq!(
        parsed["functionNames"]["dnpgettext"],
        serde_json::json!(["domain", "msgctxt", "msgid", "msgid_plural", "count"])
    );

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.init_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "\u{2713} Created .potgenrc.json\n");

    let content = test.read_file(".potgenrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".potgenrc.json", "{}")?;

    let output = test.init_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: .potgenrc.json already exists\n");
    assert_eq!(test.read_file(".potgenrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.init_command().output()?;
    test.write_file("src/app.tsx", "export const App = () => <h1>{gettext('Welcome')}</h1>;\n")?;

    // No --base-directory: the generated config makes references relative
    let output = test.command().args(["extract", "--stdout"]).output()?;
    assert!(
        output.status.success(),
        "Extract should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("#: src/app.tsx:1\nmsgid \"Welcome\"\n"));

    Ok(())
}
