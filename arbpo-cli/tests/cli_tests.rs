use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn arbpo_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("arbpo"))
}

const SOURCE: &str = r#"{
  "greeting": "Hi {name}",
  "@greeting": {
    "description": "Greets the user",
    "placeholders": { "name": { "example": "Bob" } }
  },
  "items": "{count, plural, =1{one item} other{# items}}",
  "@items": { "placeholders": { "count": {} } }
}"#;

const TRANSLATED: &str = r#"{
  "greeting": "Salut {name}",
  "items": "{count, plural, =0{aucun} other{# objets}}"
}"#;

#[test]
fn test_export_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("app_en.arb");
    let translated = temp_dir.path().join("app_fr.arb");
    fs::write(&source, SOURCE).unwrap();
    fs::write(&translated, TRANSLATED).unwrap();

    let output = arbpo_cmd()
        .args([
            "export",
            source.to_str().unwrap(),
            translated.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("msgid \"\"\nmsgstr \"\"\n\"Plural-Forms: nplurals=4;"));
    assert!(stdout.contains("#. Greets the user\n#. Parameter 1: name (example: Bob)\n#, c-format\n"));
    assert!(stdout.contains("msgid \"Hi %1$s\"\nmsgstr \"Salut %1$s\"\n"));
    assert!(stdout.contains("msgctxt \"items\"!\nmsgid \"one item\"\nmsgid_plural \"%1$s items\"\n"));
    assert!(stdout.contains("msgstr[0] \"aucun\"\n"));
    assert!(stdout.contains("msgstr[3] \"%1$s objets\"\n"));
}

#[test]
fn test_export_then_import_files() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("app_en.arb");
    let translated = temp_dir.path().join("app_fr.arb");
    let po = temp_dir.path().join("fr.po");
    let back = temp_dir.path().join("app_fr_back.arb");
    fs::write(&source, SOURCE).unwrap();
    fs::write(&translated, TRANSLATED).unwrap();

    let status = arbpo_cmd()
        .args([
            "export",
            source.to_str().unwrap(),
            translated.to_str().unwrap(),
            "-o",
            po.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let output = arbpo_cmd()
        .args([
            "import",
            po.to_str().unwrap(),
            "-o",
            back.to_str().unwrap(),
            "--locale",
            "fr",
        ])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let content = fs::read_to_string(&back).unwrap();
    assert!(content.starts_with("{\n  \"@@locale\": \"fr\",\n"));
    assert!(content.contains("\"greeting\": \"Salut {name}\""));
    assert!(content.contains("\"items\": \"{count, plural, =0 {aucun} other {{count} objets}}\""));
}

#[test]
fn test_import_to_stdout_with_indent() {
    let temp_dir = TempDir::new().unwrap();
    let po = temp_dir.path().join("fr.po");
    fs::write(
        &po,
        "#, no-c-format\nmsgctxt \"foo\"\nmsgid \"bar\"\nmsgstr \"baz\"\n",
    )
    .unwrap();

    let output = arbpo_cmd()
        .args(["import", po.to_str().unwrap(), "--indent", "4"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "{\n    \"foo\": \"baz\"\n}\n"
    );
}

#[test]
fn test_convert_infers_direction() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("app_en.arb");
    let pot = temp_dir.path().join("messages.pot");
    fs::write(&source, SOURCE).unwrap();

    let output = arbpo_cmd()
        .args([
            "convert",
            "-i",
            source.to_str().unwrap(),
            "-o",
            pot.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let content = fs::read_to_string(&pot).unwrap();
    assert!(content.contains("msgid \"Hi %1$s\"\nmsgstr \"\"\n"));
}

#[test]
fn test_convert_rejects_unknown_extension() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("strings.xml");
    fs::write(&input, "<resources/>").unwrap();

    let output = arbpo_cmd()
        .args([
            "convert",
            "-i",
            input.to_str().unwrap(),
            "-o",
            temp_dir.path().join("out.po").to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: unknown format"));
}

#[test]
fn test_malformed_plural_fails_unless_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("app_en.arb");
    fs::write(
        &source,
        r#"{
  "broken": "{n, plural, =1{one} other{many}",
  "@broken": { "placeholders": { "n": {} } },
  "fine": "ok"
}"#,
    )
    .unwrap();

    let output = arbpo_cmd()
        .args(["export", source.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: conversion error: cannot export message `broken`"));
    assert!(stderr.contains("caused by: plural syntax error"));

    let output = arbpo_cmd()
        .args(["export", source.to_str().unwrap(), "--skip-invalid"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("broken"));
    assert!(stdout.contains("msgctxt \"fine\""));
}

#[test]
fn test_missing_input_reports_error() {
    let temp_dir = TempDir::new().unwrap();
    let output = arbpo_cmd()
        .args([
            "import",
            temp_dir.path().join("missing.po").to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error: I/O error"));
}
