use assert_cmd::Command;
use std::time::Duration;
use tempfile::tempdir;

fn decorate_js_cli() -> Command {
  assert_cmd::cargo::cargo_bin_cmd!("decorate-js-cli")
}

#[test]
fn transforms_stdin_to_stdout() {
  let assert = decorate_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--experimental-decorators")
    .arg("true")
    .write_stdin("@sealed class A {}")
    .assert()
    .success()
    .code(0);

  assert_eq!(
    String::from_utf8_lossy(&assert.get_output().stdout),
    r#"import{__decorate}from"tslib";class A{}A=__decorate([sealed],A);"#
  );
  assert!(
    assert.get_output().stderr.is_empty(),
    "expected stderr to be empty, got: {}",
    String::from_utf8_lossy(&assert.get_output().stderr)
  );
}

#[test]
fn flags_override_config_file() {
  let dir = tempdir().unwrap();
  let config = dir.path().join("decorate.json");
  std::fs::write(
    &config,
    r#"{"experimentalDecorators": true, "helperModule": "./from-config.js"}"#,
  )
  .unwrap();

  let assert = decorate_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--config")
    .arg(&config)
    .arg("--helper-module")
    .arg("./from-flag.js")
    .write_stdin("@D class A {}")
    .assert()
    .success();

  let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
  assert!(stdout.contains(r#"from"./from-flag.js""#), "got: {stdout}");
  assert!(stdout.contains("__decorate"), "got: {stdout}");
}

#[test]
fn reads_input_file_and_writes_output_file() {
  let dir = tempdir().unwrap();
  let input = dir.path().join("input.js");
  let output = dir.path().join("output.js");
  std::fs::write(&input, "@D class A { @F x; }").unwrap();

  decorate_js_cli()
    .timeout(Duration::from_secs(5))
    .arg(&input)
    .arg("--output")
    .arg(&output)
    .arg("--metadata")
    .arg("false")
    .assert()
    .success();

  let written = std::fs::read_to_string(&output).unwrap();
  assert!(written.starts_with(r#"import{__esDecorate,__runInitializers}from"tslib";"#), "got: {written}");
}

#[test]
fn canonical_output_is_line_separated() {
  let assert = decorate_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--experimental-decorators")
    .arg("true")
    .arg("--canonical")
    .write_stdin("@D class A {}")
    .assert()
    .success();

  let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
  assert_eq!(stdout.lines().count(), 3, "got: {stdout}");
}

#[test]
fn transform_diagnostics_go_to_stderr() {
  let assert = decorate_js_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin("class A {\n  @D [key] = 1;\n}")
    .assert()
    .failure()
    .code(1);

  assert!(assert.get_output().stdout.is_empty());
  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(stderr.contains("error[DECO0001]"), "got: {stderr}");
  assert!(stderr.contains("<stdin>:2:"), "got: {stderr}");
}

#[test]
fn syntax_errors_are_rendered() {
  let assert = decorate_js_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin("class {")
    .assert()
    .failure()
    .code(1);

  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(stderr.contains("error[PARSE"), "got: {stderr}");
}

#[test]
fn trace_writes_json_events_to_stderr() {
  let assert = decorate_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--trace")
    .write_stdin("@D class A {}")
    .assert()
    .success();

  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  let first = stderr.lines().next().expect("trace output");
  let event: serde_json::Value = serde_json::from_str(first).expect("JSON trace line");
  assert!(event.get("level").is_some());
}
