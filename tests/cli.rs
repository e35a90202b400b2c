use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mmp"))
}

fn temp_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn xml_mode_renders_code_panel_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = temp_file(&dir, "page.html", "<p><math><mn>1</mn></math></p>\n");

    let output = Command::new(bin_path())
        .arg(&input)
        .output()
        .expect("run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("WIRISplugins.js?viewer=image"));
    assert!(stdout.contains("<pre class='language-xml"));
    assert!(stdout.contains("&lt;/math&gt;</code></pre>"));
}

#[test]
fn preview_reads_stdin() {
    let mut child = Command::new(bin_path())
        .arg("--preview")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"<img src=\"f.png\" alt=\"x squared\">")
        .expect("write stdin");

    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim_end(),
        "<img src=\"f.png\" alt=\"x squared\" title=\"x squared\">"
    );
}

#[test]
fn escaped_input_is_only_highlighted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = temp_file(&dir, "code.txt", "&lt;IMG src=x&gt;");

    let output = Command::new(bin_path())
        .args(["--escaped", "--mode", "image"])
        .arg(&input)
        .output()
        .expect("run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<pre class='language-xml"));
    assert!(stdout.trim_end().ends_with("&lt;IMG src=x&gt;</code></pre>"));
}

#[test]
fn settings_file_selects_save_mode() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = temp_file(&dir, "settings.toml", "save_mode = \"base64\"\n");
    let input = temp_file(&dir, "page.html", "<p><img alt=a></p>");

    let output = Command::new(bin_path())
        .arg("--config")
        .arg(&config)
        .arg(&input)
        .output()
        .expect("run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("WIRISplugins.js"));
    assert!(stdout.contains("&lt;img alt=a&gt;</code></pre>"));
}

#[test]
fn invalid_settings_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = temp_file(&dir, "settings.toml", "save_mode = \"svg\"\n");
    let input = temp_file(&dir, "page.html", "<p></p>");

    let output = Command::new(bin_path())
        .arg("--config")
        .arg(&config)
        .arg(&input)
        .output()
        .expect("run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid settings file"));
}

#[test]
fn unknown_mode_is_rejected() {
    let output = Command::new(bin_path())
        .args(["--mode", "png", "missing.html"])
        .output()
        .expect("run");

    assert!(!output.status.success());
}
