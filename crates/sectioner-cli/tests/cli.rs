use std::path::Path;
use std::process::Command;

/// Run the binary inside `home`, which also stands in for the user's home and
/// config directories so a developer's own config never leaks in.
fn sectioner(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sectioner"));
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

const DUMP: &str = "1. Cover\nwe pay for hospital stays\u{000C}this page has no heading\n";

#[test]
fn test_extract_text_dump_as_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("policy.txt");
    std::fs::write(&input, DUMP).unwrap();

    let out = sectioner(dir.path())
        .args(["extract", "--format", "jsonl"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8(out.stdout).unwrap();
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["title"], "1. Cover");
    assert_eq!(records[1]["title"], "General Information");
    assert_eq!(records[1]["page_number"], 2);
}

#[test]
fn test_extract_text_format_to_file_with_flags() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("policy.txt");
    let output = dir.path().join("sections.txt");
    std::fs::write(&input, DUMP).unwrap();

    let status = sectioner(dir.path())
        .args(["extract", "--format", "text", "--default-title", "Preamble"])
        .arg("--output")
        .arg(&output)
        .arg(&input)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Section 1: 1. Cover (Page 1)\nwe pay for hospital stays\n\n\
         Section 2: Preamble (Page 2)\nthis page has no heading\n\n"
    );
}

#[test]
fn test_config_file_sets_min_chars() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("policy.txt");
    let config = dir.path().join("custom.toml");
    std::fs::write(&input, DUMP).unwrap();
    std::fs::write(&config, "[sections]\nmin_text_chars = 24\n").unwrap();

    let out = sectioner(dir.path())
        .args(["extract", "--format", "jsonl", "--summary", "--config"])
        .arg(&config)
        .arg(&input)
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("hospital stays"));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Dropped (text too short): 1"));
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = sectioner(dir.path())
        .args(["extract", "nope.txt"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("File not found"));

    let out = sectioner(dir.path())
        .args(["validate", "nope.pdf"])
        .output()
        .unwrap();
    assert!(!out.status.success());
}

#[test]
fn test_validate_text_dump() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("policy.txt");
    std::fs::write(&input, DUMP).unwrap();
    let out = sectioner(dir.path())
        .arg("validate")
        .arg(&input)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).ends_with(": ok\n"));
}

#[test]
fn test_init_config_round_trips_through_extract() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("nested").join("sectioner.toml");

    let status = sectioner(dir.path())
        .arg("init-config")
        .arg(&config)
        .status()
        .unwrap();
    assert!(status.success());
    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("default_title = \"General Information\""));
    assert!(written.contains("max_title_words = 7"));

    // Refuses to clobber without --force
    let status = sectioner(dir.path())
        .arg("init-config")
        .arg(&config)
        .status()
        .unwrap();
    assert!(!status.success());

    let input = dir.path().join("policy.txt");
    std::fs::write(&input, DUMP).unwrap();
    let status = sectioner(dir.path())
        .args(["extract", "--config"])
        .arg(&config)
        .arg(&input)
        .status()
        .unwrap();
    assert!(status.success());
}

// dirs::config_dir follows XDG_CONFIG_HOME only on Linux
#[cfg(target_os = "linux")]
#[test]
fn test_platform_config_is_read_from_config_home() {
    let dir = tempfile::tempdir().unwrap();
    let platform = dir.path().join(".config").join("sectioner");
    std::fs::create_dir_all(&platform).unwrap();
    std::fs::write(
        platform.join("config.toml"),
        "[sections]\ndefault_title = \"Preamble\"\n",
    )
    .unwrap();
    let input = dir.path().join("policy.txt");
    std::fs::write(&input, DUMP).unwrap();

    let out = sectioner(dir.path())
        .args(["extract", "--format", "jsonl"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("\"title\":\"Preamble\""));
    assert!(!stdout.contains("General Information"));
}
