#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("imdbq");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("lookup"))
        .stdout(predicate::str::contains("search"));
}

#[test]
fn test_lookup_missing_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("imdbq");
    cmd.arg("lookup")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<IMDB_ID>"));
}

#[test]
fn test_search_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("imdbq");
    cmd.args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--limit"))
        .stdout(predicate::str::contains("--types"));
}

#[test]
fn test_search_unknown_type() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("imdbq");
    cmd.args(["search", "Oz", "--types", "title_exact,name_popular"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown title category: name_popular"));
}

#[test]
fn test_search_invalid_limit() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("imdbq");
    cmd.args(["search", "Oz", "--limit", "many"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--limit"));
}

#[test]
fn test_config_set_then_show() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    // Act
    cargo_bin_cmd!("imdbq")
        .args(["--dir", dir_arg, "config", "set", "--default-locale", "de_DE", "--secure", "false"])
        .assert()
        .success();

    // Assert
    let written = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(written.contains("locale = \"de_DE\""));
    cargo_bin_cmd!("imdbq")
        .args(["--dir", dir_arg, "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Locale: de_DE"))
        .stdout(predicate::str::contains("Secure: false"));
}

#[test]
fn test_config_show_flag_override() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    // Act & Assert
    cargo_bin_cmd!("imdbq")
        .args(["--dir", dir_arg, "--locale", "ja_JP", "--insecure", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Locale: ja_JP"))
        .stdout(predicate::str::contains("Secure: false"));
}

#[test]
fn test_config_invalid_file() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[client\n").unwrap();

    // Act & Assert
    cargo_bin_cmd!("imdbq")
        .args(["--dir", dir.path().to_str().unwrap(), "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}
