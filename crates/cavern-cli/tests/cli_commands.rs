//! Integration tests for the `cavern` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cavern() -> Command {
    Command::cargo_bin("cavern").unwrap()
}

/// A story file whose only choice points at a missing scene.
fn broken_story(dir: &TempDir) -> String {
    let path = dir.path().join("broken.json");
    fs::write(
        &path,
        r#"{
  "opening": "start",
  "scenes": [
    {
      "id": "start",
      "body": {
        "fixed": {
          "text": "A door.",
          "outcome": { "choices": [ { "label": "Open", "target": "nowhere" } ] }
        }
      }
    }
  ]
}"#,
    )
    .unwrap();
    path.to_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_builtin_story() {
    cavern()
        .arg("check")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("All checks passed")
                .and(predicate::str::contains("15 scenes, 2 gated, 3 endings")),
        );
}

#[test]
fn check_reports_dangling_target() {
    let dir = TempDir::new().unwrap();
    let story = broken_story(&dir);
    cavern()
        .args(["check", "--story", &story])
        .assert()
        .failure()
        .stderr(predicate::str::contains("references unknown scene nowhere"));
}

#[test]
fn check_reports_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();
    cavern()
        .args(["check", "--story", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("story format error"));
}

#[test]
fn check_missing_file() {
    cavern()
        .args(["check", "--story", "/nonexistent/story.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// scenes
// ---------------------------------------------------------------------------

#[test]
fn scenes_lists_gates() {
    cavern()
        .arg("scenes")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("narrowPassage")
                .and(predicate::str::contains("torch"))
                .and(predicate::str::contains("rope"))
                .and(predicate::str::contains("ending (victory)")),
        );
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

#[test]
fn exported_json_checks_clean() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("story.json");
    cavern()
        .args(["export", "json", "-o", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let content = fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["opening"], "opening");

    cavern()
        .args(["check", "--story", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("15 scenes"));
}

#[test]
fn export_markdown() {
    cavern()
        .args(["export", "markdown"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("## narrowPassage")
                .and(predicate::str::contains("### With torch"))
                .and(predicate::str::contains("**Congratulations!**")),
        );
}

#[test]
fn export_unsupported_format() {
    cavern()
        .args(["export", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported format"));
}

// ---------------------------------------------------------------------------
// walk
// ---------------------------------------------------------------------------

#[test]
fn walk_torch_path_to_treasure() {
    cavern()
        .args(["walk", "0", "2", "1", "0", "0"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("notify: torch added to inventory!")
                .and(predicate::str::contains("phase:     finished (victory)"))
                .and(predicate::str::contains("inventory: [torch]")),
        );
}

#[test]
fn walk_without_torch_dies_in_the_passage() {
    cavern()
        .args(["walk", "0", "1", "0"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ending: You Died / You couldn't make it")
                .and(predicate::str::contains("without a torch"))
                .and(predicate::str::contains("finished (defeat)")),
        );
}

#[test]
fn walk_with_rope_crosses_the_road() {
    cavern()
        .args(["walk", "0", "1", "1", "0", "--item", "rope"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Continue your journey")
                .and(predicate::str::contains("finished (victory)")),
        );
}

#[test]
fn walk_decline_all_stays_put() {
    cavern()
        .args(["walk", "0", "--decline-all"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("notify: Action canceled")
                .and(predicate::str::contains("scene:     whisper")),
        );
}

#[test]
fn walk_rejects_out_of_range_choice() {
    cavern()
        .args(["walk", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn walk_json_transcript() {
    let output = cavern().args(["walk", "--json"]).output().unwrap();
    assert!(output.status.success());

    let transcript: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(transcript["state"]["scene"], "whisper");
    assert_eq!(transcript["state"]["phase"], "awaiting_choice");
    assert_eq!(transcript["directives"][0]["directive"], "backdrop");
}

// ---------------------------------------------------------------------------
// play & inventory
// ---------------------------------------------------------------------------

#[test]
fn play_picks_up_torch_and_saves_it() {
    let dir = TempDir::new().unwrap();
    let save_dir = dir.path().to_str().unwrap();

    cavern()
        .args(["play", "--fast", "--save-dir", save_dir])
        .write_stdin("1\ny\n3\ni\nq\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("EXPLORE")
                .and(predicate::str::contains("torch added to inventory!"))
                .and(predicate::str::contains("Inventory: torch")),
        );

    cavern()
        .args(["inventory", "show", "--save-dir", save_dir])
        .assert()
        .success()
        .stdout(predicate::str::contains("- torch"));

    cavern()
        .args(["inventory", "clear", "--save-dir", save_dir])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 item(s)"));

    cavern()
        .args(["inventory", "show", "--save-dir", save_dir])
        .assert()
        .success()
        .stdout(predicate::str::contains("No items saved"));
}

#[test]
fn play_to_the_treasure() {
    let dir = TempDir::new().unwrap();
    cavern()
        .args(["play", "--fast", "--save-dir", dir.path().to_str().unwrap()])
        .write_stdin("1\ny\n3\n2\n1\ny\n1\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Congratulations!")
                .and(predicate::str::contains("You just found the legendary treasure!")),
        );
}

#[test]
fn play_again_from_the_end_screen() {
    let dir = TempDir::new().unwrap();
    let assert = cavern()
        .args(["play", "--fast", "--save-dir", dir.path().to_str().unwrap()])
        .write_stdin("1\ny\n3\n2\n2\ny\nr\ni\nq\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("You Died")
                .and(predicate::str::contains("Without the rope"))
                .and(predicate::str::contains("Press 'r' to play again"))
                .and(predicate::str::contains("Your pockets are empty.")),
        );

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.matches("A young man wakes up").count(), 2);
    assert!(!dir.path().join("inventory.json").exists());
}

#[test]
fn play_quits_from_the_end_screen() {
    let dir = TempDir::new().unwrap();
    let assert = cavern()
        .args(["play", "--fast", "--save-dir", dir.path().to_str().unwrap()])
        .write_stdin("1\ny\n2\n1\ny\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You Died"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.matches("A young man wakes up").count(), 1);
}

#[test]
fn play_declined_confirmation_is_canceled() {
    let dir = TempDir::new().unwrap();
    cavern()
        .args(["play", "--fast", "--save-dir", dir.path().to_str().unwrap()])
        .write_stdin("2\nn\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Action canceled"));
}

#[test]
fn play_restart_forgets_saved_torch() {
    let dir = TempDir::new().unwrap();
    let save_dir = dir.path().to_str().unwrap();
    fs::write(dir.path().join("inventory.json"), r#"["torch"]"#).unwrap();

    cavern()
        .args(["play", "--fast", "--restart", "--save-dir", save_dir])
        .write_stdin("i\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Your pockets are empty."));

    assert!(!dir.path().join("inventory.json").exists());
}

#[test]
fn play_rejects_bad_input_without_crashing() {
    let dir = TempDir::new().unwrap();
    cavern()
        .args(["play", "--fast", "--save-dir", dir.path().to_str().unwrap()])
        .write_stdin("torch\n9\nq\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("not a choice: torch")
                .and(predicate::str::contains("out of range")),
        );
}
