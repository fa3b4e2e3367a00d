//! Link, unlink, status and cure lifecycle tests

mod common;

use common::TestEnv;
use predicates::prelude::*;

fn env_with_source() -> TestEnv {
    let env = TestEnv::new();
    let assets = env.create_asset_dir("assets");
    env.populate_assets(&assets);
    env.agentry()
        .args(["add", assets.to_str().unwrap()])
        .assert()
        .success();
    env
}

#[test]
fn test_link_agent_creates_namespaced_symlink() {
    let env = env_with_source();
    env.agentry()
        .args(["link", "local.assets", "agents/reviewer.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Linked"));

    let link = env.target_dir.join("agents/local.assets-reviewer.md");
    let meta = link.symlink_metadata().expect("link exists");
    assert!(meta.file_type().is_symlink());
    assert_eq!(
        std::fs::read_to_string(&link).unwrap(),
        "# Reviewer\nReviews things.\n"
    );
}

#[test]
fn test_link_skill_creates_directory_with_skill_md() {
    let env = env_with_source();
    env.agentry()
        .args(["link", "local.assets", "skills/deploy/SKILL.md"])
        .assert()
        .success();

    let link = env.target_dir.join("skills/local.assets-deploy/SKILL.md");
    assert!(link.symlink_metadata().unwrap().file_type().is_symlink());
}

#[test]
fn test_link_batch_continues_past_failures() {
    let env = env_with_source();
    env.agentry()
        .args([
            "link",
            "local.assets",
            "agents/reviewer.md",
            "agents/no-such.md",
            "commands/ship.md",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such.md"));

    // Links before and after the failing one were still made and recorded
    assert!(env
        .target_dir
        .join("agents/local.assets-reviewer.md")
        .symlink_metadata()
        .is_ok());
    assert!(env
        .target_dir
        .join("commands/local.assets-ship.md")
        .symlink_metadata()
        .is_ok());
    let registry = env.read_registry();
    assert_eq!(registry["selections"].as_array().unwrap().len(), 2);
}

#[test]
fn test_link_rejects_mcp_config_bundle() {
    let env = env_with_source();
    env.agentry()
        .args(["link", "local.assets", "mcp.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be linked"));
}

#[test]
fn test_relink_is_idempotent() {
    let env = env_with_source();
    for _ in 0..2 {
        env.agentry()
            .args(["link", "local.assets", "agents/reviewer.md"])
            .assert()
            .success();
    }
    let registry = env.read_registry();
    assert_eq!(registry["selections"].as_array().unwrap().len(), 1);
}

#[test]
fn test_unlink_removes_link_and_record() {
    let env = env_with_source();
    env.agentry()
        .args(["link", "local.assets", "skills/deploy/SKILL.md"])
        .assert()
        .success();
    env.agentry()
        .args(["unlink", "local.assets", "skills/deploy/SKILL.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unlinked"));

    // Skill directory goes away with the link
    assert!(!env.target_dir.join("skills/local.assets-deploy").exists());
    let registry = env.read_registry();
    assert!(registry["selections"].as_array().unwrap().is_empty());
}

#[test]
fn test_unlink_batch_continues_past_failures() {
    let env = env_with_source();
    env.agentry()
        .args(["link", "local.assets", "agents/reviewer.md", "commands/ship.md"])
        .assert()
        .success();

    // Occupy the agent link path with a directory so its removal fails
    let agent_link = env.target_dir.join("agents/local.assets-reviewer.md");
    std::fs::remove_file(&agent_link).unwrap();
    std::fs::create_dir(&agent_link).unwrap();

    env.agentry()
        .args([
            "unlink",
            "local.assets",
            "agents/reviewer.md",
            "commands/ship.md",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reviewer.md"));

    // The sibling path was still processed and its removal persisted
    assert!(env
        .target_dir
        .join("commands/local.assets-ship.md")
        .symlink_metadata()
        .is_err());
    let registry = env.read_registry();
    let selections = registry["selections"].as_array().unwrap();
    assert_eq!(selections.len(), 1);
    assert_eq!(selections[0]["path"], "agents/reviewer.md");
}

#[test]
fn test_unlink_of_unlinked_asset_is_noop() {
    let env = env_with_source();
    env.agentry()
        .args(["unlink", "local.assets", "agents/reviewer.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to do"));
}

#[test]
fn test_status_reports_healthy_links() {
    let env = env_with_source();
    env.agentry()
        .args(["link", "local.assets", "agents/reviewer.md"])
        .assert()
        .success();
    env.agentry()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 healthy link"));
}

#[test]
fn test_status_reports_missing_source_file() {
    let env = env_with_source();
    env.agentry()
        .args(["link", "local.assets", "agents/reviewer.md"])
        .assert()
        .success();

    std::fs::remove_file(
        env.config_dir
            .join("sources/local.assets/agents/reviewer.md"),
    )
    .unwrap();

    env.agentry()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("missing_source"));
}

#[test]
fn test_status_reports_broken_symlink() {
    let env = env_with_source();
    env.agentry()
        .args(["link", "local.assets", "commands/ship.md"])
        .assert()
        .success();

    std::fs::remove_file(env.target_dir.join("commands/local.assets-ship.md")).unwrap();

    env.agentry()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("broken_symlink"));
}

#[test]
fn test_cure_removes_broken_links() {
    let env = env_with_source();
    env.agentry()
        .args(["link", "local.assets", "agents/reviewer.md"])
        .assert()
        .success();
    env.agentry()
        .args(["link", "local.assets", "commands/ship.md"])
        .assert()
        .success();

    std::fs::remove_file(
        env.config_dir
            .join("sources/local.assets/agents/reviewer.md"),
    )
    .unwrap();

    env.agentry()
        .arg("cure")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 broken link"));

    // The healthy link survives
    assert!(env
        .target_dir
        .join("commands/local.assets-ship.md")
        .symlink_metadata()
        .is_ok());
    assert!(env
        .target_dir
        .join("agents/local.assets-reviewer.md")
        .symlink_metadata()
        .is_err());
    let registry = env.read_registry();
    assert_eq!(registry["selections"].as_array().unwrap().len(), 1);
}

#[test]
fn test_cure_with_nothing_broken() {
    let env = env_with_source();
    env.agentry()
        .arg("cure")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to cure"));
}
