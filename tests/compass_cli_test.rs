use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

struct Fixture {
    tmp: TempDir,
    config: PathBuf,
    vault: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let tmp = tempdir().expect("tempdir");
        let vault = tmp.path().join("vault");
        let config = tmp.path().join("compass/config.json");
        fs::create_dir_all(config.parent().expect("parent")).expect("mkdir config dir");
        let body = format!(
            "{{\n  // copied from config.example.json\n  \"obsidian_path\": {:?},\n  \"user\": {{ \"name\": \"Robin\" }},\n}}\n",
            vault.display().to_string()
        );
        fs::write(&config, body).expect("write config");
        Self { tmp, config, vault }
    }

    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("compass");
        cmd.current_dir(self.tmp.path())
            .env("HOME", self.tmp.path())
            .env("COMPASS_CONFIG_PATH", &self.config)
            .env_remove("COMPASS_VAULT_PATH")
            .env_remove("COMPASS_HOME")
            .env_remove("COMPASS_LOG");
        cmd
    }

    fn write_course(&self, date: &str, text: &str) {
        let path = self.vault.join(format!("navigation/{date}_course.md"));
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir navigation");
        fs::write(path, text).expect("write course");
    }
}

fn only_entry(dir: &Path) -> PathBuf {
    let entries: Vec<_> = fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("entry").path())
        .collect();
    assert_eq!(entries.len(), 1, "expected one entry in {}", dir.display());
    entries.into_iter().next().expect("entry")
}

#[test]
fn missing_config_fails_with_remediation_and_creates_nothing() {
    let tmp = tempdir().expect("tempdir");
    let missing = tmp.path().join("nowhere/config.json");

    assert_cmd::cargo::cargo_bin_cmd!("compass")
        .current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("COMPASS_CONFIG_PATH", &missing)
        .env_remove("COMPASS_VAULT_PATH")
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"))
        .stderr(predicate::str::contains("1. copy config.example.json to config.json"))
        .stderr(predicate::str::contains("2. edit config.json"));

    assert!(!tmp.path().join("nowhere").exists());
}

#[test]
fn init_bootstraps_once_and_status_hints_at_the_starter_course() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created starter course navigation/"))
        .stdout(predicate::str::contains("seeded template template/course-template.md"));
    assert!(fx.vault.join("harbor/frameworks").is_dir());
    assert!(fx.vault.join("charts").is_dir());

    fx.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("vault already initialized"));

    fx.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello Robin"))
        .stdout(predicate::str::contains("sounding=no"))
        .stdout(predicate::str::contains("hint: run `compass navigation`"));
}

#[test]
fn json_flag_prints_the_whole_report() {
    let fx = Fixture::new();
    let out = fx
        .cmd()
        .args(["--json", "status"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&out).expect("json report");
    assert_eq!(report["command"], "status");
    assert_eq!(report["ok"], true);
    assert_eq!(report["data"]["course_exists"], false);
}

#[test]
fn same_title_twice_appends_to_one_card() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["card", "--title", "Rust: ownership!", "--content", "first"])
        .args(["--tag", "rust", "--tag", "#memory"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));
    fx.cmd()
        .args(["card", "--title", "Rust: ownership!", "--content", "second"])
        .assert()
        .success()
        .stdout(predicate::str::contains("appended"));

    let day = only_entry(&fx.vault.join("logbook"));
    let card = only_entry(&day.join("insights"));
    let name = card.file_name().and_then(|n| n.to_str()).expect("name");
    assert!(name.starts_with("Rust ownership_"), "{name}");

    let text = fs::read_to_string(&card).expect("read card");
    assert!(text.starts_with("# Rust: ownership!\n"));
    assert!(text.contains("#memory #rust"));
    assert!(text.contains("first"));
    assert!(text.contains("## Update"));
    assert!(text.trim_end().ends_with("second"));
}

#[test]
fn fleeting_cards_go_to_their_own_folder() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["card", "--title", "idea", "--content", "x", "--type", "fleeting"])
        .assert()
        .success();

    let day = only_entry(&fx.vault.join("logbook"));
    only_entry(&day.join("fleeting"));
    assert!(!day.join("insights").exists());
}

#[test]
fn navigation_drafts_sounding_from_latest_course_and_records_focus() {
    let fx = Fixture::new();
    fx.write_course("2020-01-01", "## Task\nShip v1\n## Focus\n- Embedded Rust\n");

    fx.cmd()
        .arg("navigation")
        .assert()
        .success()
        .stdout(predicate::str::contains("focus=Embedded Rust"));

    let sounding = only_entry(&fx.vault.join("charts"));
    let text = fs::read_to_string(&sounding).expect("read sounding");
    assert!(text.contains("## Focus\n- Embedded Rust\n"));
    assert!(text.contains("\n---\nGenerated: "));

    let state = fs::read_to_string(fx.tmp.path().join("compass/.state.json")).expect("state");
    let state: serde_json::Value = serde_json::from_str(&state).expect("state json");
    assert_eq!(state["current_focus"][0], "Embedded Rust");

    let audit = fs::read_to_string(fx.tmp.path().join("compass/logs/audit.log")).expect("audit");
    assert!(audit.lines().any(|l| l.contains("\"phase\":\"navigation\"")));
}

#[test]
fn course_carries_over_and_fills_summary() {
    let fx = Fixture::new();
    fx.write_course(
        "2020-01-01",
        "## Task\nShip v1\n## Focus\nAPI design\n## Note\nPrefer small PRs\n",
    );

    fx.cmd()
        .args(["course", "--summary", "Drafted the API", "--next", "Review it"])
        .assert()
        .success();

    let today = fs::read_dir(fx.vault.join("navigation"))
        .expect("navigation")
        .map(|e| e.expect("entry").path())
        .find(|p| !p.ends_with("2020-01-01_course.md"))
        .expect("today's course");
    let text = fs::read_to_string(today).expect("read course");
    assert!(text.contains("Ship v1"));
    assert!(text.contains("API design"));
    assert!(text.contains("Prefer small PRs"));
    assert!(text.contains("Drafted the API"));
    assert!(text.contains("Review it"));
    assert!(text.contains("_sounding.md"));
}

#[test]
fn context_prints_snapshot_json() {
    let fx = Fixture::new();
    fx.write_course("2020-01-01", "## Task\nShip v1\n---\n## Today's Summary\nDone\n");
    fs::create_dir_all(fx.vault.join("harbor/frameworks")).expect("mkdir");
    fs::write(fx.vault.join("harbor/frameworks/swot.md"), "# SWOT analysis\nbody\n").expect("write");

    let out = fx
        .cmd()
        .arg("context")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let ctx: serde_json::Value = serde_json::from_slice(&out).expect("context json");
    assert_eq!(ctx["task"], "Ship v1");
    assert_eq!(ctx["last_summary"], "Done");
    assert_eq!(ctx["output_preferences"]["style"], "professional");
    assert_eq!(ctx["output_preferences"]["use_emoji"], false);
    assert_eq!(ctx["analysis_templates"][0]["name"], "swot");
    assert_eq!(ctx["analysis_templates"][0]["description"], "SWOT analysis");
}

#[test]
fn views_print_json_and_reject_bad_input() {
    let fx = Fixture::new();
    fx.write_course("2020-01-01", "## Task\nT\n");

    fx.cmd()
        .args(["view", "user"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Robin\""))
        .stdout(predicate::str::contains("\"version\": \"1.0.0\""));

    fx.cmd()
        .args(["view", "course", "2020-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"task\": \"T\""));

    fx.cmd()
        .args(["view", "map", "--date", "2020-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"exists\": false"));

    fx.cmd()
        .args(["view", "chart", "2020-13-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));

    fx.cmd()
        .args(["view", "chart", "2020-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    fx.cmd()
        .args(["view", "harbor-file", "gossip", "a.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid harbor category"));

    fx.cmd()
        .args(["view", "harbor-file", "concepts", "../secret.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid filename"));
}

#[test]
fn vault_path_env_overrides_config() {
    let fx = Fixture::new();
    let other = fx.tmp.path().join("other-vault");

    fx.cmd()
        .env("COMPASS_VAULT_PATH", &other)
        .arg("init")
        .assert()
        .success();
    assert!(other.join("navigation").is_dir());
    assert!(!fx.vault.exists());
}

#[test]
fn status_notes_enabled_api_without_key_but_succeeds() {
    let fx = Fixture::new();
    let body = format!(
        "{{ \"obsidian_path\": {:?}, \"api\": {{ \"enabled\": true, \"provider\": \"anthropic\" }} }}",
        fx.vault.display().to_string()
    );
    fs::write(&fx.config, body).expect("rewrite config");

    fx.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("api=anthropic"))
        .stdout(predicate::str::contains(
            "note: api.enabled is true but api.api_key is empty",
        ));
}

#[test]
fn status_reports_unreadable_scratch_state_as_issue() {
    let fx = Fixture::new();
    fs::write(fx.tmp.path().join("compass/.state.json"), "{ not json").expect("write state");

    fx.cmd()
        .arg("status")
        .assert()
        .failure()
        .stdout(predicate::str::contains("issue: scratch state unreadable"))
        .stderr(predicate::str::contains("status reported issues"));
}

#[cfg(unix)]
#[test]
fn failed_card_append_keeps_earlier_content() {
    let fx = Fixture::new();
    let long_body = "earlier note line\n".repeat(240);

    fx.cmd()
        .args(["card", "--title", "Big", "--content", &long_body])
        .assert()
        .success();
    let day = only_entry(&fx.vault.join("logbook"));
    let card = only_entry(&day.join("insights"));
    let before = fs::read(&card).expect("read card");
    assert!(before.len() > 4096, "card is {} bytes", before.len());

    // The file-size limit is below the card's current size, so the append fails.
    let status = std::process::Command::new("sh")
        .arg("-c")
        .arg("trap '' XFSZ; ulimit -f 2; exec \"$0\" card --title Big --content more")
        .arg(env!("CARGO_BIN_EXE_compass"))
        .current_dir(fx.tmp.path())
        .env("HOME", fx.tmp.path())
        .env("COMPASS_CONFIG_PATH", &fx.config)
        .env_remove("COMPASS_VAULT_PATH")
        .env_remove("COMPASS_HOME")
        .env_remove("COMPASS_LOG")
        .output()
        .expect("run limited append");
    assert!(!status.status.success());

    let after = fs::read(&card).expect("reread card");
    assert_eq!(after, before);
}
