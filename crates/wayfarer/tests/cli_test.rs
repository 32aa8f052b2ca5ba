//! Integration tests for the `wayfarer` CLI binary.
//!
//! Argument parsing, help output, completions, saved plans on a temp data
//! directory, and `explore` against wiremock stand-ins for the providers.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `wayfarer` binary with env isolation.
///
/// Clears every `WAYFARER_*` variable the CLI reads and points config
/// directories at a nonexistent path so tests never touch real config.
fn wayfarer_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("wayfarer");
    cmd.env("HOME", "/tmp/wayfarer-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/wayfarer-cli-test-nonexistent")
        .env("XDG_DATA_HOME", "/tmp/wayfarer-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("WAYFARER_OUTPUT")
        .env_remove("WAYFARER_TIMEOUT")
        .env_remove("WAYFARER_DATA_DIR")
        .env_remove("WAYFARER_DEFAULTS__YEAR")
        .env_remove("TICKETMASTER_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

/// A command whose saved plans live in `dir`.
fn plans_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = wayfarer_cmd();
    cmd.arg("--data-dir").arg(dir.path());
    cmd
}

/// A command whose providers all point at `server`.
fn provider_cmd(server: &MockServer, dir: &TempDir) -> assert_cmd::Command {
    let root = server.uri();
    let mut cmd = plans_cmd(dir);
    cmd.env("WAYFARER_PROVIDERS__NAGER_URL", format!("{root}/nager/"))
        .env("WAYFARER_PROVIDERS__RESTCOUNTRIES_URL", format!("{root}/restcountries/"))
        .env("WAYFARER_PROVIDERS__TICKETMASTER_URL", format!("{root}/ticketmaster/"))
        .env("WAYFARER_PROVIDERS__OPEN_METEO_URL", format!("{root}/open-meteo/"))
        .env("WAYFARER_PROVIDERS__SUNRISE_SUNSET_URL", format!("{root}/sunrise-sunset/"))
        .env("TICKETMASTER_API_KEY", "test-key");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn json_stdout(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

async fn mount_providers(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/nager/AvailableCountries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "countryCode": "DE", "name": "Germany" },
            { "countryCode": "DK", "name": "Denmark" }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/restcountries/alpha/DE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "name": { "common": "Germany", "official": "Federal Republic of Germany" },
            "cca2": "DE",
            "capital": ["Berlin"],
            "capitalInfo": { "latlng": [52.52, 13.4] },
            "region": "Europe",
            "population": 83_240_525,
            "area": 357_114.0,
            "timezones": ["UTC+01:00"]
        }])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/nager/PublicHolidays/2026/DE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "date": "2026-10-03",
            "localName": "Tag der Deutschen Einheit",
            "name": "German Unity Day",
            "countryCode": "DE",
            "types": ["Public"]
        }])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/nager/LongWeekend/2026/DE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ticketmaster/events.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/open-meteo/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "utc_offset_seconds": 3600,
            "current": { "temperature_2m": 11.2, "weather_code": 3 },
            "hourly": { "time": ["2026-03-14T10:00"], "temperature_2m": [11.0], "weather_code": [3] },
            "daily": {
                "time": ["2026-03-14"],
                "weather_code": [3],
                "temperature_2m_max": [13.0],
                "temperature_2m_min": [4.0]
            }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sunrise-sunset/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": {
                "sunrise": "2026-03-14T05:20:00+00:00",
                "sunset": "2026-03-14T17:05:00+00:00",
                "solar_noon": "2026-03-14T11:12:00+00:00",
                "day_length": 42300,
                "civil_twilight_begin": "2026-03-14T04:48:00+00:00",
                "civil_twilight_end": "2026-03-14T17:37:00+00:00"
            }
        })))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = wayfarer_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    wayfarer_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("holidays")
            .and(predicate::str::contains("explore"))
            .and(predicate::str::contains("plans"))
            .and(predicate::str::contains("countries")),
    );
}

#[test]
fn test_version_flag() {
    wayfarer_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wayfarer"));
}

#[test]
fn test_completions_zsh() {
    wayfarer_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_output_format() {
    let output = wayfarer_cmd()
        .args(["--output", "invalid", "plans", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    wayfarer_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]").and(predicate::str::contains("year = 2026")));
}

#[test]
fn test_config_path_points_at_toml() {
    wayfarer_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_bad_provider_url_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    plans_cmd(&dir)
        .env("WAYFARER_PROVIDERS__OPEN_METEO_URL", "not a url")
        .args(["countries"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("open_meteo_url"));
}

// ── Plans ───────────────────────────────────────────────────────────

#[test]
fn test_plans_start_empty() {
    let dir = TempDir::new().unwrap();
    plans_cmd(&dir)
        .args(["plans", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved plans."));
}

#[test]
fn test_plans_add_persists_and_dedups() {
    let dir = TempDir::new().unwrap();
    let add = [
        "plans", "add", "holiday", "--name", "German Unity Day", "--date", "2026-10-03",
        "--country", "Germany",
    ];

    plans_cmd(&dir)
        .args(add)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved to My Plans!"));
    plans_cmd(&dir)
        .args(add)
        .assert()
        .success()
        .stderr(predicate::str::contains("Plan already in My Plans!"));

    assert!(dir.path().join("myPlans.json").exists());

    let output = plans_cmd(&dir)
        .args(["--output", "json", "plans", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        json_stdout(&output),
        json!([{
            "type": "holiday",
            "name": "German Unity Day",
            "localName": "German Unity Day",
            "date": "2026-10-03",
            "country": "Germany"
        }])
    );
}

#[test]
fn test_plans_filter_by_kind() {
    let dir = TempDir::new().unwrap();
    plans_cmd(&dir)
        .args(["plans", "add", "event", "--name", "Jazz Night", "--city", "Berlin"])
        .assert()
        .success();
    plans_cmd(&dir)
        .args([
            "plans", "add", "long-weekend", "--date", "2026-04-03", "--end-date", "2026-04-06",
        ])
        .assert()
        .success();

    plans_cmd(&dir)
        .args(["--output", "plain", "plans", "list", "--filter", "longWeekend"])
        .assert()
        .success()
        .stdout(predicate::eq("2026-04-03\n"));

    plans_cmd(&dir)
        .args(["plans", "list", "--filter", "cruise"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown plan filter"));
}

#[test]
fn test_plans_remove_needs_confirmation() {
    let dir = TempDir::new().unwrap();
    plans_cmd(&dir)
        .args(["plans", "add", "event", "--name", "Jazz Night"])
        .assert()
        .success();

    plans_cmd(&dir)
        .args(["plans", "remove", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));

    plans_cmd(&dir)
        .args(["-y", "plans", "remove", "jazz night"])
        .assert()
        .success();
    plans_cmd(&dir)
        .args(["plans", "remove", "1"])
        .assert()
        .code(4);
}

#[test]
fn test_plans_clear_removes_the_file() {
    let dir = TempDir::new().unwrap();
    plans_cmd(&dir)
        .args(["plans", "add", "event", "--name", "Jazz Night"])
        .assert()
        .success();

    plans_cmd(&dir)
        .args(["--yes", "plans", "clear"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Cleared 1 plan(s)"));
    assert!(!dir.path().join("myPlans.json").exists());
}

// ── Providers ───────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_countries_search() {
    let server = MockServer::start().await;
    mount_providers(&server).await;
    let dir = TempDir::new().unwrap();

    provider_cmd(&server, &dir)
        .args(["--output", "plain", "countries", "--search", "ger"])
        .assert()
        .success()
        .stdout(predicate::eq("DE\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_explore_reports_each_view() {
    let server = MockServer::start().await;
    mount_providers(&server).await;
    let dir = TempDir::new().unwrap();

    let output = provider_cmd(&server, &dir)
        .args(["--output", "plain", "explore", "de"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "dashboard\tready");
    assert_eq!(lines[1], "holidays\tready");
    assert!(lines[2].starts_with("events\tfailed"), "{stdout}");
    assert_eq!(lines[4], "long_weekends\tempty");
    assert!(combined_output(&output).contains("Exploring Germany, Berlin!"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_explore_json_and_save() {
    let server = MockServer::start().await;
    mount_providers(&server).await;
    let dir = TempDir::new().unwrap();

    let output = provider_cmd(&server, &dir)
        .args([
            "--output", "json", "explore", "DE", "--only", "holidays", "--save", "holidays",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let body = json_stdout(&output);
    assert_eq!(body["selection"]["country"], "Germany");
    assert_eq!(body["holidays"]["status"], "ready");
    assert_eq!(body["holidays"]["data"]["holidays"][0]["name"], "German Unity Day");
    assert!(body.get("weather").is_none());
    assert!(combined_output(&output).contains("Saved 1 plan(s)"));

    plans_cmd(&dir)
        .args(["--output", "plain", "plans", "list"])
        .assert()
        .success()
        .stdout(predicate::eq("German Unity Day\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_explore_unknown_country() {
    let server = MockServer::start().await;
    mount_providers(&server).await;
    let dir = TempDir::new().unwrap();

    provider_cmd(&server, &dir)
        .args(["explore", "XX"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("country 'XX' not found"));
}
