use assert_cmd::Command;
use linkshelf::util::test_backend::test_session;
use predicates::prelude::*;
use rstest::*;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Isolated config + session files for one run of the binary
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("config.toml"), "").expect("config file");
        Self { dir }
    }

    fn signed_in() -> Self {
        let ws = Self::new();
        let session = serde_json::to_string(&test_session("user-1")).expect("session json");
        fs::write(ws.session_file(), session).expect("session file");
        ws
    }

    fn session_file(&self) -> PathBuf {
        self.dir.path().join("session.json")
    }

    fn run_args(&self, api_url: &str, args: &[&str]) -> Command {
        let mut cmd = self.command(api_url);
        cmd.args(args);
        cmd
    }

    fn command(&self, api_url: &str) -> Command {
        let mut cmd = Command::cargo_bin("linkshelf").expect("binary");
        cmd.arg("--no-color")
            .arg("-c")
            .arg(self.dir.path().join("config.toml"))
            .env("LINKSHELF_API_URL", api_url)
            .env("LINKSHELF_API_KEY", "anon-key")
            .env("LINKSHELF_SESSION_FILE", self.session_file())
            .env_remove("LINKSHELF_TABLE")
            .env_remove("LINKSHELF_TIMEOUT_MS");
        cmd
    }
}

const UNUSED_API: &str = "http://127.0.0.1:9";

#[rstest]
fn test_debug_mode() {
    let ws = Workspace::new();
    ws.command(UNUSED_API)
        .args(["-d", "-d"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Debug mode: debug"));
}

#[rstest]
fn test_generate_config() {
    let ws = Workspace::new();
    ws.command(UNUSED_API)
        .arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("api_url"))
        .stdout(predicate::str::contains("table = \"bookmarks\""));
}

#[rstest]
fn test_generate_config_ignores_broken_settings() {
    let ws = Workspace::new();
    fs::write(ws.dir.path().join("config.toml"), "api_url = [").expect("config file");
    ws.command(UNUSED_API)
        .env("LINKSHELF_TIMEOUT_MS", "soon")
        .arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("timeout_ms = 10000"));
}

#[rstest]
fn test_broken_config_file_is_usage_error() {
    let ws = Workspace::new();
    fs::write(ws.dir.path().join("config.toml"), "api_url = [").expect("config file");
    ws.command(UNUSED_API)
        .arg("list")
        .assert()
        .code(64)
        .stderr(predicate::str::contains("Failed to load settings"));
}

#[rstest]
#[case("bash")]
#[case("zsh")]
#[case("fish")]
fn test_completion(#[case] shell: &str) {
    let ws = Workspace::new();
    ws.command(UNUSED_API)
        .args(["completion", shell])
        .assert()
        .success()
        .stdout(predicate::str::contains("linkshelf"));
}

#[rstest]
fn test_list_without_session_exits_noperm() {
    let ws = Workspace::new();
    ws.command(UNUSED_API)
        .arg("list")
        .assert()
        .code(77)
        .stderr(predicate::str::contains("Not signed in"));
}

#[rstest]
fn test_add_relative_url_is_usage_error() {
    let ws = Workspace::signed_in();
    ws.command(UNUSED_API)
        .args(["add", "example.com"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("Invalid URL"));
}

#[rstest]
fn test_logout_without_session_succeeds() {
    let ws = Workspace::new();
    ws.command(UNUSED_API)
        .arg("logout")
        .assert()
        .success()
        .stderr(predicate::str::contains("Signed out"));
}

#[rstest]
fn test_whoami_prints_user() {
    let ws = Workspace::signed_in();
    ws.command(UNUSED_API)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("user-1\tuser-1@example.com"));
}

async fn run(mut cmd: Command) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .expect("task")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_renders_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/bookmarks"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "b", "url": "https://b.example", "title": "Bee", "created_at": "2024-05-02T00:00:00Z"},
            {"id": "a", "url": "https://a.example", "created_at": "2024-05-01T00:00:00Z"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let ws = Workspace::signed_in();
    run(ws.run_args(&server.uri(), &["list"]))
        .await
        .success()
        .stderr(predicate::str::contains("Bookmarks"))
        .stderr(predicate::str::is_match(r"(?s)1\. Bee \[b\].*2\. https://a\.example \[a\]").unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_empty_shows_empty_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/bookmarks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let ws = Workspace::signed_in();
    run(ws.run_args(&server.uri(), &["list"]))
        .await
        .success()
        .stderr(predicate::str::contains("No bookmarks yet. Add your first one!"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_json_goes_to_stdout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/bookmarks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "url": "https://a.example", "created_at": "2024-05-01T00:00:00Z"}
        ])))
        .mount(&server)
        .await;

    let ws = Workspace::signed_in();
    run(ws.run_args(&server.uri(), &["list", "--json"]))
        .await
        .success()
        .stdout(predicate::str::contains("\"url\": \"https://a.example\""));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_add_rejected_exits_quietly() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/bookmarks"))
        .respond_with(ResponseTemplate::new(403).set_body_string("row-level security"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/bookmarks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let ws = Workspace::signed_in();
    run(ws.run_args(&server.uri(), &["add", "https://example.com"]))
        .await
        .code(69)
        .stderr(predicate::str::contains("Error").not());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_delete_refetches_even_when_delete_fails() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/bookmarks"))
        .and(query_param("id", "eq.a"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/bookmarks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "url": "https://a.example", "created_at": "2024-05-01T00:00:00Z"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let ws = Workspace::signed_in();
    run(ws.run_args(&server.uri(), &["delete", "a"]))
        .await
        .code(69)
        .stderr(predicate::str::contains("https://a.example"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_login_saves_session_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt",
            "refresh_token": "r1",
            "expires_at": 4102444800_i64,
            "user": {"id": "u-42", "email": "me@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ws = Workspace::new();
    let mut cmd = ws.run_args(&server.uri(), &["login", "-e", "me@example.com"]);
    cmd.write_stdin("secret\n");
    run(cmd)
        .await
        .success()
        .stderr(predicate::str::contains("Signed in as me@example.com"));

    let saved = fs::read_to_string(ws.session_file()).expect("session saved");
    assert!(saved.contains("u-42"));
}
