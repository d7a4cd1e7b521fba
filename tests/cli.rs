use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

/// 사용자 환경(설정 파일, 자격 증명)과 격리된 명령.
fn isolated_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("codepilot").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("GROQ_API_KEY")
        .env_remove("CODEPILOT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn review_without_credential_exits_before_any_action() {
    let home = TempDir::new().unwrap();
    isolated_cmd(&home)
        .args(["review", "--language", "python"])
        .write_stdin("print(1)\n")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(contains("GROQ_API_KEY not found in environment or .env file"));
}

#[test]
fn interactive_shell_also_requires_credential() {
    let home = TempDir::new().unwrap();
    isolated_cmd(&home)
        .write_stdin("/exit\n")
        .assert()
        .code(2)
        .stdout(contains("CodePilot interactive shell").not())
        .stderr(contains("GROQ_API_KEY"));
}

#[test]
fn config_reports_missing_credential_without_failing() {
    let home = TempDir::new().unwrap();
    isolated_cmd(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("\"resolved\": false"))
        .stdout(contains("\"env_var\": \"GROQ_API_KEY\""));
}

#[test]
fn config_never_prints_the_key() {
    let home = TempDir::new().unwrap();
    isolated_cmd(&home)
        .env("GROQ_API_KEY", "gsk_secret_value")
        .arg("config")
        .assert()
        .success()
        .stdout(contains("\"resolved\": true"))
        .stdout(contains("env:GROQ_API_KEY"))
        .stdout(contains("gsk_secret_value").not());
}

#[test]
fn dotenv_in_working_directory_supplies_the_key() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join(".env"), "GROQ_API_KEY=gsk_from_dotenv\n").unwrap();
    isolated_cmd(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("\"resolved\": true"))
        .stdout(contains("gsk_from_dotenv").not());
}

#[test]
fn unknown_language_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    isolated_cmd(&home)
        .args(["review", "--language", "cobol"])
        .assert()
        .failure()
        .stderr(contains("unknown language `cobol`"));
}

#[test]
fn blank_input_warns_without_calling_the_service() {
    let home = TempDir::new().unwrap();
    // 연결 불가 주소로도 경고만 나와야 한다.
    std::fs::create_dir_all(home.path().join(".codepilot")).unwrap();
    std::fs::write(
        home.path().join(".codepilot/config.json"),
        r#"{ "provider": { "api_base": "http://127.0.0.1:9" } }"#,
    )
    .unwrap();

    isolated_cmd(&home)
        .env("GROQ_API_KEY", "gsk_test")
        .arg("rewrite")
        .write_stdin("   \n\t\n")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(contains("warning: please paste code before rewriting."))
        .stderr(contains("network error").not());
}
