//! `codepilot` 대화형 쉘(REPL) 인터페이스.

use std::future::Future;
use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::application::usecases::run_action::spawn_action;
use crate::domain::error::{ActionError, DispatchError};
use crate::domain::snippet::ActionKind;
use crate::interface::cli::composition::AppComposition;
use crate::interface::cli::form::{
    FormState, HELP_LINES, PASTE_TERMINATOR, ShellCommand, is_paste_terminator,
    parse_shell_command,
};
use crate::interface::cli::progress::wait_with_indicator;

const BOX_WIDTH: usize = 58;

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// 대화형 입력으로 `/command`를 처리한다.
pub async fn run_repl(composition: &AppComposition) -> Result<()> {
    print_welcome(composition);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut form = FormState::default();

    loop {
        print_prompt(&form)?;
        let next = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(raw_input) = next else {
            println!();
            break;
        };
        let input = raw_input.trim();
        if input.is_empty() {
            continue;
        }

        let command = match parse_shell_command(input) {
            Ok(ShellCommand::Paste(None)) => {
                eprintln!(
                    "paste code, then finish with a line containing only {PASTE_TERMINATOR}"
                );
                match read_paste_block(&mut lines, tokio::signal::ctrl_c()).await? {
                    Some(code) => ShellCommand::Paste(Some(code)),
                    None => {
                        println!();
                        composition.reporter().warning("paste cancelled; code unchanged.");
                        continue;
                    }
                }
            }
            Ok(command) => command,
            Err(msg) => {
                composition.reporter().error(&msg);
                eprintln!("hint: type /help to list commands");
                continue;
            }
        };

        if let Flow::Exit = handle_command(composition, &mut form, command).await {
            break;
        }
    }

    Ok(())
}

/// 명령 1건을 현재 폼 상태에 대해 처리한다.
async fn handle_command(
    composition: &AppComposition,
    form: &mut FormState,
    command: ShellCommand,
) -> Flow {
    let reporter = composition.reporter();
    form.apply(&command);

    match command {
        ShellCommand::Exit => return Flow::Exit,
        ShellCommand::Language(language) => {
            reporter.status("form", &format!("language set to {language}"));
        }
        ShellCommand::Paste(_) => {
            reporter.status("form", &format!("{} line(s) of code captured", form.line_count()));
        }
        ShellCommand::Clear => reporter.status("form", "code cleared"),
        ShellCommand::Show => print_form(form),
        ShellCommand::Help => print_help(),
        ShellCommand::Review => run_action(composition, form, ActionKind::Review).await,
        ShellCommand::Rewrite => run_action(composition, form, ActionKind::Rewrite).await,
    }
    Flow::Continue
}

async fn run_action(composition: &AppComposition, form: &FormState, kind: ActionKind) {
    let handle = spawn_action(composition.run_action_usecase(), kind, form.snippet());
    let reporter = composition.reporter();

    match wait_with_indicator(handle, true).await {
        Ok(display) => reporter.raw(&composition.render(&display)),
        Err(ActionError::Dispatch(DispatchError::Cancelled)) => {
            reporter.warning(&format!("{kind} cancelled."));
        }
        Err(err) if err.is_warning() => reporter.warning(&err.to_string()),
        Err(err) => reporter.error(&err.to_string()),
    }
}

/// `/end` 줄(또는 EOF)까지 읽은 줄들을 그대로 이어 붙인다.
/// `interrupt`가 먼저 끝나면 붙여넣기를 버리고 `None`을 돌려준다.
async fn read_paste_block<R, I>(lines: &mut Lines<R>, interrupt: I) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    I: Future,
{
    tokio::pin!(interrupt);
    let mut block: Vec<String> = Vec::new();
    loop {
        let next = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut interrupt => return Ok(None),
        };
        match next {
            Some(line) if is_paste_terminator(&line) => break,
            Some(line) => block.push(line),
            None => break,
        }
    }
    Ok(Some(block.join("\n")))
}

fn print_prompt(form: &FormState) -> Result<()> {
    print!("codepilot[{}]> ", form.language);
    io::stdout().flush()?;
    Ok(())
}

fn print_form(form: &FormState) {
    println!("Language: {}", form.language);
    if form.snippet().is_blank() {
        println!("Code: (empty)");
        return;
    }
    println!("Code ({} line(s)):", form.line_count());
    for (idx, line) in form.code.lines().enumerate() {
        println!("{:>4} | {line}", idx + 1);
    }
}

fn print_help() {
    for (usage, description) in HELP_LINES {
        println!("  {usage:<16} {description}");
    }
}

fn print_welcome(composition: &AppComposition) {
    let interactive = io::stdout().is_terminal();
    if interactive {
        // 대화형 터미널에서는 시작 화면을 지우고 배너를 출력한다.
        print!("\x1b[2J\x1b[H");
    }

    let border = format!("+{}+", "-".repeat(BOX_WIDTH + 2));
    let row = |text: &str, ansi: &str| {
        let fitted = pad_display(&fit_box_line(text, BOX_WIDTH), BOX_WIDTH);
        println!("| {} |", paint(&fitted, ansi, interactive));
    };

    println!("{border}");
    row("CodePilot interactive shell", "1;36");
    row("AI code review & rewrite", "2;37");
    println!("{border}");
    row("Status Dashboard", "0");
    for line in build_startup_dashboard_lines(composition) {
        row(&line, "0");
    }
    println!("{border}");
    row("Quick start", "0");
    row(" 1) /lang <name>", "1;33");
    row(" 2) /paste  ...  /end", "1;32");
    row(" 3) /review  or  /rewrite", "1;35");
    row(" 4) /help  /exit", "1;31");
    println!("{border}");
    println!();
}

fn paint(text: &str, ansi: &str, interactive: bool) -> String {
    if interactive {
        format!("\x1b[{ansi}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn build_startup_dashboard_lines(composition: &AppComposition) -> Vec<String> {
    match composition.inspect_config_usecase().execute() {
        Ok(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(value) => dashboard_lines(&value, composition.client_name()),
            Err(err) => vec![format!("Config: invalid inspection output ({err})")],
        },
        Err(err) => vec![
            "Config: error".to_string(),
            format!("detail: {err}"),
            "hint: run `codepilot config` to inspect and fix".to_string(),
        ],
    }
}

fn dashboard_lines(value: &Value, client_name: &str) -> Vec<String> {
    let text = |pointer: &str, fallback: &'static str| {
        value
            .pointer(pointer)
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string()
    };

    let loaded_count = value
        .get("loaded_paths")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    let timeout = value
        .pointer("/effective/request_timeout_secs")
        .and_then(Value::as_u64)
        .map(|secs| format!("{secs}s"))
        .unwrap_or_else(|| "n/a".to_string());
    let resolved = value
        .pointer("/credential/resolved")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let credential = if resolved {
        format!("ok ({})", text("/credential/source", "unknown"))
    } else {
        "missing".to_string()
    };

    vec![
        format!("Config: ok (loaded files: {loaded_count})"),
        format!("Provider: {client_name} ({})", text("/effective/api_base", "-")),
        format!("Model: {}", text("/effective/model", "-")),
        format!("Credential: {credential}"),
        format!("Timeout: {timeout}"),
    ]
}

/// 표시 폭 기준으로 잘라 `...`을 붙인다.
fn fit_box_line(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return ".".repeat(width);
    }

    let mut head = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 3 {
            break;
        }
        head.push(ch);
        used += w;
    }
    format!("{head}...")
}

fn pad_display(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::application::config::Config;
    use crate::application::usecases::run_action::tests::{Behavior, SilentReporter, StubClient};
    use crate::domain::snippet::Language;

    fn stub_composition(stub: Arc<StubClient>) -> AppComposition {
        AppComposition::with_client(Config::default(), stub, Arc::new(SilentReporter))
    }

    #[tokio::test]
    async fn review_on_empty_form_never_calls_the_service() {
        let stub = StubClient::new(Behavior::Reply("unused"));
        let app = stub_composition(stub.clone());
        let mut form = FormState::default();

        let flow = handle_command(&app, &mut form, ShellCommand::Review).await;
        assert_eq!(flow, Flow::Continue);
        let flow = handle_command(&app, &mut form, ShellCommand::Rewrite).await;
        assert_eq!(flow, Flow::Continue);
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn review_uses_current_form_state() {
        let stub = StubClient::new(Behavior::Reply("## Low Priority Issues\n- naming"));
        let app = stub_composition(stub.clone());
        let mut form = FormState::default();

        handle_command(&app, &mut form, ShellCommand::Language(Language::Java)).await;
        handle_command(
            &app,
            &mut form,
            ShellCommand::Paste(Some("class A {}".to_string())),
        )
        .await;
        handle_command(&app, &mut form, ShellCommand::Review).await;

        assert_eq!(stub.call_count(), 1);
        let request = stub.last_request();
        assert!(request.user_content().unwrap().contains("class A {}"));
        assert!(request.user_content().unwrap().contains("Java"));
    }

    #[tokio::test]
    async fn exit_ends_the_shell_and_clear_keeps_language() {
        let stub = StubClient::new(Behavior::Reply("unused"));
        let app = stub_composition(stub);
        let mut form = FormState {
            language: Language::C,
            code: "int x;".to_string(),
        };

        assert_eq!(
            handle_command(&app, &mut form, ShellCommand::Clear).await,
            Flow::Continue
        );
        assert!(form.code.is_empty());
        assert_eq!(form.language, Language::C);
        assert_eq!(
            handle_command(&app, &mut form, ShellCommand::Exit).await,
            Flow::Exit
        );
    }

    #[tokio::test]
    async fn paste_block_stops_at_terminator() {
        let input: &[u8] = b"def f():\n    return 1\n/end\n/review\n";
        let mut lines = BufReader::new(input).lines();

        let block = read_paste_block(&mut lines, std::future::pending::<()>())
            .await
            .unwrap();
        assert_eq!(block.as_deref(), Some("def f():\n    return 1"));
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("/review"));
    }

    #[tokio::test]
    async fn paste_block_is_abandoned_on_interrupt() {
        // 쓰기 쪽을 열어 둔 채로 두면 입력이 끝나지 않는다.
        let (_writer, reader) = tokio::io::duplex(64);
        let mut lines = BufReader::new(reader).lines();

        let block = read_paste_block(&mut lines, tokio::time::sleep(Duration::from_millis(10)))
            .await
            .unwrap();
        assert_eq!(block, None);
    }

    #[test]
    fn fit_box_line_uses_display_width() {
        assert_eq!(fit_box_line("short", 10), "short");
        assert_eq!(fit_box_line("abcdefghijk", 8), "abcde...");
        // 한글은 폭 2로 계산된다.
        assert_eq!(fit_box_line("가나다라마", 7), "가나...");
        assert_eq!(fit_box_line("abc", 2), "..");
    }

    #[test]
    fn pad_display_fills_to_width() {
        assert_eq!(pad_display("ab", 4), "ab  ");
        assert_eq!(pad_display("가", 4), "가  ");
        assert_eq!(pad_display("toolong", 3), "toolong");
    }

    #[test]
    fn dashboard_reports_credential_source_without_key() {
        let value = json!({
            "loaded_paths": ["/tmp/a.json"],
            "effective": {
                "model": "llama-3.3-70b-versatile",
                "api_base": "https://api.groq.com/openai/v1",
                "request_timeout_secs": 60
            },
            "credential": { "env_var": "GROQ_API_KEY", "source": "env:GROQ_API_KEY", "resolved": true }
        });

        let lines = dashboard_lines(&value, "Groq");
        assert_eq!(lines[0], "Config: ok (loaded files: 1)");
        assert_eq!(lines[1], "Provider: Groq (https://api.groq.com/openai/v1)");
        assert_eq!(lines[2], "Model: llama-3.3-70b-versatile");
        assert_eq!(lines[3], "Credential: ok (env:GROQ_API_KEY)");
        assert_eq!(lines[4], "Timeout: 60s");
    }

    #[test]
    fn dashboard_tolerates_missing_fields() {
        let lines = dashboard_lines(&json!({}), "Groq");
        assert!(lines.contains(&"Credential: missing".to_string()));
        assert!(lines.contains(&"Timeout: n/a".to_string()));
    }
}
