//! 대화형 쉘의 입력 폼 상태와 `/command` 파싱.

use crate::domain::snippet::{Language, SourceSnippet};

/// 화면 폼에 해당하는 현재 입력값(언어 선택 + 코드 본문).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub language: Language,
    pub code: String,
}

impl FormState {
    pub fn snippet(&self) -> SourceSnippet {
        SourceSnippet::new(self.code.clone(), self.language)
    }

    pub fn line_count(&self) -> usize {
        self.code.lines().count()
    }

    /// 폼 상태를 바꾸는 명령만 적용한다. 액션/종료 명령은 무시한다.
    pub fn apply(&mut self, command: &ShellCommand) {
        match command {
            ShellCommand::Language(language) => self.language = *language,
            ShellCommand::Paste(Some(code)) => self.code = code.clone(),
            ShellCommand::Clear => self.code.clear(),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Language(Language),
    /// `None`이면 `/end`까지 이어지는 여러 줄 입력을 읽어야 한다.
    Paste(Option<String>),
    Review,
    Rewrite,
    Show,
    Clear,
    Help,
    Exit,
}

pub const PASTE_TERMINATOR: &str = "/end";

pub const HELP_LINES: [(&str, &str); 8] = [
    ("/lang <name>", "select language (Python, Java, C++, JavaScript, C, Other)"),
    ("/paste [code]", "paste code; multi-line input ends with a line `/end`"),
    ("/review", "review the pasted code"),
    ("/rewrite", "rewrite the pasted code"),
    ("/show", "show current language and code"),
    ("/clear", "clear the pasted code"),
    ("/help", "show this help"),
    ("/exit", "exit interactive shell"),
];

pub fn parse_shell_command(input: &str) -> Result<ShellCommand, String> {
    let input = input.trim();
    if !input.starts_with('/') {
        return Err("slash command only. paste code with /paste".to_string());
    }

    let (head, rest) = match input.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (input, ""),
    };

    let no_args = |command: ShellCommand| {
        if rest.is_empty() {
            Ok(command)
        } else {
            Err(format!("{head} takes no arguments"))
        }
    };

    match head {
        "/lang" | "/language" => {
            if rest.is_empty() {
                return Err("usage: /lang <name>".to_string());
            }
            rest.parse::<Language>()
                .map(ShellCommand::Language)
                .map_err(|err| err.to_string())
        }
        "/paste" => Ok(ShellCommand::Paste(
            (!rest.is_empty()).then(|| rest.to_string()),
        )),
        "/review" => no_args(ShellCommand::Review),
        "/rewrite" => no_args(ShellCommand::Rewrite),
        "/show" => no_args(ShellCommand::Show),
        "/clear" => no_args(ShellCommand::Clear),
        "/help" => no_args(ShellCommand::Help),
        "/exit" | "/quit" => no_args(ShellCommand::Exit),
        other => Err(format!("unknown command: {other}")),
    }
}

/// 여러 줄 붙여넣기 한 줄이 종료 표시인지 판단한다.
pub fn is_paste_terminator(line: &str) -> bool {
    line.trim() == PASTE_TERMINATOR
}
