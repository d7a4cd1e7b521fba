//! 콘솔 리포터 포트 구현 어댑터.
//!
//! 진행 상황은 stderr로 보내고 stdout은 렌더링된 결과 전용으로 남긴다.

use std::io::{self, IsTerminal, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};

use crate::application::ports::Reporter;

/// 콘솔 전용 리포터 어댑터.
pub struct ConsoleReporter {
    tty: bool,
    quiet: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ConsoleReporter {
    /// `quiet`이면 section/kv/status를 생략하고 경고·오류만 출력한다.
    pub fn new(quiet: bool) -> Self {
        Self {
            tty: io::stderr().is_terminal(),
            quiet,
        }
    }

    fn line(&self, text: &str) {
        let _ = write_line(&mut io::stderr().lock(), self.tty, text);
    }
}

/// 터미널이면 현재 줄(대기 표시 등)을 먼저 지우고 한 줄을 쓴다.
fn write_line<W: Write>(out: &mut W, tty: bool, text: &str) -> io::Result<()> {
    if tty {
        queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    }
    writeln!(out, "{text}")?;
    out.flush()
}

impl Reporter for ConsoleReporter {
    fn section(&self, name: &str) {
        if self.quiet {
            return;
        }
        self.line("");
        let line = format!("==================== {name} ====================");
        if self.tty {
            self.line(&line.cyan().bold().to_string());
        } else {
            self.line(&line);
        }
    }

    fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            self.line(&format!("{:<12}: {}", key, value));
        }
    }

    fn status(&self, scope: &str, message: &str) {
        if !self.quiet {
            self.line(&format!("[{:<12}] {}", scope, message));
        }
    }

    fn warning(&self, message: &str) {
        if self.tty {
            self.line(&format!("{} {}", "warning:".yellow().bold(), message));
        } else {
            self.line(&format!("warning: {message}"));
        }
    }

    fn error(&self, message: &str) {
        if self.tty {
            self.line(&format!("{} {}", "error:".red().bold(), message));
        } else {
            self.line(&format!("error: {message}"));
        }
    }

    fn raw(&self, line: &str) {
        println!("{}", line);
    }
}
