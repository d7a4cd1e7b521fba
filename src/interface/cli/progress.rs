//! 대기 표시(spinner)와 Ctrl-C 취소를 묶은 액션 대기 헬퍼.

use std::io::{self, IsTerminal};
use std::time::Duration;

use crossterm::cursor::MoveToColumn;
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use crate::application::usecases::run_action::ActionHandle;
use crate::domain::error::ActionError;
use crate::domain::review::DisplayText;
use crate::domain::snippet::ActionKind;

const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const FRAME_INTERVAL: Duration = Duration::from_millis(120);

pub fn waiting_label(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Review => "Analyzing code...",
        ActionKind::Rewrite => "Rewriting code...",
    }
}

/// 작업이 끝날 때까지 기다린다.
/// `show`이고 stderr가 터미널이면 spinner를 그린다. Ctrl-C는 작업을 취소한다.
pub async fn wait_with_indicator(
    handle: ActionHandle,
    show: bool,
) -> Result<DisplayText, ActionError> {
    let mut state = handle.subscribe();
    let draw = show && io::stderr().is_terminal();
    let label = waiting_label(handle.kind());

    let mut ticker = tokio::time::interval(FRAME_INTERVAL);
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);
    let mut interrupted = false;
    let mut frame = 0usize;

    while !state.borrow().is_finished() {
        tokio::select! {
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = ticker.tick(), if draw => {
                draw_frame(FRAMES[frame % FRAMES.len()], label);
                frame += 1;
            }
            res = &mut interrupt, if !interrupted => {
                interrupted = true;
                if res.is_ok() {
                    handle.cancel();
                }
            }
        }
    }

    if draw {
        clear_line();
    }
    handle.wait().await
}

fn draw_frame(frame: &str, label: &str) {
    let _ = execute!(
        io::stderr(),
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(format!("{frame} {label}"))
    );
}

fn clear_line() {
    let _ = execute!(io::stderr(), MoveToColumn(0), Clear(ClearType::CurrentLine));
}
