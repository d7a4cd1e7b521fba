//! 액션을 취소 가능한 비동기 작업으로 실행한다.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::RunActionUseCase;
use crate::domain::error::{ActionError, DispatchError};
use crate::domain::review::{ActionState, DisplayText};
use crate::domain::snippet::{ActionKind, SourceSnippet};

/// 실행 중인 액션에 대한 호출자 측 핸들.
pub struct ActionHandle {
    kind: ActionKind,
    state: watch::Receiver<ActionState>,
    cancel: CancellationToken,
    join: JoinHandle<Result<DisplayText, ActionError>>,
}

impl ActionHandle {
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// 상태 변화를 구독한다. 최초 값은 항상 `Pending`.
    pub fn subscribe(&self) -> watch::Receiver<ActionState> {
        self.state.clone()
    }

    pub fn state(&self) -> ActionState {
        self.state.borrow().clone()
    }

    /// 진행 중인 요청을 중단한다. 이미 끝난 작업에는 영향이 없다.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub async fn wait(self) -> Result<DisplayText, ActionError> {
        match self.join.await {
            Ok(result) => result,
            Err(err) => Err(ActionError::Aborted(err.to_string())),
        }
    }
}

/// 유스케이스를 tokio 작업으로 띄우고 즉시 핸들을 반환한다.
pub fn spawn_action(
    use_case: RunActionUseCase,
    kind: ActionKind,
    snippet: SourceSnippet,
) -> ActionHandle {
    let (tx, rx) = watch::channel(ActionState::Pending);
    let cancel = CancellationToken::new();
    let task_cancel = cancel.clone();

    let join = tokio::spawn(async move {
        let result = use_case.execute(kind, &snippet, &task_cancel).await;
        let final_state = match &result {
            Ok(display) => ActionState::Succeeded(display.clone()),
            Err(ActionError::Dispatch(DispatchError::Cancelled)) => ActionState::Cancelled,
            Err(err) => ActionState::Failed(err.to_string()),
        };
        tx.send_replace(final_state);
        result
    });

    ActionHandle {
        kind,
        state: rx,
        cancel,
        join,
    }
}
