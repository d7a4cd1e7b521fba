//! 도메인 오류 분류.
//!
//! 시작 시점 치명 오류(자격 증명 누락), 액션 단위 복구 가능 오류(빈 입력, 호출 실패)를 구분한다.

use std::time::Duration;

use thiserror::Error;

use crate::domain::snippet::ActionKind;

/// 서비스 자격 증명을 찾지 못했다. 대화형 동작 이전에 프로세스를 멈춘다.
#[derive(Debug, Error)]
#[error("{env_var} not found in environment or .env file")]
pub struct MissingCredentialError {
    pub env_var: String,
}

#[derive(Debug, Error)]
#[error("unknown language `{0}` (expected one of: Python, Java, C++, JavaScript, C, Other)")]
pub struct UnknownLanguage(pub String);

/// 외부 completion 호출 실패.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("authentication rejected ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("rate limited by service: {0}")]
    RateLimited(String),

    #[error("service error ({status}): {body}")]
    Service { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("request cancelled")]
    Cancelled,
}

/// 단일 액션 실행 결과 오류.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("please paste code before {}.", .kind.verb_ing())]
    EmptyInput { kind: ActionKind },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("action task aborted: {0}")]
    Aborted(String),
}

impl ActionError {
    /// 경고로 보여줄 입력 오류인지 여부.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::EmptyInput { .. })
    }
}
