//! 리뷰/리라이트 요청·응답 엔티티와 값 객체.

use std::path::PathBuf;

use crate::domain::snippet::{ActionKind, Language};

/// 단발 CLI 실행 옵션.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub kind: ActionKind,
    pub language: Language,
    /// 없으면 stdin에서 코드를 읽는다.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
}

impl ChatRole {
    /// chat-completion API의 role 값.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// completion 서비스로 나가는 요청. 생성 후 변경하지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl PromptRequest {
    pub fn system_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
    }

    pub fn user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

impl TokenUsage {
    /// total 값이 없으면 prompt + completion으로 보정한다.
    pub fn with_derived_total(mut self) -> Self {
        if self.total_tokens.is_none() {
            self.total_tokens = match (self.prompt_tokens, self.completion_tokens) {
                (Some(p), Some(c)) => Some(p + c),
                (Some(p), None) => Some(p),
                (None, Some(c)) => Some(c),
                (None, None) => None,
            };
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.prompt_tokens.is_none()
            && self.completion_tokens.is_none()
            && self.total_tokens.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub content: String,
    pub usage: TokenUsage,
}

/// 화면에 표시할 성공 결과. `kind`에 따라 렌더링 방식만 달라진다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText {
    pub kind: ActionKind,
    pub language: Language,
    pub text: String,
    pub usage: TokenUsage,
}

/// 비동기 액션의 호출자 관점 상태.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionState {
    Pending,
    Succeeded(DisplayText),
    Failed(String),
    Cancelled,
}

impl ActionState {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}
