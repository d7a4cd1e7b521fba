//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::domain::error::{DispatchError, MissingCredentialError};
use crate::domain::review::{CompletionResponse, DisplayText, PromptRequest};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 외부 chat-completion 서비스 포트.
/// 시작 시 한 번 생성되고 이후에는 읽기 전용으로 공유된다.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// 사용자 표시 이름
    fn name(&self) -> &'static str;
    /// 요청 1건을 보내고 첫 번째 choice의 텍스트를 돌려준다. 재시도하지 않는다.
    async fn complete(&self, request: &PromptRequest) -> Result<CompletionResponse, DispatchError>;
}

/// 설정에서 completion 클라이언트를 생성하는 팩토리 포트.
/// 자격 증명이 없으면 즉시 실패한다.
pub trait CompletionClientFactory: Send + Sync {
    fn build(&self, config: &Config) -> Result<Arc<dyn CompletionClient>, MissingCredentialError>;
}

/// 결과 표시용 렌더링 포트.
pub trait ResultRenderer: Send + Sync {
    fn render(&self, result: &DisplayText) -> String;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn raw(&self, line: &str);
}
