//! completion 클라이언트 팩토리 포트 구현 어댑터.

use std::sync::Arc;

use crate::application::config::Config;
use crate::application::ports::{CompletionClient, CompletionClientFactory};
use crate::domain::error::MissingCredentialError;
use crate::infrastructure::providers;

/// 환경변수 기반 Groq 클라이언트 팩토리.
pub struct GroqClientFactory;

impl CompletionClientFactory for GroqClientFactory {
    fn build(&self, config: &Config) -> Result<Arc<dyn CompletionClient>, MissingCredentialError> {
        providers::build_client(config)
    }
}
