//! completion 서비스 provider 모듈.
//! HTTP 호출/오류 분류는 `api_runner`가, 서비스별 요청 형식은 각 어댑터가 맡는다.

mod api_runner;
pub mod groq;

use std::env;
use std::sync::Arc;

use crate::application::config::Config;
use crate::application::ports::CompletionClient;
use crate::domain::error::MissingCredentialError;

/// 프로세스 환경에서 자격 증명을 읽어 클라이언트를 생성한다.
pub fn build_client(config: &Config) -> Result<Arc<dyn CompletionClient>, MissingCredentialError> {
    let client = groq::GroqClient::from_config(config, |name| env::var(name).ok())?;
    Ok(Arc::new(client))
}
