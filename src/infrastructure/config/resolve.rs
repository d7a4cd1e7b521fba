//! 설정 값(api key/env)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수/`.env` 접근은 인프라 계층에서만 수행한다.

use std::env;
use std::path::PathBuf;

use crate::application::config::Config;
use crate::domain::error::MissingCredentialError;

/// API key 해석 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialResolution {
    pub credential: Option<String>,
    pub source: Option<String>,
}

/// 현재 디렉터리(또는 상위)의 `.env`를 프로세스 환경에 적용한다.
/// 이미 설정된 환경변수는 덮어쓰지 않는다. 파일이 없으면 `Ok(None)`.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// 프로세스 환경에서 API key를 해석한다.
pub fn resolve_api_key(config: &Config) -> CredentialResolution {
    resolve_api_key_with(config, |name| env::var(name).ok())
}

/// inline 값 우선, 없으면 `api_key_env`(기본 GROQ_API_KEY)를 조회한다.
pub fn resolve_api_key_with<F>(config: &Config, lookup: F) -> CredentialResolution
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = config
        .provider
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return CredentialResolution {
            credential: Some(key.to_string()),
            source: Some("inline".to_string()),
        };
    }

    let env_name = config.api_key_env();
    match lookup(env_name).map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => CredentialResolution {
            credential: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => CredentialResolution {
            credential: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}

/// 자격 증명이 없으면 시작 단계에서 실패시킨다.
pub fn require_api_key_with<F>(config: &Config, lookup: F) -> Result<String, MissingCredentialError>
where
    F: Fn(&str) -> Option<String>,
{
    resolve_api_key_with(config, lookup)
        .credential
        .ok_or_else(|| MissingCredentialError {
            env_var: config.api_key_env().to_string(),
        })
}
