//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;
use url::Url;

use super::loader::LoadedConfig;
use super::resolve::resolve_api_key;
use crate::application::config::{Config, DefaultsConfig, ProviderConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub provider: ProviderConfig,
    pub effective: EffectiveSettings,
    pub credential: CredentialInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSettings {
    pub model: String,
    pub api_base: String,
    pub api_base_valid: bool,
    pub request_timeout_secs: u64,
}

/// 키 값은 담지 않는다.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialInspection {
    pub env_var: String,
    pub source: Option<String>,
    pub resolved: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        let credential = resolve_api_key(config);

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            provider: config.provider.clone(),
            effective: effective_settings(config),
            credential: CredentialInspection {
                env_var: config.api_key_env().to_string(),
                source: credential.source,
                resolved: credential.credential.is_some(),
            },
        }
    }
}

fn effective_settings(config: &Config) -> EffectiveSettings {
    EffectiveSettings {
        model: config.model().to_string(),
        api_base: config.api_base().to_string(),
        api_base_valid: Url::parse(config.api_base()).is_ok(),
        request_timeout_secs: config.request_timeout().as_secs(),
    }
}
