//! 애플리케이션 조립(composition root) 모듈.

use std::sync::Arc;

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::{
    CompletionClient, CompletionClientFactory, ConfigRepository, Reporter, ResultRenderer,
};
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::run_action::RunActionUseCase;
use crate::domain::review::DisplayText;
use crate::infrastructure::adapters::{
    ConsoleReporter, GroqClientFactory, JsonConfigRepository, MarkdownResultRenderer,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
/// completion 클라이언트는 생성 시 한 번만 만들어지고 이후 읽기 전용으로 공유된다.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    config: Config,
    client: Arc<dyn CompletionClient>,
    reporter: Arc<dyn Reporter>,
    renderer: MarkdownResultRenderer,
}

impl AppComposition {
    /// 설정을 읽고 Groq 클라이언트를 만든다.
    /// 자격 증명이 없으면 `MissingCredentialError`를 담은 오류로 실패한다.
    pub fn bootstrap(quiet: bool) -> Result<Self> {
        let config = JsonConfigRepository.load()?;
        Self::with_factory(config, &GroqClientFactory, Arc::new(ConsoleReporter::new(quiet)))
    }

    /// 팩토리/리포터를 외부에서 주입한다.
    pub fn with_factory(
        config: Config,
        factory: &dyn CompletionClientFactory,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self> {
        let client = factory.build(&config)?;
        Ok(Self::with_client(config, client, reporter))
    }

    /// 이미 만들어진 클라이언트로 조립한다.
    pub fn with_client(
        config: Config,
        client: Arc<dyn CompletionClient>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            config_repo: JsonConfigRepository,
            config,
            client,
            reporter,
            renderer: MarkdownResultRenderer,
        }
    }

    pub fn client_name(&self) -> &'static str {
        self.client.name()
    }

    pub fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }

    pub fn render(&self, result: &DisplayText) -> String {
        self.renderer.render(result)
    }

    /// 리뷰/리라이트 실행 유스케이스를 생성한다.
    pub fn run_action_usecase(&self) -> RunActionUseCase {
        RunActionUseCase {
            client: Arc::clone(&self.client),
            reporter: Arc::clone(&self.reporter),
            model: self.config.model().to_string(),
            timeout: self.config.request_timeout(),
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }
}

/// 자격 증명 없이도 동작하는 설정 점검.
pub fn inspect_config_pretty_json() -> Result<String> {
    InspectConfigUseCase {
        config_repo: &JsonConfigRepository,
    }
    .execute()
}
