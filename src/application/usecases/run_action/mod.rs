//! 사용자 액션(리뷰/리라이트) 1건을 completion 호출 1건으로 바꾸는 유스케이스.

mod task;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::application::ports::{CompletionClient, Reporter};
use crate::domain::error::{ActionError, DispatchError};
use crate::domain::policy::build_prompt_request;
use crate::domain::review::DisplayText;
use crate::domain::snippet::{ActionKind, SourceSnippet};

pub use task::{ActionHandle, spawn_action};

/// 입력 검증, 프롬프트 구성, 서비스 호출, 결과 추출을 한 번에 수행한다.
/// 공유 상태가 없으므로 복제해서 여러 작업에 넘겨도 된다.
#[derive(Clone)]
pub struct RunActionUseCase {
    pub client: Arc<dyn CompletionClient>,
    pub reporter: Arc<dyn Reporter>,
    pub model: String,
    pub timeout: Duration,
}

impl RunActionUseCase {
    /// 액션 실행 진입점.
    /// 빈 입력은 네트워크 호출 없이 즉시 거절하고, 실패 시 재시도하지 않는다.
    pub async fn execute(
        &self,
        kind: ActionKind,
        snippet: &SourceSnippet,
        cancel: &CancellationToken,
    ) -> Result<DisplayText, ActionError> {
        if snippet.is_blank() {
            debug!(action = %kind, "rejecting blank input");
            return Err(ActionError::EmptyInput { kind });
        }

        let request = build_prompt_request(kind, snippet, &self.model);

        self.reporter.section("Session");
        self.reporter.kv("Action", kind.id());
        self.reporter.kv("Language", snippet.language.label());
        self.reporter.kv("Model", &request.model);
        self.reporter
            .status(self.client.name(), &format!("{} in progress...", kind.verb_ing()));

        debug!(
            action = %kind,
            model = %request.model,
            temperature = request.temperature,
            max_tokens = request.max_tokens,
            prompt_bytes = request.user_content().map(str::len).unwrap_or(0),
            "dispatching completion request"
        );

        let started = Instant::now();
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DispatchError::Cancelled),
            res = tokio::time::timeout(self.timeout, self.client.complete(&request)) => {
                res.unwrap_or(Err(DispatchError::Timeout(self.timeout)))
            }
        };
        let elapsed = format!("{:.1}s", started.elapsed().as_secs_f32());

        match outcome {
            Ok(response) => {
                self.reporter
                    .status(self.client.name(), &format!("done ({elapsed})"));
                Ok(DisplayText {
                    kind,
                    language: snippet.language,
                    text: response.content,
                    usage: response.usage,
                })
            }
            Err(err) => {
                warn!(action = %kind, error = %err, "completion request failed");
                self.reporter
                    .status(self.client.name(), &format!("error ({elapsed})"));
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::review::{CompletionResponse, PromptRequest, TokenUsage};
    use crate::domain::snippet::Language;

    pub(crate) enum Behavior {
        Reply(&'static str),
        FailTransport,
        Hang,
    }

    /// 호출 횟수와 마지막 요청을 기록하는 스텁.
    pub(crate) struct StubClient {
        pub calls: AtomicUsize,
        pub last: Mutex<Option<PromptRequest>>,
        behavior: Behavior,
    }

    impl StubClient {
        pub(crate) fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
                behavior,
            })
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub(crate) fn last_request(&self) -> PromptRequest {
            self.last.lock().unwrap().clone().expect("no request recorded")
        }
    }

    #[async_trait]
    impl CompletionClient for StubClient {
        fn name(&self) -> &'static str {
            "Stub"
        }

        async fn complete(
            &self,
            request: &PromptRequest,
        ) -> Result<CompletionResponse, DispatchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request.clone());
            match self.behavior {
                Behavior::Reply(text) => Ok(CompletionResponse {
                    content: text.to_string(),
                    usage: TokenUsage::default(),
                }),
                Behavior::FailTransport => {
                    Err(DispatchError::Transport("connection refused".to_string()))
                }
                Behavior::Hang => std::future::pending().await,
            }
        }
    }

    pub(crate) struct SilentReporter;

    impl Reporter for SilentReporter {
        fn section(&self, _name: &str) {}
        fn kv(&self, _key: &str, _value: &str) {}
        fn status(&self, _scope: &str, _message: &str) {}
        fn warning(&self, _message: &str) {}
        fn error(&self, _message: &str) {}
        fn raw(&self, _line: &str) {}
    }

    pub(crate) fn use_case(client: Arc<StubClient>, timeout: Duration) -> RunActionUseCase {
        RunActionUseCase {
            client,
            reporter: Arc::new(SilentReporter),
            model: "llama-3.3-70b-versatile".to_string(),
            timeout,
        }
    }

    #[tokio::test]
    async fn blank_input_never_reaches_the_service() {
        let stub = StubClient::new(Behavior::Reply("unused"));
        let uc = use_case(stub.clone(), Duration::from_secs(5));
        let cancel = CancellationToken::new();

        for kind in [ActionKind::Review, ActionKind::Rewrite] {
            for code in ["", "   ", "\n\t  \n"] {
                let err = uc
                    .execute(kind, &SourceSnippet::new(code, Language::Python), &cancel)
                    .await
                    .unwrap_err();
                assert!(matches!(err, ActionError::EmptyInput { kind: k } if k == kind));
            }
        }
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn review_uses_review_sampling() {
        let stub = StubClient::new(Behavior::Reply("## Critical\nnone"));
        let uc = use_case(stub.clone(), Duration::from_secs(5));

        let result = uc
            .execute(
                ActionKind::Review,
                &SourceSnippet::new("print(1)", Language::Python),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(stub.call_count(), 1);
        let request = stub.last_request();
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.max_tokens, 1200);
        assert!(request.system_content().unwrap().contains("code reviewer"));
        assert!(request.user_content().unwrap().contains("print(1)"));
        assert_eq!(result.kind, ActionKind::Review);
        assert_eq!(result.text, "## Critical\nnone");
    }

    #[tokio::test]
    async fn rewrite_uses_rewrite_sampling() {
        let stub = StubClient::new(Behavior::Reply("int main() { return 0; }"));
        let uc = use_case(stub.clone(), Duration::from_secs(5));

        let result = uc
            .execute(
                ActionKind::Rewrite,
                &SourceSnippet::new("int main(){}", Language::Cpp),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(stub.call_count(), 1);
        let request = stub.last_request();
        assert_eq!(request.temperature, 0.1);
        assert_eq!(request.max_tokens, 1200);
        assert!(request.system_content().unwrap().contains("rewriting code"));
        assert!(request.user_content().unwrap().contains("int main(){}"));
        assert!(request.user_content().unwrap().contains("C++"));
        assert_eq!(result.language, Language::Cpp);
    }

    #[tokio::test]
    async fn transport_failure_is_not_retried() {
        let stub = StubClient::new(Behavior::FailTransport);
        let uc = use_case(stub.clone(), Duration::from_secs(5));

        let err = uc
            .execute(
                ActionKind::Review,
                &SourceSnippet::new("x = 1", Language::Python),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ActionError::Dispatch(DispatchError::Transport(ref msg)) if msg == "connection refused"
        ));
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_service_times_out() {
        let stub = StubClient::new(Behavior::Hang);
        let uc = use_case(stub.clone(), Duration::from_secs(3));

        let err = uc
            .execute(
                ActionKind::Rewrite,
                &SourceSnippet::new("x = 1", Language::Python),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::Dispatch(DispatchError::Timeout(d)) if d == Duration::from_secs(3)));
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn pre_cancelled_token_wins() {
        let stub = StubClient::new(Behavior::Hang);
        let uc = use_case(stub.clone(), Duration::from_secs(30));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = uc
            .execute(
                ActionKind::Review,
                &SourceSnippet::new("x = 1", Language::Python),
                &cancel,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::Dispatch(DispatchError::Cancelled)));
    }
}
