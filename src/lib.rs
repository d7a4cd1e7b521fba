//! codepilot library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use anyhow::Result;
use tokio_util::sync::CancellationToken;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use domain::review::DisplayText;
use domain::snippet::{ActionKind, SourceSnippet};
use interface::cli::AppComposition;

/// 라이브러리 직접 호출용 실행 함수. 렌더링 전 결과를 돌려준다.
pub async fn run(kind: ActionKind, snippet: SourceSnippet) -> Result<DisplayText> {
    let composition = AppComposition::bootstrap(true)?;
    let display = composition
        .run_action_usecase()
        .execute(kind, &snippet, &CancellationToken::new())
        .await?;
    Ok(display)
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    interface::cli::inspect_config_pretty_json()
}
