//! `codepilot review|rewrite` 단발 실행.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use crate::application::usecases::run_action::spawn_action;
use crate::domain::review::RunOptions;
use crate::domain::snippet::SourceSnippet;
use crate::interface::cli::composition::AppComposition;
use crate::interface::cli::progress::wait_with_indicator;

/// 액션 1건을 실행하고 프로세스 종료 코드를 돌려준다.
/// 결과는 stdout, 경고/오류는 stderr로 나간다.
pub async fn run_once(composition: &AppComposition, options: RunOptions, quiet: bool) -> Result<i32> {
    let code = read_code(options.file.as_deref()).await?;
    let snippet = SourceSnippet::new(code, options.language);

    let handle = spawn_action(composition.run_action_usecase(), options.kind, snippet);
    let reporter = composition.reporter();

    match wait_with_indicator(handle, !quiet).await {
        Ok(display) => {
            reporter.raw(&composition.render(&display));
            Ok(0)
        }
        Err(err) if err.is_warning() => {
            reporter.warning(&err.to_string());
            Ok(1)
        }
        Err(err) => {
            reporter.error(&err.to_string());
            Ok(1)
        }
    }
}

async fn read_code(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read code file: {}", path.display())),
        None => {
            let mut code = String::new();
            tokio::io::stdin()
                .read_to_string(&mut code)
                .await
                .context("failed to read code from stdin")?;
            Ok(code)
        }
    }
}
