//! Provider HTTP API 호출 공용 유틸리티.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::domain::error::DispatchError;

/// 오류 본문은 이 길이까지만 보존한다.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Provider API 호출용 HTTP 클라이언트를 생성한다.
pub fn build_api_client(timeout: Duration) -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// JSON 응답을 기대하는 요청을 전송하고 실패 유형을 `DispatchError`로 분류한다.
pub async fn send_json(
    provider_name: &str,
    request: RequestBuilder,
    timeout: Duration,
) -> Result<Value, DispatchError> {
    let response = request.send().await.map_err(|err| {
        if err.is_timeout() {
            DispatchError::Timeout(timeout)
        } else {
            DispatchError::Transport(format!("{provider_name}: {err}"))
        }
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|err| {
        DispatchError::Transport(format!("{provider_name}: failed to read response body: {err}"))
    })?;
    debug!(provider = provider_name, %status, bytes = body.len(), "received response");

    if !status.is_success() {
        return Err(classify_status(status, &body));
    }

    serde_json::from_str(&body).map_err(|err| {
        DispatchError::MalformedResponse(format!("{provider_name}: invalid JSON ({err})"))
    })
}

/// HTTP 상태 코드를 오류 분류로 바꾼다.
pub fn classify_status(status: StatusCode, body: &str) -> DispatchError {
    let body = truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DispatchError::Unauthorized {
            status: status.as_u16(),
            body,
        },
        StatusCode::TOO_MANY_REQUESTS => DispatchError::RateLimited(body),
        _ => DispatchError::Service {
            status: status.as_u16(),
            body,
        },
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max).collect();
    format!("{head}...")
}
