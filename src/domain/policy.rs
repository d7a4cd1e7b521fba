//! 도메인 정책(프롬프트 템플릿, 액션별 샘플링 프로필).
//!
//! 모든 함수는 순수 함수다. 코드 본문은 이스케이프/절단 없이 그대로 삽입된다.

use crate::domain::review::{ChatMessage, PromptRequest};
use crate::domain::snippet::{ActionKind, SourceSnippet};

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const MAX_OUTPUT_TOKENS: u32 = 1200;

const REVIEW_SYSTEM_PROMPT: &str = "You are a professional AI code reviewer.";
const REWRITE_SYSTEM_PROMPT: &str = "You are a senior AI engineer rewriting code.";

/// 액션별 고정 시스템 역할 문자열과 샘플링 파라미터.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionProfile {
    pub system_prompt: &'static str,
    pub temperature: f64,
    pub max_tokens: u32,
}

pub fn action_profile(kind: ActionKind) -> ActionProfile {
    match kind {
        ActionKind::Review => ActionProfile {
            system_prompt: REVIEW_SYSTEM_PROMPT,
            temperature: 0.2,
            max_tokens: MAX_OUTPUT_TOKENS,
        },
        // 결정적 변환에 가깝도록 리라이트는 온도를 더 낮춘다.
        ActionKind::Rewrite => ActionProfile {
            system_prompt: REWRITE_SYSTEM_PROMPT,
            temperature: 0.1,
            max_tokens: MAX_OUTPUT_TOKENS,
        },
    }
}

/// 4단계 심각도 분류를 요구하는 리뷰 프롬프트를 생성한다.
pub fn build_review_prompt(code: &str, language: &str) -> String {
    let mut out = String::new();
    out.push_str("You are a senior software engineer performing a professional code review.\n\n");
    out.push_str(&format!("Carefully analyze the following {language} code.\n\n"));
    out.push_str("Categorize findings into:\n");
    out.push_str("1. Critical Issues\n");
    out.push_str("2. High Priority Issues\n");
    out.push_str("3. Medium Priority Issues\n");
    out.push_str("4. Low Priority Issues\n\n");
    out.push_str("For each issue:\n");
    out.push_str("- Describe the problem\n");
    out.push_str("- Explain its impact and why it matters\n");
    out.push_str("- Provide a fix suggestion\n\n");
    out.push_str("Here is the code to review:\n\n");
    out.push_str(code);
    out.push_str("\n\nNow provide the structured review.\n");
    out
}

/// 동작을 유지한 전체 재작성을 요구하는 프롬프트를 생성한다.
pub fn build_rewrite_prompt(code: &str, language: &str) -> String {
    let mut out = String::new();
    out.push_str("You are a senior software engineer.\n\n");
    out.push_str(&format!(
        "Rewrite the following {language} code to be optimized, secure, clean,\nproduction-ready, and properly formatted.\n\n"
    ));
    out.push_str("Maintain original functionality.\n");
    out.push_str("Add meaningful comments if necessary.\n\n");
    out.push_str("Here is the code:\n\n");
    out.push_str(code);
    out.push_str("\n\nReturn ONLY the improved code, with no explanation before or after it.\n");
    out
}

pub fn build_prompt(kind: ActionKind, code: &str, language: &str) -> String {
    match kind {
        ActionKind::Review => build_review_prompt(code, language),
        ActionKind::Rewrite => build_rewrite_prompt(code, language),
    }
}

/// 시스템/사용자 메시지와 샘플링 파라미터를 묶어 최종 요청을 만든다.
pub fn build_prompt_request(
    kind: ActionKind,
    snippet: &SourceSnippet,
    model: &str,
) -> PromptRequest {
    let profile = action_profile(kind);
    PromptRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(profile.system_prompt),
            ChatMessage::user(build_prompt(kind, &snippet.code, snippet.language.label())),
        ],
        temperature: profile.temperature,
        max_tokens: profile.max_tokens,
    }
}
