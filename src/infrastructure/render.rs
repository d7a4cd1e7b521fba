//! 결과 표시용 Markdown 렌더링 모듈.

use crate::domain::review::{DisplayText, TokenUsage};
use crate::domain::snippet::ActionKind;

pub fn render_display_markdown(result: &DisplayText) -> String {
    match result.kind {
        ActionKind::Review => render_review_markdown(result),
        ActionKind::Rewrite => render_rewrite_markdown(result),
    }
}

/// 리뷰 결과는 서술형 Markdown 그대로 보여준다.
pub fn render_review_markdown(result: &DisplayText) -> String {
    let mut out = String::new();
    out.push_str("# Code Review Report\n\n");
    out.push_str(&format!("- Language: {}\n", result.language));
    if !result.usage.is_empty() {
        out.push_str(&format!("- Token Usage: {}\n", format_usage(&result.usage)));
    }
    out.push('\n');
    out.push_str(result.text.trim());
    out.push('\n');
    out
}

/// 리라이트 결과는 선택 언어 태그가 붙은 코드 블록으로 감싼다.
pub fn render_rewrite_markdown(result: &DisplayText) -> String {
    let code = strip_outer_fence(&result.text);
    let fence = fence_for(code);

    let mut out = String::new();
    out.push_str("# Optimized Code\n\n");
    if !result.usage.is_empty() {
        out.push_str(&format!("- Token Usage: {}\n\n", format_usage(&result.usage)));
    }
    out.push_str(&format!("{fence}{}\n", result.language.fence_tag()));
    out.push_str(code.trim_end());
    out.push_str(&format!("\n{fence}\n"));
    out
}

/// 모델이 코드 전체를 이미 펜스로 감싼 경우 바깥 펜스 한 겹만 벗긴다.
pub fn strip_outer_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") || !trimmed.ends_with("```") {
        return trimmed;
    }
    let Some(first_newline) = trimmed.find('\n') else {
        return trimmed;
    };
    let body = &trimmed[first_newline + 1..trimmed.len() - 3];
    // 닫는 펜스가 본문 중간의 것이라면 벗기지 않는다.
    if body.lines().any(|line| line.trim_start().starts_with("```")) {
        return trimmed;
    }
    body.trim_end_matches(['\n', '\r'])
}

/// 본문에 포함된 가장 긴 backtick 연속보다 긴 펜스를 고른다.
fn fence_for(content: &str) -> String {
    let mut longest = 0usize;
    let mut current = 0usize;
    for ch in content.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    "`".repeat(longest.max(2) + 1)
}

/// 토큰 사용량을 콘솔/문서 표기용 문자열로 변환한다.
pub fn format_usage(usage: &TokenUsage) -> String {
    format!(
        "prompt={}, completion={}, total={}",
        opt_num(usage.prompt_tokens),
        opt_num(usage.completion_tokens),
        opt_num(usage.total_tokens)
    )
}

fn opt_num(value: Option<u64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snippet::Language;

    fn display(kind: ActionKind, language: Language, text: &str) -> DisplayText {
        DisplayText {
            kind,
            language,
            text: text.to_string(),
            usage: TokenUsage::default(),
        }
    }

    #[test]
    fn review_is_rendered_as_narrative() {
        let out = render_display_markdown(&display(
            ActionKind::Review,
            Language::Python,
            "## Critical Issues\n- none\n",
        ));
        assert!(out.starts_with("# Code Review Report\n"));
        assert!(out.contains("- Language: Python"));
        assert!(out.contains("## Critical Issues\n- none"));
        assert!(!out.contains("Token Usage"));
    }

    #[test]
    fn rewrite_is_wrapped_with_language_tag() {
        let out = render_display_markdown(&display(
            ActionKind::Rewrite,
            Language::Cpp,
            "int main() { return 0; }",
        ));
        assert_eq!(
            out,
            "# Optimized Code\n\n```cpp\nint main() { return 0; }\n```\n"
        );
    }

    #[test]
    fn existing_outer_fence_is_unwrapped() {
        assert_eq!(strip_outer_fence("```python\nprint(1)\n```"), "print(1)");
        assert_eq!(strip_outer_fence("  ```\nx\ny\n```\n"), "x\ny");
        assert_eq!(strip_outer_fence("print(1)"), "print(1)");
    }

    #[test]
    fn separate_fenced_blocks_are_left_alone() {
        let text = "```\na\n```\ntext\n```\nb\n```";
        assert_eq!(strip_outer_fence(text), text);
    }

    #[test]
    fn inner_backticks_get_a_longer_fence() {
        let out = render_rewrite_markdown(&display(
            ActionKind::Rewrite,
            Language::JavaScript,
            "const s = `a` + '```';",
        ));
        assert!(out.contains("````javascript\n"));
        assert!(out.ends_with("\n````\n"));
    }

    #[test]
    fn usage_is_shown_when_reported() {
        let mut result = display(ActionKind::Review, Language::C, "ok");
        result.usage = TokenUsage {
            prompt_tokens: Some(5),
            completion_tokens: None,
            total_tokens: Some(5),
        };
        assert!(render_review_markdown(&result).contains("- Token Usage: prompt=5, completion=n/a, total=5"));
    }
}
