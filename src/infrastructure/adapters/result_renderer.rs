//! 결과 렌더링 포트 구현 어댑터.

use crate::application::ports::ResultRenderer;
use crate::domain::review::DisplayText;
use crate::infrastructure::render;

/// Markdown 렌더링 어댑터.
pub struct MarkdownResultRenderer;

impl ResultRenderer for MarkdownResultRenderer {
    fn render(&self, result: &DisplayText) -> String {
        render::render_display_markdown(result)
    }
}
