//! 사용자가 붙여넣은 코드 조각과 언어/액션 식별자.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::UnknownLanguage;

/// 선택 가능한 언어 목록(고정).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Python,
    Java,
    Cpp,
    JavaScript,
    C,
    Other,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Python,
        Language::Java,
        Language::Cpp,
        Language::JavaScript,
        Language::C,
        Language::Other,
    ];

    /// 프롬프트와 화면에 노출되는 표시 이름.
    pub fn label(self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::Java => "Java",
            Self::Cpp => "C++",
            Self::JavaScript => "JavaScript",
            Self::C => "C",
            Self::Other => "Other",
        }
    }

    /// 코드 블록 info string.
    pub fn fence_tag(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Java => "java",
            Self::Cpp => "cpp",
            Self::JavaScript => "javascript",
            Self::C => "c",
            Self::Other => "text",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// 대소문자를 무시하고 표시 이름/흔한 별칭을 모두 받는다.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Self::Python),
            "java" => Ok(Self::Java),
            "c++" | "cpp" | "cxx" | "cc" => Ok(Self::Cpp),
            "javascript" | "js" | "node" => Ok(Self::JavaScript),
            "c" => Ok(Self::C),
            "other" | "text" => Ok(Self::Other),
            _ => Err(UnknownLanguage(input.trim().to_string())),
        }
    }
}

/// 사용자 트리거 액션 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Review,
    Rewrite,
}

impl ActionKind {
    pub fn id(self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::Rewrite => "rewrite",
        }
    }

    /// 경고 문구에 쓰이는 동명사형.
    pub fn verb_ing(self) -> &'static str {
        match self {
            Self::Review => "reviewing",
            Self::Rewrite => "rewriting",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSnippet {
    pub code: String,
    pub language: Language,
}

impl SourceSnippet {
    pub fn new(code: impl Into<String>, language: Language) -> Self {
        Self {
            code: code.into(),
            language,
        }
    }

    /// 공백만 있는 입력은 비어 있는 것으로 본다.
    pub fn is_blank(&self) -> bool {
        self.code.trim().is_empty()
    }
}
