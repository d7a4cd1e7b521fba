//! 사용자 진입 계층(CLI, 대화형 쉘).

pub mod cli;
