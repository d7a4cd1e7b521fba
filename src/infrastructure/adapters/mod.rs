//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod client_factory;
mod config_repository;
mod reporter;
mod result_renderer;

pub use client_factory::GroqClientFactory;
pub use config_repository::JsonConfigRepository;
pub use reporter::ConsoleReporter;
pub use result_renderer::MarkdownResultRenderer;
