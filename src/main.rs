//! `codepilot` 바이너리 진입점.

use codepilot::domain::error::MissingCredentialError;
use codepilot::infrastructure::config::load_dotenv;
use codepilot::interface::cli::{
    AppComposition, Cli, CliAction, inspect_config_pretty_json, run_once, run_repl,
};

#[tokio::main]
async fn main() {
    // `.env`는 설정/자격 증명 해석보다 먼저 적용한다.
    let dotenv = load_dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    match dotenv {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "loaded .env"),
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "failed to load .env"),
    }

    let action = Cli::parse_action();
    let quiet = match &action {
        CliAction::InspectConfig => {
            // 설정 점검은 자격 증명 없이도 동작해야 한다.
            match inspect_config_pretty_json() {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("error: {err:#}");
                    std::process::exit(1);
                }
            }
            return;
        }
        CliAction::Run { quiet, .. } => *quiet,
        CliAction::Interactive => false,
    };

    let composition = match AppComposition::bootstrap(quiet) {
        Ok(composition) => composition,
        Err(err) => {
            if let Some(missing) = err.downcast_ref::<MissingCredentialError>() {
                eprintln!("error: {missing}");
                eprintln!(
                    "hint: export {} or add it to a .env file in the working directory",
                    missing.env_var
                );
                std::process::exit(2);
            }
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    };

    let code = match action {
        CliAction::Interactive => match run_repl(&composition).await {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("error: {err:#}");
                1
            }
        },
        CliAction::Run { options, quiet } => match run_once(&composition, options, quiet).await {
            Ok(code) => code,
            Err(err) => {
                eprintln!("error: {err:#}");
                1
            }
        },
        CliAction::InspectConfig => 0,
    };
    std::process::exit(code);
}
