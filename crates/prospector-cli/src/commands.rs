use crate::cli::{ConfigCommand, LookupArgs};
use anyhow::{bail, Context, Result};
use prospector_api::LinkedInApiClient;
use prospector_auth::{OAuthTokenProvider, TokenSession};
use prospector_browser::{ChromiumLauncher, CookieStore};
use prospector_core::{AppConfig, LookupOutcome};
use prospector_scanner::{LookupOptions, LookupOrchestrator};
use std::path::Path;
use std::sync::Arc;

/// Run one lookup and print the outcome. Returns the outcome so the caller
/// can choose the exit status.
pub async fn lookup(args: &LookupArgs, config_path: Option<&Path>) -> Result<LookupOutcome> {
    let config = AppConfig::load_with_env(config_path).context("failed to load configuration")?;

    let provider = OAuthTokenProvider::from_config(&config.linkedin)?;
    let session = Arc::new(TokenSession::new(Arc::new(provider)));
    let api = Arc::new(LinkedInApiClient::from_config(&config.linkedin)?);
    let launcher = Arc::new(ChromiumLauncher::new(
        config.browser.clone(),
        CookieStore::new(config.session.cookies_file.clone()),
    ));
    let orchestrator = LookupOrchestrator::from_config(&config, session, api, launcher);

    let mut options = LookupOptions::default();
    if args.force_scrape {
        options = options.force_scrape();
    }
    if args.skip_company {
        options = options.skip_company();
    }

    let outcome = orchestrator
        .lookup(&args.url, options)
        .await
        .with_context(|| format!("lookup of {} failed", args.url))?;

    println!("{}", render_outcome(&outcome, args.pretty)?);
    Ok(outcome)
}

pub fn render_outcome(outcome: &LookupOutcome, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(outcome)?
    } else {
        serde_json::to_string(outcome)?
    })
}

pub fn config(command: &ConfigCommand, config_path: Option<&Path>) -> Result<()> {
    match command {
        ConfigCommand::Init { force } => {
            let path = match config_path {
                Some(path) => path.to_path_buf(),
                None => AppConfig::config_path()?,
            };
            init_config(&path, *force)?;
            eprintln!("Wrote default configuration to {}", path.display());
        }
        ConfigCommand::Show => {
            let config = AppConfig::load_with_env(config_path)?;
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    AppConfig::default().save_to(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_config_refuses_to_overwrite() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("prospector").join("config.toml");

        init_config(&path, false).expect("first init");
        assert!(AppConfig::load_from(&path).is_ok());

        assert!(init_config(&path, false).is_err());
        init_config(&path, true).expect("forced init");
    }

    #[test]
    fn test_render_error_outcome() {
        let rendered =
            render_outcome(&LookupOutcome::error("Member not found"), false).expect("render");
        assert_eq!(rendered, r#"{"error":"Member not found"}"#);
    }
}
