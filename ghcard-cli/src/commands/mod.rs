//! CLI command implementations.

pub mod config;
pub mod generate;
pub mod show;
pub mod themes;

use std::io::{Stderr, StdinLock};

use anyhow::Result;
use clap::{Args, ValueEnum};
use ghcard_core::{validate_login, ColorChoice};
use ghcard_fetch::{GitHubClient, StarSource};

use crate::config::Config;
use crate::pipeline::PipelineError;
use crate::prompt::{PromptError, Prompter};

// ============================================================================
// Shared Arguments
// ============================================================================

/// Options for commands that talk to GitHub.
#[derive(Args, Debug, Default, Clone)]
pub struct FetchArgs {
    /// GitHub username; prompted for when omitted.
    #[arg(long, short)]
    pub user: Option<String>,

    /// Which stars to count.
    #[arg(long, value_enum)]
    pub stars: Option<StarsArg>,

    /// Entries per API page (1-100).
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// GitHub API base URL (for GitHub Enterprise).
    #[arg(long)]
    pub api_url: Option<String>,
}

impl FetchArgs {
    /// Writes the flags that were given over `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(page_size) = self.page_size {
            config.api.page_size = page_size;
        }
        if let Some(timeout) = self.timeout {
            config.api.timeout_secs = timeout;
        }
        if let Some(api_url) = &self.api_url {
            config.api.base_url.clone_from(api_url);
        }
    }

    /// Star source selected on the command line.
    pub fn star_source(&self) -> StarSource {
        self.stars.map(StarSource::from).unwrap_or_default()
    }
}

/// `--stars` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StarsArg {
    /// Stars on the user's own repositories.
    Received,
    /// Repositories the user has starred.
    Given,
}

impl From<StarsArg> for StarSource {
    fn from(arg: StarsArg) -> Self {
        match arg {
            StarsArg::Received => Self::Received,
            StarsArg::Given => Self::Given,
        }
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Builds the GitHub client from configuration.
pub fn build_client(config: &Config) -> Result<GitHubClient> {
    let client = GitHubClient::with_settings(&config.client_settings())
        .map_err(|e| PipelineError::InvalidInput(e.to_string()))?;
    Ok(client)
}

/// Returns the validated login from the flag, prompting when absent.
pub async fn resolve_login(flag: Option<&str>) -> Result<String> {
    let input = match flag {
        Some(user) => user.to_string(),
        None => prompt(|p| p.ask_login()).await?,
    };
    let login = validate_login(&input).map_err(|e| PipelineError::InvalidInput(e.to_string()))?;
    Ok(login)
}

/// Parses the color flag, falling back to `default`, then to a prompt.
pub async fn resolve_color(flag: Option<&str>, default: Option<ColorChoice>) -> Result<ColorChoice> {
    if let Some(name) = flag {
        return parse_color(name);
    }
    match default {
        Some(color) => Ok(color),
        None => prompt(|p| p.ask_color()).await,
    }
}

/// Parses a color name.
pub fn parse_color(name: &str) -> Result<ColorChoice> {
    let color = name
        .parse::<ColorChoice>()
        .map_err(|e| PipelineError::InvalidInput(e.to_string()))?;
    Ok(color)
}

/// Runs a prompt on the blocking pool so Ctrl-C stays responsive.
async fn prompt<T, F>(ask: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&mut Prompter<StdinLock<'static>, Stderr>) -> Result<T, PromptError> + Send + 'static,
{
    let answer = tokio::task::spawn_blocking(move || {
        let mut prompter = Prompter::new(std::io::stdin().lock(), std::io::stderr());
        ask(&mut prompter)
    })
    .await?;

    match answer {
        Ok(value) => Ok(value),
        Err(PromptError::Closed) => {
            Err(PipelineError::InvalidInput("no answer given before input closed".to_string()).into())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_args_override_config() {
        let args = FetchArgs {
            page_size: Some(20),
            timeout: Some(5),
            api_url: Some("https://ghe.example.com/api/v3".to_string()),
            ..Default::default()
        };
        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(config.api.page_size, 20);
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.base_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_fetch_args_keep_config_when_absent() {
        let mut config = Config::default();
        config.api.page_size = 30;
        FetchArgs::default().apply(&mut config);
        assert_eq!(config.api.page_size, 30);
    }

    #[test]
    fn test_star_source_default() {
        assert_eq!(FetchArgs::default().star_source(), StarSource::Received);
        let args = FetchArgs {
            stars: Some(StarsArg::Given),
            ..Default::default()
        };
        assert_eq!(args.star_source(), StarSource::Given);
    }

    #[tokio::test]
    async fn test_resolve_login_from_flag() {
        assert_eq!(resolve_login(Some(" octocat ")).await.unwrap(), "octocat");

        let err = resolve_login(Some("not a login")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_color_flag_then_default() {
        assert_eq!(
            resolve_color(Some("RED"), Some(ColorChoice::Blue)).await.unwrap(),
            ColorChoice::Red
        );
        assert_eq!(
            resolve_color(None, Some(ColorChoice::Blue)).await.unwrap(),
            ColorChoice::Blue
        );
        assert!(resolve_color(Some("purple"), None).await.is_err());
    }

    #[test]
    fn test_build_client_rejects_bad_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        let err = build_client(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::InvalidInput(_))
        ));
    }
}
