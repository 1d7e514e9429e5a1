//! The card pipeline.
//!
//! ```text
//! AwaitingInput -> FetchingUser -> FetchingRepos -> Normalizing -> Exporting -> Done
//!        \______________\________________\______________\____________\---> Failed
//! ```
//!
//! The user lookup and the first star page are requested together and both
//! must succeed. Any error aborts the run; nothing is retried.

use std::fmt;
use std::time::Instant;

use ghcard_core::{normalize, validate_login, ColorChoice, NormalizedProfile};
use ghcard_export::{output_base_name, render_html, ExportError, ExportReport, Exporter, RenderOptions};
use ghcard_fetch::{GitHubApi, HttpError, Paginator, StarSource, DEFAULT_PAGE_SIZE};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ExitCode;

// ============================================================================
// Stages
// ============================================================================

/// Where a pipeline run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Waiting for a username and color.
    AwaitingInput,
    /// User lookup and first star page in flight.
    FetchingUser,
    /// Remaining star pages in flight.
    FetchingRepos,
    /// Building the card record.
    Normalizing,
    /// Rendering and converting to PDF.
    Exporting,
    /// Finished successfully.
    Done,
    /// Aborted.
    Failed,
}

impl Stage {
    /// Returns a short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AwaitingInput => "awaiting_input",
            Self::FetchingUser => "fetching_user",
            Self::FetchingRepos => "fetching_repos",
            Self::Normalizing => "normalizing",
            Self::Exporting => "exporting",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stage history of one run.
struct Progress {
    stages: Vec<Stage>,
    entered: Instant,
    verbose: bool,
}

impl Progress {
    fn new(verbose: bool) -> Self {
        Self {
            stages: vec![Stage::AwaitingInput],
            entered: Instant::now(),
            verbose,
        }
    }

    fn current(&self) -> Stage {
        self.stages.last().copied().unwrap_or(Stage::AwaitingInput)
    }

    fn advance(&mut self, next: Stage) {
        let from = self.current();
        let elapsed = self.entered.elapsed();
        if self.verbose {
            info!(from = %from, to = %next, elapsed = ?elapsed, "Pipeline stage");
        } else {
            debug!(from = %from, to = %next, elapsed = ?elapsed, "Pipeline stage");
        }
        self.stages.push(next);
        self.entered = Instant::now();
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Why a run failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The username or color was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// GitHub has no such user.
    #[error("GitHub user '{login}' not found. Check the spelling and try again.")]
    UserNotFound {
        /// The login that was looked up.
        login: String,
    },

    /// GitHub answered with another non-2xx status.
    #[error("GitHub API error ({status}): {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Message from GitHub.
        message: String,
    },

    /// GitHub could not be reached.
    #[error("Cannot reach GitHub: {0}")]
    TransportError(String),

    /// GitHub sent a body that is not the expected JSON.
    #[error("Unexpected response from GitHub: {0}")]
    ParseError(String),

    /// Rendering or PDF conversion failed.
    #[error("Export failed: {0}")]
    ExportError(#[from] ExportError),
}

impl PipelineError {
    /// Classifies a request error for `login`. A 404 from any listing of the
    /// user means the user does not exist.
    pub fn from_http(err: HttpError, login: &str) -> Self {
        if err.is_not_found() {
            return Self::UserNotFound {
                login: login.to_string(),
            };
        }
        match err {
            HttpError::Status { status, message } => Self::ApiError { status, message },
            HttpError::Transport(msg) | HttpError::InvalidUrl(msg) => Self::TransportError(msg),
            HttpError::Parse(msg) => Self::ParseError(msg),
        }
    }

    /// Exit code for this failure.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidInput(_) => ExitCode::InvalidInput,
            Self::UserNotFound { .. } => ExitCode::UserNotFound,
            Self::ApiError { .. } => ExitCode::ApiError,
            Self::TransportError(_) => ExitCode::TransportError,
            Self::ParseError(_) => ExitCode::ParseError,
            Self::ExportError(_) => ExitCode::ExportError,
        }
    }

    /// Stable camelCase name for JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalidInput",
            Self::UserNotFound { .. } => "userNotFound",
            Self::ApiError { .. } => "apiError",
            Self::TransportError(_) => "transportError",
            Self::ParseError(_) => "parseError",
            Self::ExportError(_) => "exportError",
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Settings for one pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Log stage transitions at info level.
    pub verbose: bool,
    /// Entries per page for star listings.
    pub page_size: u32,
    /// Which stars to count.
    pub star_source: StarSource,
    /// Output file base name; derived from the profile name when unset.
    pub output_base: Option<String>,
    /// Render options.
    pub render: RenderOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            page_size: DEFAULT_PAGE_SIZE,
            star_source: StarSource::default(),
            output_base: None,
            render: RenderOptions::default(),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The card record that was rendered.
    pub profile: NormalizedProfile,
    /// What the exporter wrote.
    pub export: ExportReport,
    /// Stages the run went through.
    pub stages: Vec<Stage>,
}

/// Drives fetch, normalize, render and export for one user.
pub struct Pipeline<'a> {
    api: &'a dyn GitHubApi,
    config: PipelineConfig,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline over `api`.
    pub fn new(api: &'a dyn GitHubApi, config: PipelineConfig) -> Self {
        Self { api, config }
    }

    /// Fetches and normalizes the profile without exporting.
    ///
    /// # Errors
    ///
    /// Returns the classified failure.
    pub async fn profile(
        &self,
        login: &str,
        color: ColorChoice,
    ) -> Result<NormalizedProfile, PipelineError> {
        let mut progress = Progress::new(self.config.verbose);
        let result = self.acquire(&mut progress, login, color).await;
        match result {
            Ok(profile) => {
                progress.advance(Stage::Done);
                Ok(profile)
            }
            Err(err) => Err(Self::fail(&mut progress, err)),
        }
    }

    /// Runs the whole pipeline and writes the PDF through `exporter`.
    ///
    /// # Errors
    ///
    /// Returns the classified failure. Nothing the exporter leaves behind
    /// on failure is a valid artifact.
    pub async fn run(
        &self,
        login: &str,
        color: ColorChoice,
        exporter: &dyn Exporter,
    ) -> Result<RunReport, PipelineError> {
        let mut progress = Progress::new(self.config.verbose);
        match self.execute(&mut progress, login, color, exporter).await {
            Ok((profile, export)) => {
                progress.advance(Stage::Done);
                Ok(RunReport {
                    profile,
                    export,
                    stages: progress.stages,
                })
            }
            Err(err) => Err(Self::fail(&mut progress, err)),
        }
    }

    async fn execute(
        &self,
        progress: &mut Progress,
        login: &str,
        color: ColorChoice,
        exporter: &dyn Exporter,
    ) -> Result<(NormalizedProfile, ExportReport), PipelineError> {
        let profile = self.acquire(progress, login, color).await?;

        progress.advance(Stage::Exporting);
        let html = render_html(&profile, &self.config.render)?;
        let base = output_base_name(
            self.config
                .output_base
                .as_deref()
                .unwrap_or_else(|| profile.name()),
        );
        let export = exporter.export(&html, &base).await?;

        Ok((profile, export))
    }

    async fn acquire(
        &self,
        progress: &mut Progress,
        login: &str,
        color: ColorChoice,
    ) -> Result<NormalizedProfile, PipelineError> {
        let login = validate_login(login).map_err(|e| PipelineError::InvalidInput(e.to_string()))?;
        let source = self.config.star_source;
        let paginator = Paginator::new(self.api, self.config.page_size);

        progress.advance(Stage::FetchingUser);
        let (user, first_page) = futures::try_join!(
            self.api.user(&login),
            paginator.first_page(source, &login),
        )
        .map_err(|e| PipelineError::from_http(e, &login))?;

        progress.advance(Stage::FetchingRepos);
        let hint = user.public_repos.unwrap_or(0);
        let star_total = paginator
            .finish(source, &login, &first_page, hint)
            .await
            .map_err(|e| PipelineError::from_http(e, &login))?;

        progress.advance(Stage::Normalizing);
        let profile = normalize(&user, star_total, color.name());
        debug!(login = %profile.login(), stars = profile.star_total(), source = %source, "Profile normalized");

        Ok(profile)
    }

    fn fail(progress: &mut Progress, err: PipelineError) -> PipelineError {
        warn!(stage = %progress.current(), error = %err, "Pipeline failed");
        progress.advance(Stage::Failed);
        err
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ghcard_core::{RawRepository, RawUserProfile};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::time::Duration;

    // ------------------------------------------------------------------------
    // Fakes
    // ------------------------------------------------------------------------

    #[derive(Default)]
    struct FakeApi {
        user: Option<RawUserProfile>,
        user_error: Option<HttpError>,
        repo_pages: HashMap<u32, Vec<RawRepository>>,
        starred_pages: HashMap<u32, Vec<RawRepository>>,
        fail_page: Option<(u32, HttpError)>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn octocat() -> Self {
            let user: RawUserProfile = serde_json::from_str(
                r#"{"login": "octocat", "name": null, "public_repos": 1, "followers": 10, "following": 2}"#,
            )
            .unwrap();
            Self {
                user: Some(user),
                repo_pages: HashMap::from([(1, repos(&[5]))]),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn page_calls(&self) -> usize {
            self.calls().iter().filter(|c| c.starts_with("repos") || c.starts_with("starred")).count()
        }

        fn page(
            &self,
            kind: &str,
            pages: &HashMap<u32, Vec<RawRepository>>,
            page: u32,
        ) -> Result<Vec<RawRepository>, HttpError> {
            self.calls.lock().unwrap().push(format!("{kind}:{page}"));
            if let Some((fail, err)) = &self.fail_page {
                if *fail == page {
                    return Err(err.clone());
                }
            }
            Ok(pages.get(&page).cloned().unwrap_or_default())
        }
    }

    #[async_trait]
    impl GitHubApi for FakeApi {
        async fn user(&self, login: &str) -> Result<RawUserProfile, HttpError> {
            self.calls.lock().unwrap().push(format!("user:{login}"));
            // Answer on a later poll, like a real request, so the first
            // page request is already in flight.
            tokio::task::yield_now().await;
            if let Some(err) = &self.user_error {
                return Err(err.clone());
            }
            Ok(self.user.clone().unwrap_or_default())
        }

        async fn repos_page(
            &self,
            _login: &str,
            page: u32,
            _per_page: u32,
        ) -> Result<Vec<RawRepository>, HttpError> {
            self.page("repos", &self.repo_pages, page)
        }

        async fn starred_page(
            &self,
            _login: &str,
            page: u32,
            _per_page: u32,
        ) -> Result<Vec<RawRepository>, HttpError> {
            self.page("starred", &self.starred_pages, page)
        }
    }

    #[derive(Default)]
    struct FakeExporter {
        fail: bool,
        exports: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Exporter for FakeExporter {
        async fn export(&self, html: &str, output_base: &str) -> Result<ExportReport, ExportError> {
            self.exports
                .lock()
                .unwrap()
                .push((output_base.to_string(), html.to_string()));
            if self.fail {
                return Err(ExportError::ConverterFailed {
                    program: "fake".to_string(),
                    code: 1,
                    stderr: "boom".to_string(),
                });
            }
            Ok(ExportReport {
                pdf_path: PathBuf::from(format!("{output_base}.pdf")),
                html_path: None,
                converter: "fake".to_string(),
                duration: Duration::from_millis(1),
            })
        }
    }

    fn repos(stars: &[u64]) -> Vec<RawRepository> {
        stars
            .iter()
            .enumerate()
            .map(|(i, &stargazers_count)| RawRepository {
                name: format!("repo-{i}"),
                stargazers_count,
            })
            .collect()
    }

    fn not_found() -> HttpError {
        HttpError::Status {
            status: 404,
            message: "Not Found".to_string(),
        }
    }

    // ------------------------------------------------------------------------
    // Tests
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_octocat_end_to_end() {
        let api = FakeApi::octocat();
        let exporter = FakeExporter::default();
        let pipeline = Pipeline::new(&api, PipelineConfig::default());

        let report = pipeline.run("octocat", ColorChoice::Blue, &exporter).await.unwrap();

        assert_eq!(report.profile.name(), "octocat");
        assert_eq!(report.profile.star_total(), 5);
        assert_eq!(report.profile.color_choice(), "blue");
        assert_eq!(report.export.pdf_path, PathBuf::from("octocat.pdf"));
        assert_eq!(
            report.stages,
            vec![
                Stage::AwaitingInput,
                Stage::FetchingUser,
                Stage::FetchingRepos,
                Stage::Normalizing,
                Stage::Exporting,
                Stage::Done,
            ]
        );

        let exports = exporter.exports.lock().unwrap();
        assert_eq!(exports.len(), 1);
        assert!(exports[0].1.contains("Hi! My name is octocat!"));
    }

    #[tokio::test]
    async fn test_user_not_found_stops_after_first_page() {
        let api = FakeApi {
            user_error: Some(not_found()),
            repo_pages: HashMap::from([(1, repos(&[1; 100])), (2, repos(&[1; 100]))]),
            ..Default::default()
        };
        let exporter = FakeExporter::default();
        let pipeline = Pipeline::new(&api, PipelineConfig::default());

        let err = pipeline.run("ghost-user", ColorChoice::Red, &exporter).await.unwrap_err();

        assert!(matches!(&err, PipelineError::UserNotFound { login } if login == "ghost-user"));
        assert_eq!(err.exit_code() as i32, 2);
        assert_eq!(api.calls(), vec!["user:ghost-user", "repos:1"]);
        assert_eq!(api.page_calls(), 1);
        assert!(exporter.exports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repos_404_is_user_not_found() {
        let mut api = FakeApi::octocat();
        api.fail_page = Some((1, not_found()));
        let pipeline = Pipeline::new(&api, PipelineConfig::default());

        let err = pipeline.profile("octocat", ColorChoice::Green).await.unwrap_err();
        assert!(matches!(err, PipelineError::UserNotFound { .. }));
    }

    #[tokio::test]
    async fn test_paginates_by_public_repo_hint() {
        let mut api = FakeApi::octocat();
        api.user.as_mut().unwrap().public_repos = Some(250);
        api.repo_pages = HashMap::from([
            (1, repos(&[1; 100])),
            (2, repos(&[2; 100])),
            (3, repos(&[3; 50])),
        ]);
        let pipeline = Pipeline::new(&api, PipelineConfig::default());

        let profile = pipeline.profile("octocat", ColorChoice::Blue).await.unwrap();

        assert_eq!(profile.star_total(), 100 + 200 + 150);
        assert_eq!(api.page_calls(), 3);
    }

    #[tokio::test]
    async fn test_failed_page_aborts_without_partial_total() {
        let mut api = FakeApi::octocat();
        api.user.as_mut().unwrap().public_repos = Some(250);
        api.repo_pages = HashMap::from([(1, repos(&[1; 100])), (2, repos(&[2; 100]))]);
        api.fail_page = Some((
            3,
            HttpError::Status {
                status: 502,
                message: "Bad Gateway".to_string(),
            },
        ));
        let exporter = FakeExporter::default();
        let pipeline = Pipeline::new(&api, PipelineConfig::default());

        let err = pipeline.run("octocat", ColorChoice::Blue, &exporter).await.unwrap_err();

        assert!(matches!(err, PipelineError::ApiError { status: 502, .. }));
        assert!(exporter.exports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_given_stars_walk_starred_pages() {
        let mut api = FakeApi::octocat();
        api.starred_pages = HashMap::from([(1, repos(&[0; 2])), (2, repos(&[0; 1]))]);
        let config = PipelineConfig {
            page_size: 2,
            star_source: StarSource::Given,
            ..Default::default()
        };
        let pipeline = Pipeline::new(&api, config);

        let profile = pipeline.profile("octocat", ColorChoice::Pink).await.unwrap();

        assert_eq!(profile.star_total(), 3);
        assert!(api.calls().iter().all(|c| !c.starts_with("repos")));
    }

    #[tokio::test]
    async fn test_invalid_login_fetches_nothing() {
        let api = FakeApi::octocat();
        let pipeline = Pipeline::new(&api, PipelineConfig::default());

        for input in ["", "   ", "-octocat", "octo cat"] {
            let err = pipeline.profile(input, ColorChoice::Blue).await.unwrap_err();
            assert!(matches!(err, PipelineError::InvalidInput(_)), "{input:?}");
            assert_eq!(err.exit_code() as i32, 64);
        }
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_login_is_trimmed_before_fetch() {
        let api = FakeApi::octocat();
        let pipeline = Pipeline::new(&api, PipelineConfig::default());

        pipeline.profile("  octocat\n", ColorChoice::Blue).await.unwrap();
        assert!(api.calls().contains(&"user:octocat".to_string()));
    }

    #[tokio::test]
    async fn test_export_failure_is_classified() {
        let api = FakeApi::octocat();
        let exporter = FakeExporter {
            fail: true,
            ..Default::default()
        };
        let pipeline = Pipeline::new(&api, PipelineConfig::default());

        let err = pipeline.run("octocat", ColorChoice::Blue, &exporter).await.unwrap_err();

        assert!(matches!(err, PipelineError::ExportError(_)));
        assert_eq!(err.exit_code() as i32, 6);
    }

    #[tokio::test]
    async fn test_output_base_override_is_sanitized() {
        let api = FakeApi::octocat();
        let exporter = FakeExporter::default();
        let config = PipelineConfig {
            output_base: Some("my card".to_string()),
            ..Default::default()
        };
        let pipeline = Pipeline::new(&api, config);

        let report = pipeline.run("octocat", ColorChoice::Blue, &exporter).await.unwrap();
        assert_eq!(report.export.pdf_path, PathBuf::from("my_card.pdf"));
    }

    #[test]
    fn test_http_error_classification() {
        let cases = [
            (not_found(), "userNotFound"),
            (
                HttpError::Status {
                    status: 403,
                    message: "API rate limit exceeded".to_string(),
                },
                "apiError",
            ),
            (HttpError::Transport("connection refused".to_string()), "transportError"),
            (HttpError::Parse("expected value".to_string()), "parseError"),
        ];

        for (err, kind) in cases {
            assert_eq!(PipelineError::from_http(err, "octocat").kind(), kind);
        }
    }

    #[test]
    fn test_user_not_found_message_is_distinct() {
        let not_found = PipelineError::from_http(not_found(), "octocat").to_string();
        let other = PipelineError::from_http(
            HttpError::Status {
                status: 500,
                message: "Server Error".to_string(),
            },
            "octocat",
        )
        .to_string();

        assert!(not_found.contains("'octocat' not found"));
        assert!(other.contains("500"));
        assert_ne!(not_found, other);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_real_exporter_leaves_no_intermediate_html() {
        use ghcard_export::{CommandExporter, ExportSettings};

        let dir = tempfile::tempdir().unwrap();
        let api = FakeApi::octocat();
        let pipeline = Pipeline::new(&api, PipelineConfig::default());

        for (converter, ok) in [("cp", true), ("false", false)] {
            let exporter = CommandExporter::new(ExportSettings {
                output_dir: dir.path().to_path_buf(),
                converter: Some(converter.to_string()),
                ..Default::default()
            });
            let result = pipeline.run("octocat", ColorChoice::Blue, &exporter).await;
            assert_eq!(result.is_ok(), ok);

            let names: Vec<String> = std::fs::read_dir(dir.path())
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
                .collect();
            assert_eq!(names, vec!["octocat.pdf"]);
        }
    }
}
