//! Star aggregation across paginated listings.
//!
//! Received stars: the page count comes from the `public_repos` hint on the
//! user object, pages 2..=n are fetched concurrently and the sum is reduced
//! only after every page resolved. Any failed page aborts the whole count,
//! a partial sum is never returned.
//!
//! Given stars: the starred listing has no count hint, so pages are walked
//! in order until one comes back shorter than the page size.

use futures::future::try_join_all;
use ghcard_core::RawRepository;
use tracing::{debug, instrument};

use crate::api::{GitHubApi, StarSource};
use crate::error::HttpError;

/// Page size used unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest page size GitHub honors.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Walks repository listings for one user and totals stars.
pub struct Paginator<'a> {
    api: &'a dyn GitHubApi,
    page_size: u32,
}

impl<'a> Paginator<'a> {
    /// Creates a paginator; the page size is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(api: &'a dyn GitHubApi, page_size: u32) -> Self {
        Self {
            api,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Returns the effective page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of pages to request for `total_repo_count` repositories.
    ///
    /// Page 1 is always requested, even for zero repositories.
    pub fn page_count(total_repo_count: u64, page_size: u32) -> u32 {
        let pages = total_repo_count.div_ceil(u64::from(page_size.max(1))).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Fetches page 1 of the listing behind `source`.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn first_page(
        &self,
        source: StarSource,
        login: &str,
    ) -> Result<Vec<RawRepository>, HttpError> {
        self.api.star_page(source, login, 1, self.page_size).await
    }

    /// Fetches every repository page and sums the star counts.
    ///
    /// # Errors
    ///
    /// Returns the first page error; no partial total is produced.
    pub async fn collect_star_total(
        &self,
        login: &str,
        total_repo_count: u64,
    ) -> Result<u64, HttpError> {
        let first = self.first_page(StarSource::Received, login).await?;
        self.finish_received(login, &first, total_repo_count).await
    }

    /// Completes a star count given the already fetched page 1.
    ///
    /// # Errors
    ///
    /// Returns the first page error; no partial total is produced.
    pub async fn finish(
        &self,
        source: StarSource,
        login: &str,
        first_page: &[RawRepository],
        total_repo_count: u64,
    ) -> Result<u64, HttpError> {
        match source {
            StarSource::Received => {
                self.finish_received(login, first_page, total_repo_count)
                    .await
            }
            StarSource::Given => self.finish_given(login, first_page).await,
        }
    }

    /// Fetches pages 2..=n concurrently and sums stars over all pages.
    #[instrument(skip(self, first_page), fields(page_size = self.page_size))]
    async fn finish_received(
        &self,
        login: &str,
        first_page: &[RawRepository],
        total_repo_count: u64,
    ) -> Result<u64, HttpError> {
        let pages = Self::page_count(total_repo_count, self.page_size);
        debug!(pages, "Fetching remaining repository pages");

        let rest = try_join_all(
            (2..=pages).map(|page| self.api.repos_page(login, page, self.page_size)),
        )
        .await?;

        let total = RawRepository::star_sum(first_page)
            + rest.iter().map(|page| RawRepository::star_sum(page)).sum::<u64>();
        debug!(total, "Star total computed");
        Ok(total)
    }

    /// Walks starred pages until a short page and counts entries.
    #[instrument(skip(self, first_page), fields(page_size = self.page_size))]
    async fn finish_given(
        &self,
        login: &str,
        first_page: &[RawRepository],
    ) -> Result<u64, HttpError> {
        let page_size = self.page_size as usize;
        let mut count = first_page.len() as u64;
        let mut last_len = first_page.len();
        let mut page = 1;

        while last_len == page_size {
            page += 1;
            let next = self.api.starred_page(login, page, self.page_size).await?;
            count += next.len() as u64;
            last_len = next.len();
        }

        debug!(pages = page, count, "Starred count computed");
        Ok(count)
    }
}

// ============================================================================
// Tests
// ============================================================================
