//! Link-header pager over the search endpoint
//!
//! Walks `rel="next"` links until the server stops sending one. Query
//! parameters go out with the first request only; every `next` URL already
//! carries them.

use super::link::parse_link_header;
use super::types::PaginationState;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::types::{QueryParams, Repository, SearchPage};
use futures::stream::{self, Stream, TryStreamExt};
use tracing::{debug, info, warn};

/// Relation followed to reach the next page
pub const NEXT_REL: &str = "next";

/// Sequential, single-use pager over a search result set
#[derive(Debug)]
pub struct Pager<'a> {
    client: &'a HttpClient,
    next_url: Option<String>,
    params: Option<QueryParams>,
    state: PaginationState,
}

impl<'a> Pager<'a> {
    /// Create a pager starting at `url` with the initial query parameters
    pub fn new(client: &'a HttpClient, url: impl Into<String>, params: QueryParams) -> Self {
        Self {
            client,
            next_url: Some(url.into()),
            params: Some(params),
            state: PaginationState::new(),
        }
    }

    /// Progress so far
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Fetch the next page of records in API order.
    ///
    /// Returns `Ok(None)` once the last page has been consumed. After an
    /// error the pager is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Repository>>> {
        let Some(url) = self.next_url.take() else {
            self.state.mark_done();
            return Ok(None);
        };
        let params = self.params.take();

        match self.fetch_page(&url, params.as_deref()).await {
            Ok(items) => Ok(Some(items)),
            Err(e) => {
                self.next_url = None;
                self.state.mark_done();
                Err(e)
            }
        }
    }

    async fn fetch_page(
        &mut self,
        url: &str,
        params: Option<&[(String, String)]>,
    ) -> Result<Vec<Repository>> {
        let response = self.client.get(url, params).await?;
        let page: SearchPage = response.json()?;

        if self.state.report_total(page.total_count) {
            info!("Total repositories to fetch: {}", page.total_count);
        }
        if page.incomplete_results {
            warn!("Search API reported incomplete results for {url}");
        }

        self.state.add_page(page.items.len());
        debug!(
            "Page {}: fetched {} repositories",
            self.state.pages,
            page.items.len()
        );

        let mut links = parse_link_header(response.header("link").unwrap_or_default())?;
        self.next_url = links.remove(NEXT_REL);
        if self.next_url.is_none() {
            self.state.mark_done();
        }

        Ok(page.items)
    }

    /// Turn the pager into a lazy stream of records
    pub fn into_stream(self) -> impl Stream<Item = Result<Repository>> + 'a {
        stream::try_unfold(self, |mut pager| async move {
            let page = pager.next_page().await?;
            Ok::<_, Error>(page.map(|items| {
                let records = items.into_iter().map(Ok::<Repository, Error>);
                (stream::iter(records), pager)
            }))
        })
        .try_flatten()
    }

    /// Drain every remaining page into one result set.
    ///
    /// Logs a warning when the number of records differs from the total the
    /// API reported.
    pub async fn collect_all(&mut self) -> Result<Vec<Repository>> {
        let mut repositories = Vec::new();
        while let Some(items) = self.next_page().await? {
            repositories.extend(items);
        }

        if self.state.matches_reported_total() == Some(false) {
            warn!(
                "Fetched {} repositories but the API reported {}",
                self.state.total_fetched,
                self.state.total_reported.unwrap_or_default()
            );
        }

        Ok(repositories)
    }
}
