//! CLI runner - executes one export

use crate::cache::{FileCache, NoCache, ResponseCache};
use crate::config::Settings;
use crate::error::{Result, ResultExt};
use crate::http::HttpClient;
use crate::output::{CsvExporter, CsvExporterConfig};
use crate::pagination::Pager;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// `total_count` reported on the first page
    pub total_reported: Option<u64>,
    /// Records fetched across all pages
    pub fetched: usize,
    /// Pages fetched
    pub pages: u32,
    /// File written
    pub output: PathBuf,
}

/// Wires settings into the pager and the exporter
pub struct Runner {
    settings: Settings,
    cache: Option<Arc<dyn ResponseCache>>,
}

impl Runner {
    /// Create a new runner
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            cache: None,
        }
    }

    /// Use this cache instead of the one named in the settings
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Get the run settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetch every page, then sort and write the CSV file.
    ///
    /// Configuration is validated before any request is made, and the
    /// output file is only touched after the last page has arrived.
    pub async fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();
        self.settings.validate()?;

        let url = self.settings.search_url()?;
        let client =
            HttpClient::with_config(self.settings.http_config())?.with_cache(self.build_cache());

        info!("Searching {url} for '{}'", self.settings.query);
        let mut pager = Pager::new(&client, url.as_str(), self.settings.search_params());
        let repositories = pager.collect_all().await?;
        let state = pager.state().clone();
        let fetched = repositories.len();
        info!("Total repositories fetched: {fetched}");

        let exporter = CsvExporter::with_config(
            CsvExporterConfig::new().with_description_length(self.settings.description_length),
        );
        let output = self.settings.csv_file.clone();
        exporter
            .write_to_path(repositories, &output)
            .with_context(|| format!("Writing {}", output.display()))?;
        info!(
            "Data written to {} in {:.1}s",
            output.display(),
            start.elapsed().as_secs_f64()
        );

        Ok(RunSummary {
            total_reported: state.total_reported,
            fetched,
            pages: state.pages,
            output,
        })
    }

    fn build_cache(&self) -> Arc<dyn ResponseCache> {
        if let Some(cache) = &self.cache {
            return Arc::clone(cache);
        }
        match &self.settings.cache_file {
            Some(path) => Arc::new(FileCache::open(path, self.settings.cache_ttl)),
            None => Arc::new(NoCache),
        }
    }
}
