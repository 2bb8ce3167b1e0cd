//! CSV exporter
//!
//! Sorts the collected repositories and writes them as one delimited file.

use super::format::{truncate, DEFAULT_DESCRIPTION_LENGTH};
use crate::error::{Error, Result};
use crate::types::Repository;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column names, in output order
pub const CSV_HEADER: [&str; 6] = [
    "full_name",
    "description",
    "stargazers_count",
    "language",
    "updated_at",
    "url",
];

/// Row terminator
pub const LINE_TERMINATOR: &str = "\r\n";

/// Configuration for the CSV exporter
#[derive(Debug, Clone)]
pub struct CsvExporterConfig {
    delimiter: char,
    description_length: usize,
}

impl Default for CsvExporterConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            description_length: DEFAULT_DESCRIPTION_LENGTH,
        }
    }
}

impl CsvExporterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the maximum description length
    #[must_use]
    pub fn with_description_length(mut self, length: usize) -> Self {
        self.description_length = length;
        self
    }

    /// Get the field delimiter
    #[must_use]
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Get the maximum description length
    #[must_use]
    pub fn description_length(&self) -> usize {
        self.description_length
    }
}

/// Sort repositories by stars, most first, then by `updated_at`, newest
/// first. Full ties keep their input order.
pub fn sort_repositories(repositories: Vec<Repository>) -> Result<Vec<Repository>> {
    let mut keyed = repositories
        .into_iter()
        .map(|repo| Ok((repo.updated_at_utc()?, repo)))
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by(|(a_updated, a), (b_updated, b)| {
        b.stargazers_count
            .cmp(&a.stargazers_count)
            .then_with(|| b_updated.cmp(a_updated))
    });

    Ok(keyed.into_iter().map(|(_, repo)| repo).collect())
}

/// Writes repositories as sorted CSV
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    config: CsvExporterConfig,
}

impl CsvExporter {
    /// Create an exporter with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an exporter with custom configuration
    pub fn with_config(config: CsvExporterConfig) -> Self {
        Self { config }
    }

    /// Get the exporter configuration
    pub fn config(&self) -> &CsvExporterConfig {
        &self.config
    }

    /// Sort and write to `path`, replacing any existing file.
    ///
    /// Returns the number of data rows written.
    pub fn write_to_path(
        &self,
        repositories: Vec<Repository>,
        path: impl AsRef<Path>,
    ) -> Result<usize> {
        let path = path.as_ref();
        let sorted = sort_repositories(repositories)?;

        let file = File::create(path)
            .map_err(|e| Error::output(format!("Failed to create {}: {e}", path.display())))?;
        let mut writer = BufWriter::new(file);
        let rows = self.write_sorted(&sorted, &mut writer)?;
        writer.flush()?;
        Ok(rows)
    }

    /// Sort and write to any writer. Returns the number of data rows.
    pub fn write<W: Write>(&self, repositories: Vec<Repository>, writer: W) -> Result<usize> {
        let sorted = sort_repositories(repositories)?;
        self.write_sorted(&sorted, writer)
    }

    fn write_sorted<W: Write>(&self, repositories: &[Repository], mut writer: W) -> Result<usize> {
        self.write_row(&mut writer, &CSV_HEADER.map(Cow::Borrowed))?;

        for repo in repositories {
            let row = [
                Cow::Borrowed(repo.full_name.as_str()),
                Cow::Owned(truncate(
                    repo.description.as_deref(),
                    self.config.description_length,
                )),
                Cow::Owned(repo.stargazers_count.to_string()),
                Cow::Borrowed(repo.language.as_deref().unwrap_or_default()),
                Cow::Borrowed(repo.updated_at.as_str()),
                Cow::Borrowed(repo.html_url.as_str()),
            ];
            self.write_row(&mut writer, &row)?;
        }

        Ok(repositories.len())
    }

    fn write_row<W: Write>(&self, writer: &mut W, fields: &[Cow<'_, str>]) -> Result<()> {
        let mut line = String::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                line.push(self.config.delimiter);
            }
            line.push_str(&escape_field(field, self.config.delimiter));
        }
        line.push_str(LINE_TERMINATOR);
        writer.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Quote a field if it holds the delimiter, a quote or a line break
fn escape_field(field: &str, delimiter: char) -> Cow<'_, str> {
    if field.contains(delimiter) || field.contains(['"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
