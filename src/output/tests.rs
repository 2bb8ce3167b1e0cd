//! Tests for output module

use super::*;
use crate::error::Error;
use crate::types::Repository;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use test_case::test_case;

fn create_repo(name: &str, stars: u64, updated_at: &str) -> Repository {
    Repository {
        full_name: name.to_string(),
        description: Some(format!("description of {name}")),
        stargazers_count: stars,
        language: Some("Python".to_string()),
        updated_at: updated_at.to_string(),
        html_url: format!("https://github.com/{name}"),
    }
}

fn names(repos: &[Repository]) -> Vec<&str> {
    repos.iter().map(|r| r.full_name.as_str()).collect()
}

// ============================================================================
// Truncation Tests
// ============================================================================

#[test]
fn test_truncate_long_text() {
    let description = "This is a very long description that needs to be truncated.";
    assert_eq!(truncate(Some(description), 20), "This is a very lo...");
}

#[test]
fn test_truncate_short_text_unchanged() {
    assert_eq!(truncate(Some("Short description."), 20), "Short description.");
}

#[test]
fn test_truncate_none() {
    assert_eq!(truncate(None, 20), "");
}

#[test_case("abcdefghij", 10, "abcdefghij" ; "exactly at limit")]
#[test_case("abcdefghijk", 10, "abcdefg..." ; "one over limit")]
#[test_case("", 5, "" ; "empty string")]
#[test_case("abcdef", 3, "..." ; "limit equals marker")]
#[test_case("abcdef", 2, ".." ; "limit below marker")]
#[test_case("abcdef", 0, "" ; "zero limit")]
fn test_truncate_cases(input: &str, max: usize, expected: &str) {
    assert_eq!(truncate(Some(input), max), expected);
}

#[test]
fn test_truncate_length_property() {
    let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod";
    let len = text.chars().count();
    for max in 3..len {
        let out = truncate(Some(text), max);
        assert_eq!(out.chars().count(), max, "max = {max}");
        assert!(out.ends_with(ELLIPSIS));
    }
    for max in len..len + 5 {
        assert_eq!(truncate(Some(text), max), text);
    }
}

#[test]
fn test_truncate_counts_chars_not_bytes() {
    let text = "日本語のリポジトリの説明文です";
    let out = truncate(Some(text), 8);
    assert_eq!(out, "日本語のリ...");
    assert_eq!(out.chars().count(), 8);
}

#[test]
fn test_truncate_default_length() {
    let long = "x".repeat(200);
    assert_eq!(
        truncate(Some(long.as_str()), DEFAULT_DESCRIPTION_LENGTH)
            .chars()
            .count(),
        80
    );
}

// ============================================================================
// Sort Tests
// ============================================================================

#[test]
fn test_sort_higher_stars_first_regardless_of_input_order() {
    let low = create_repo("repo1", 10, "2023-01-01T00:00:00Z");
    let high = create_repo("repo2", 20, "2023-01-02T00:00:00Z");

    let sorted = sort_repositories(vec![low.clone(), high.clone()]).unwrap();
    assert_eq!(names(&sorted), vec!["repo2", "repo1"]);

    let sorted = sort_repositories(vec![high, low]).unwrap();
    assert_eq!(names(&sorted), vec!["repo2", "repo1"]);
}

#[test]
fn test_sort_ties_broken_by_most_recent_update() {
    let repos = vec![
        create_repo("old", 5, "2022-06-01T00:00:00Z"),
        create_repo("newest", 5, "2024-06-01T00:00:00Z"),
        create_repo("middle", 5, "2023-06-01T00:00:00Z"),
        create_repo("popular", 50, "2020-01-01T00:00:00Z"),
    ];

    let sorted = sort_repositories(repos).unwrap();
    assert_eq!(names(&sorted), vec!["popular", "newest", "middle", "old"]);
}

#[test]
fn test_sort_full_ties_keep_input_order() {
    let repos = vec![
        create_repo("first", 1, "2023-01-01T00:00:00Z"),
        create_repo("second", 1, "2023-01-01T00:00:00Z"),
        create_repo("third", 1, "2023-01-01T00:00:00Z"),
    ];

    let sorted = sort_repositories(repos).unwrap();
    assert_eq!(names(&sorted), vec!["first", "second", "third"]);
}

#[test]
fn test_sort_rejects_bad_timestamp() {
    let repos = vec![
        create_repo("good", 1, "2023-01-01T00:00:00Z"),
        create_repo("bad", 2, "yesterday"),
    ];

    let err = sort_repositories(repos).unwrap_err();
    assert!(matches!(err, Error::InvalidTimestamp { .. }));
}

// ============================================================================
// Exporter Tests
// ============================================================================

#[test]
fn test_exporter_config_builder() {
    let config = CsvExporterConfig::new()
        .with_delimiter(';')
        .with_description_length(40);
    assert_eq!(config.delimiter(), ';');
    assert_eq!(config.description_length(), 40);

    let default = CsvExporter::new();
    assert_eq!(default.config().delimiter(), ',');
    assert_eq!(default.config().description_length(), 80);
}

#[test]
fn test_exporter_writes_header_and_sorted_rows() {
    let repos = vec![
        create_repo("repo1", 10, "2023-01-01T00:00:00Z"),
        create_repo("repo2", 20, "2023-01-02T00:00:00Z"),
    ];

    let mut buf = Vec::new();
    let rows = CsvExporter::new().write(repos, &mut buf).unwrap();
    assert_eq!(rows, 2);

    let text = String::from_utf8(buf).unwrap();
    let expected = "full_name,description,stargazers_count,language,updated_at,url\r\n\
                    repo2,description of repo2,20,Python,2023-01-02T00:00:00Z,https://github.com/repo2\r\n\
                    repo1,description of repo1,10,Python,2023-01-01T00:00:00Z,https://github.com/repo1\r\n";
    assert_eq!(text, expected);
}

#[test]
fn test_exporter_missing_fields_and_quoting() {
    let repo = Repository {
        full_name: "a/b".to_string(),
        description: Some("Fast, \"simple\" and small".to_string()),
        stargazers_count: 0,
        language: None,
        updated_at: "2023-01-01T00:00:00Z".to_string(),
        html_url: "https://github.com/a/b".to_string(),
    };
    let no_description = Repository {
        description: None,
        full_name: "c/d".to_string(),
        ..repo.clone()
    };

    let mut buf = Vec::new();
    CsvExporter::new()
        .write(vec![repo, no_description], &mut buf)
        .unwrap();

    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.split("\r\n").collect();
    assert_eq!(
        lines[1],
        "a/b,\"Fast, \"\"simple\"\" and small\",0,,2023-01-01T00:00:00Z,https://github.com/a/b"
    );
    assert_eq!(lines[2], "c/d,,0,,2023-01-01T00:00:00Z,https://github.com/c/d");
}

#[test]
fn test_exporter_truncates_description() {
    let mut repo = create_repo("a/b", 1, "2023-01-01T00:00:00Z");
    repo.description = Some("y".repeat(100));

    let mut buf = Vec::new();
    CsvExporter::with_config(CsvExporterConfig::new().with_description_length(10))
        .write(vec![repo], &mut buf)
        .unwrap();

    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains(",yyyyyyy...,"));
}

#[test]
fn test_exporter_empty_result_set_writes_header_only() {
    let mut buf = Vec::new();
    let rows = CsvExporter::new().write(Vec::new(), &mut buf).unwrap();
    assert_eq!(rows, 0);
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "full_name,description,stargazers_count,language,updated_at,url\r\n"
    );
}

#[test]
fn test_exporter_write_to_path_replaces_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quasar_repos.csv");
    std::fs::write(&path, "stale contents that are much longer than the new file\n").unwrap();

    let repos = vec![create_repo("only/one", 3, "2023-01-01T00:00:00Z")];
    let rows = CsvExporter::new().write_to_path(repos, &path).unwrap();
    assert_eq!(rows, 1);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains("stale"));
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn test_exporter_bad_timestamp_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");

    let repos = vec![create_repo("a/b", 1, "not-a-date")];
    let err = CsvExporter::new().write_to_path(repos, &path).unwrap_err();
    assert!(matches!(err, Error::InvalidTimestamp { .. }));
    assert!(!path.exists());
}

#[test]
fn test_exporter_unwritable_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-dir").join("out.csv");

    let err = CsvExporter::new()
        .write_to_path(vec![create_repo("a/b", 1, "2023-01-01T00:00:00Z")], &path)
        .unwrap_err();
    assert!(matches!(err, Error::Output { .. }));
}
