use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::domain::commit::{Commit, GroupedCommitsOutput};
use crate::error::{Error, Result};
use crate::repo::github::auth::resolve_github_token;
use crate::repo::github::timeutil::{iso_date_only_utc, parse_iso_date_only_utc};
use crate::repo::github::{DEFAULT_API_BASE, fetch_my_commits_sync};

pub const API_URL_ENV: &str = "GITHUB_API_URL";

#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub token: String,
    pub api_base: String,
}

impl GithubConfig {
    /// Build from an environment-like lookup (`GITHUB_TOKEN`, optional `GITHUB_API_URL`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = resolve_github_token(&lookup)?;
        let api_base = lookup(API_URL_ENV)
            .map(|raw| raw.trim().trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Ok(Self { token, api_base })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub since: OffsetDateTime,
    pub until: OffsetDateTime,
}

/// Turn the CLI flags into a range.
///
/// Explicit bounds must come as a pair; without them the range is the
/// trailing `days` ending at `now`.
pub fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    days: u32,
    now: OffsetDateTime,
) -> Result<DateRange> {
    match (start, end) {
        (None, None) => {
            let since = now
                .checked_sub(Duration::days(i64::from(days)))
                .ok_or_else(|| Error::Argument(format!("--days {days} reaches too far back")))?;
            Ok(DateRange { since, until: now })
        }
        (Some(start), Some(end)) => {
            let since = parse_iso_date_only_utc(start).ok_or_else(|| {
                Error::Argument(format!("Invalid --start date: {start} (expected YYYY-MM-DD)"))
            })?;
            let until = parse_iso_date_only_utc(end).ok_or_else(|| {
                Error::Argument(format!("Invalid --end date: {end} (expected YYYY-MM-DD)"))
            })?;
            if since > until {
                return Err(Error::Argument(
                    "--start must be less than or equal to --end".to_string(),
                ));
            }
            Ok(DateRange { since, until })
        }
        _ => Err(Error::Argument(
            "Both --start and --end are required when specifying a range".to_string(),
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `{ total, repos: [{ repository, commits }] }`
    Grouped,
    /// Flat array of commit records
    Flat,
}

pub fn render(commits: Vec<Commit>, format: OutputFormat) -> Result<String> {
    let json = match format {
        OutputFormat::Grouped => {
            serde_json::to_string_pretty(&GroupedCommitsOutput::from_commits(&commits))?
        }
        OutputFormat::Flat => {
            let flat: Vec<Commit> = commits.into_iter().map(Commit::into_subject_only).collect();
            serde_json::to_string_pretty(&flat)?
        }
    };
    Ok(json)
}

/// Fetch the token owner's commits in `range` and render them.
pub fn run(config: &GithubConfig, range: DateRange, format: OutputFormat) -> Result<String> {
    debug!(
        since = %iso_date_only_utc(range.since),
        until = %iso_date_only_utc(range.until),
        api_base = %config.api_base,
        "fetching commits"
    );
    let commits = fetch_my_commits_sync(&config.token, &config.api_base, range.since, range.until)?;
    render(commits, format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    use super::*;

    const NOW: OffsetDateTime = datetime!(2026-10-16 12:34:56 UTC);

    fn argument_message(err: Error) -> String {
        match err {
            Error::Argument(msg) => msg,
            other => panic!("expected argument error, got {other:?}"),
        }
    }

    #[test]
    fn defaults_to_trailing_window() {
        let range = resolve_range(None, None, 30, NOW).unwrap();
        assert_eq!(range.until, NOW);
        assert_eq!(range.since, datetime!(2026-09-16 12:34:56 UTC));

        let week = resolve_range(None, None, 7, NOW).unwrap();
        assert_eq!(week.since, datetime!(2026-10-09 12:34:56 UTC));
    }

    #[test]
    fn huge_window_is_an_argument_error() {
        let msg = argument_message(resolve_range(None, None, u32::MAX, NOW).unwrap_err());
        assert_eq!(msg, "--days 4294967295 reaches too far back");
    }

    #[test]
    fn explicit_range_is_utc_midnights() {
        let range = resolve_range(Some("2026-01-01"), Some("2026-01-31"), 30, NOW).unwrap();
        assert_eq!(range.since, datetime!(2026-01-01 00:00:00 UTC));
        assert_eq!(range.until, datetime!(2026-01-31 00:00:00 UTC));
    }

    #[test]
    fn same_day_range_is_allowed() {
        let range = resolve_range(Some("2026-01-05"), Some("2026-01-05"), 30, NOW).unwrap();
        assert_eq!(range.since, range.until);
    }

    #[test]
    fn one_sided_range_is_rejected() {
        for (start, end) in [(Some("2026-01-01"), None), (None, Some("2026-01-01"))] {
            let msg = argument_message(resolve_range(start, end, 30, NOW).unwrap_err());
            assert_eq!(msg, "Both --start and --end are required when specifying a range");
        }
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let msg = argument_message(
            resolve_range(Some("2026-13-01"), Some("2026-12-01"), 30, NOW).unwrap_err(),
        );
        assert_eq!(msg, "Invalid --start date: 2026-13-01 (expected YYYY-MM-DD)");

        let msg = argument_message(
            resolve_range(Some("2026-01-01"), Some("nope"), 30, NOW).unwrap_err(),
        );
        assert_eq!(msg, "Invalid --end date: nope (expected YYYY-MM-DD)");
    }

    #[test]
    fn inverted_range_is_rejected() {
        let msg = argument_message(
            resolve_range(Some("2026-02-01"), Some("2026-01-01"), 30, NOW).unwrap_err(),
        );
        assert_eq!(msg, "--start must be less than or equal to --end");
    }

    #[test]
    fn config_reads_token_and_api_base() {
        let config = GithubConfig::from_lookup(|name| match name {
            "GITHUB_TOKEN" => Some(" tok ".to_string()),
            "GITHUB_API_URL" => Some("https://ghe.example.com/api/v3/".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.token, "tok");
        assert_eq!(config.api_base, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn config_defaults_api_base() {
        let config = GithubConfig::from_lookup(|name| {
            (name == "GITHUB_TOKEN").then(|| "tok".to_string())
        })
        .unwrap();
        assert_eq!(config.api_base, "https://api.github.com");
    }

    #[test]
    fn config_requires_token() {
        let err = GithubConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    fn sample() -> Vec<Commit> {
        vec![
            Commit {
                date: "2026-01-30T00:01:17.000+09:00".to_string(),
                repository: "o/r".to_string(),
                sha: "aaa".to_string(),
                message: "subject\n\nbody".to_string(),
                url: "https://github.com/o/r/commit/aaa".to_string(),
            },
            Commit {
                date: "2026-01-29T00:00:00.000+09:00".to_string(),
                repository: "o/s".to_string(),
                sha: "bbb".to_string(),
                message: "other".to_string(),
                url: "https://github.com/o/s/commit/bbb".to_string(),
            },
        ]
    }

    #[test]
    fn renders_grouped_output() {
        let json = render(sample(), OutputFormat::Grouped).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "total": 2,
                "repos": [
                    {
                        "repository": "o/r",
                        "commits": [{ "date": "2026-01-30T00:01:17.000+09:00", "message": "subject" }]
                    },
                    {
                        "repository": "o/s",
                        "commits": [{ "date": "2026-01-29T00:00:00.000+09:00", "message": "other" }]
                    }
                ]
            })
        );
        assert!(json.contains("\n  \"total\": 2"));
    }

    #[test]
    fn renders_flat_output() {
        let json = render(sample(), OutputFormat::Flat).unwrap();
        let value: Vec<Commit> = serde_json::from_str(&json).unwrap();
        assert_eq!(value.len(), 2);
        assert_eq!(value[0].message, "subject");
        assert_eq!(value[0].url, "https://github.com/o/r/commit/aaa");
    }

    #[test]
    fn renders_empty_grouped_output() {
        let json = render(Vec::new(), OutputFormat::Grouped).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!({ "total": 0, "repos": [] }));
    }
}
