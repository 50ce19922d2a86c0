pub mod auth;
pub mod model;
pub mod timeutil;

use http::StatusCode;
use http::header::{ACCEPT, HeaderName};
use model::{SearchCommitItem, SearchCommitsResponse, Viewer};
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use time::OffsetDateTime;
use timeutil::{iso_date_only_utc, to_jst_iso};
use tracing::{debug, info, warn};

use crate::domain::commit::Commit;
use crate::error::{Error, Result};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const PER_PAGE: usize = 100;

const API_VERSION: &str = "2022-11-28";
// Commit search historically required the cloak preview media type.
const SEARCH_ACCEPT: &str = "application/vnd.github.cloak-preview+json, application/vnd.github+json";

/// Status and body of a GET, before any status handling.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    fn reason(&self) -> String {
        self.status.canonical_reason().unwrap_or_default().to_string()
    }
}

/// Minimal transport used by the fetch pipeline.
#[allow(async_fn_in_trait)]
pub trait GithubApi {
    /// GET `path` (including query string) relative to the API base.
    async fn get(&self, path: &str) -> Result<RawResponse>;
}

pub struct OctocrabApi {
    octo: Octocrab,
    api_base: String,
}

impl OctocrabApi {
    pub fn new(token: &str, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();
        // The auth layer only signs requests whose host matches `base_uri`.
        let mut builder = Octocrab::builder()
            .personal_token(token.to_owned())
            .add_header(ACCEPT, SEARCH_ACCEPT.to_string())
            .add_header(
                HeaderName::from_static("x-github-api-version"),
                API_VERSION.to_string(),
            )
            .base_uri(api_base.as_str())?;
        builder.add_retry_config(RetryConfig::None);
        let octo = builder.build()?;
        Ok(Self { octo, api_base })
    }
}

impl GithubApi for OctocrabApi {
    async fn get(&self, path: &str) -> Result<RawResponse> {
        let url = format!("{}{}", self.api_base, path);
        let response = self.octo._get(url).await?;
        let status = response.status();
        let body = self.octo.body_to_string(response).await?;
        Ok(RawResponse { status, body })
    }
}

/// Login of the user that owns the token.
pub async fn get_my_login(api: &impl GithubApi) -> Result<String> {
    let resp = api.get("/user").await?;
    if !resp.status.is_success() {
        return Err(Error::Auth {
            status: resp.status.as_u16(),
            reason: resp.reason(),
            body: resp.body,
        });
    }
    let viewer: Viewer = serde_json::from_str(&resp.body)?;
    Ok(viewer.login)
}

/// `author:<login> committer-date:<since>..<until>`, both bounds inclusive.
pub fn search_query(login: &str, since: OffsetDateTime, until: OffsetDateTime) -> String {
    format!(
        "author:{login} committer-date:{}..{}",
        iso_date_only_utc(since),
        iso_date_only_utc(until)
    )
}

fn search_path(query: &str, page: u32) -> String {
    format!(
        "/search/commits?q={}&sort=committer-date&order=desc&per_page={PER_PAGE}&page={page}",
        urlencoding::encode(query)
    )
}

fn to_commit(item: SearchCommitItem) -> Commit {
    let date = item
        .commit
        .source_date()
        .map(to_jst_iso)
        .unwrap_or_default();
    Commit {
        date,
        repository: item.repository.full_name,
        sha: item.sha,
        message: item.commit.message,
        url: item.html_url,
    }
}

/// Every commit authored by `login` with a committer date in `[since, until]`,
/// newest first.
///
/// Pages are requested one at a time and the loop ends on the first page
/// holding fewer than [`PER_PAGE`] items. A failed page fails the whole call.
pub async fn fetch_commits(
    api: &impl GithubApi,
    login: &str,
    since: OffsetDateTime,
    until: OffsetDateTime,
) -> Result<Vec<Commit>> {
    let query = search_query(login, since, until);
    let mut out: Vec<Commit> = Vec::new();
    let mut page: u32 = 1;

    loop {
        let resp = api.get(&search_path(&query, page)).await?;
        if !resp.status.is_success() {
            return Err(Error::Http {
                status: resp.status.as_u16(),
                reason: resp.reason(),
                body: resp.body,
            });
        }

        let data: SearchCommitsResponse = serde_json::from_str(&resp.body)?;
        let fetched = data.items.len();
        debug!(page, fetched, total_count = data.total_count, "fetched commit search page");
        if data.incomplete_results {
            warn!(page, "GitHub reported incomplete search results");
        }

        out.extend(data.items.into_iter().map(to_commit));

        if fetched < PER_PAGE {
            break;
        }
        page += 1;
    }

    Ok(out)
}

/// Synchronous facade that owns its own Tokio runtime.
pub fn fetch_my_commits_sync(
    token: &str,
    api_base: &str,
    since: OffsetDateTime,
    until: OffsetDateTime,
) -> Result<Vec<Commit>> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(async move {
        let api = OctocrabApi::new(token, api_base)?;
        let login = get_my_login(&api).await?;
        info!(%login, "resolved GitHub identity");
        let commits = fetch_commits(&api, &login, since, until).await?;
        info!(count = commits.len(), "fetched commits");
        Ok(commits)
    })
}
