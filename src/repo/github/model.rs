// Wire types for `GET /search/commits` and `GET /user`.

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Viewer {
    pub login: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SearchCommitsResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<SearchCommitItem>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SearchCommitItem {
    pub sha: String,
    pub html_url: String,
    pub repository: SearchRepository,
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SearchRepository {
    pub full_name: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub message: String,
    pub author: Option<GitActor>,
    pub committer: Option<GitActor>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct GitActor {
    pub date: Option<String>,
}

impl CommitDetail {
    /// Committer timestamp, falling back to the author timestamp.
    pub fn source_date(&self) -> Option<&str> {
        self.committer
            .as_ref()
            .and_then(|c| c.date.as_deref())
            .or_else(|| self.author.as_ref().and_then(|a| a.date.as_deref()))
    }
}
