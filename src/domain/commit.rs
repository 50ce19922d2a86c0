use serde::{Deserialize, Serialize};

/// One commit returned by the search API, normalized for output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// `YYYY-MM-DDTHH:mm:ss.SSS+09:00`, or the raw source text when it could not be parsed.
    pub date: String,
    pub repository: String, // "{owner}/{repo}"
    pub sha: String,
    /// Full commit message. Output projections trim it to the subject line.
    pub message: String,
    pub url: String,
}

impl Commit {
    pub fn subject(&self) -> &str {
        subject_line(&self.message)
    }

    /// Same record with the message cut down to its first line.
    pub fn into_subject_only(mut self) -> Self {
        let subject_len = self.subject().len();
        self.message.truncate(subject_len);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitItem {
    pub date: String,
    pub message: String,
}

impl From<&Commit> for CommitItem {
    fn from(commit: &Commit) -> Self {
        Self {
            date: commit.date.clone(),
            message: commit.subject().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryCommits {
    pub repository: String,
    pub commits: Vec<CommitItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedCommitsOutput {
    pub total: usize,
    pub repos: Vec<RepositoryCommits>,
}

pub fn subject_line(message: &str) -> &str {
    let first = message.split('\n').next().unwrap_or_default();
    first.strip_suffix('\r').unwrap_or(first)
}
