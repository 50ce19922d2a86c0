use std::collections::HashMap;

use crate::domain::commit::{Commit, CommitItem, GroupedCommitsOutput, RepositoryCommits};

/// Bucket commits by repository.
///
/// Repositories appear in the order they are first seen, and each bucket keeps
/// its commits in input order. Nothing is sorted.
pub fn group_commits_by_repository(commits: &[Commit]) -> Vec<RepositoryCommits> {
    let mut groups: Vec<RepositoryCommits> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for commit in commits {
        let slot = *index.entry(commit.repository.as_str()).or_insert_with(|| {
            groups.push(RepositoryCommits {
                repository: commit.repository.clone(),
                commits: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].commits.push(CommitItem::from(commit));
    }

    groups
}

impl GroupedCommitsOutput {
    pub fn from_commits(commits: &[Commit]) -> Self {
        Self {
            total: commits.len(),
            repos: group_commits_by_repository(commits),
        }
    }
}
