use crate::error::{Error, Result};
use crate::github::client::{ApiResponse, GitHub};
use crate::github::models::Topics;
use crate::github::repositories::RepositorySource;
use crate::prompt::Confirm;
use crate::validation;
use async_trait::async_trait;
use tracing::{error, info, warn};

/// Statuses accepted from the topics endpoints, inclusive
const TOPIC_SUCCESS_RANGE: std::ops::RangeInclusive<u16> = 200..=202;

/// Per-repository topic updates, used by bulk topic operations.
#[async_trait]
pub trait TopicMutator: Send + Sync {
    async fn add_topic_to_repository(
        &self,
        topic: &str,
        owner: &str,
        repo_name: &str,
    ) -> Result<Option<Vec<String>>>;

    async fn remove_topic_from_repository(
        &self,
        topic: &str,
        owner: &str,
        repo_name: &str,
    ) -> Result<Option<Vec<String>>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicChange {
    Add,
    Remove,
}

impl TopicChange {
    /// Computes the replacement topic set. Both changes are idempotent.
    pub fn apply(&self, current: &[String], topic: &str) -> Vec<String> {
        let mut names: Vec<String> = current
            .iter()
            .filter(|name| name.as_str() != topic)
            .cloned()
            .collect();
        if *self == TopicChange::Add {
            names.push(topic.to_string());
        }
        names
    }

    fn describe(&self, topic: &str, org: &str, count: usize) -> String {
        match self {
            TopicChange::Add => {
                format!("Add topic '{topic}' to {count} repositories in {org}?")
            }
            TopicChange::Remove => {
                format!("Remove topic '{topic}' from {count} repositories in {org}?")
            }
        }
    }
}

/// GitHub stores topics lower-cased and trimmed.
pub fn normalize_topic(topic: &str) -> String {
    topic.trim().to_lowercase()
}

/// Outcome of a topic change on one repository.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryOutcome {
    pub owner: String,
    pub repository: String,
    /// Topics stored by GitHub, or the failure message.
    pub result: std::result::Result<Vec<String>, String>,
}

/// Outcome of a topic change across an organization.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkTopicReport {
    pub change: TopicChange,
    pub topic: String,
    pub outcomes: Vec<RepositoryOutcome>,
}

impl BulkTopicReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &RepositoryOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &RepositoryOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }
}

fn stored_topics(
    response: &ApiResponse,
    owner: &str,
    repo_name: &str,
) -> Result<Option<Vec<String>>> {
    if !TOPIC_SUCCESS_RANGE.contains(&response.status) {
        error!(
            status = response.status,
            "Failed to read topics for {owner}/{repo_name}: {}",
            response.message()
        );
        return Ok(None);
    }
    match response.parse::<Topics>() {
        Ok(Some(topics)) => Ok(Some(topics.names)),
        Ok(None) => {
            error!("GitHub returned no topics for {owner}/{repo_name}");
            Ok(None)
        }
        Err(err) => {
            error!("Unexpected topics response for {owner}/{repo_name}: {err}");
            Ok(None)
        }
    }
}

impl GitHub {
    /// Topic names of a repository, exactly as GitHub returns them.
    ///
    /// `Ok(None)` when the status is outside 200..=202 or the body is missing;
    /// the failure is logged.
    pub async fn topics_for_repository(
        &self,
        owner: &str,
        repo_name: &str,
    ) -> Result<Option<Vec<String>>> {
        validation::require_all(&[("owner", Some(owner)), ("repo", Some(repo_name))])?;

        let response = self
            .get(&format!("/repos/{owner}/{repo_name}/topics"), &[])
            .await?;
        stored_topics(&response, owner, repo_name)
    }

    async fn change_topic(
        &self,
        change: TopicChange,
        topic: &str,
        owner: &str,
        repo_name: &str,
    ) -> Result<Option<Vec<String>>> {
        validation::require_all(&[
            ("topic", Some(topic)),
            ("owner", Some(owner)),
            ("repo", Some(repo_name)),
        ])?;
        let topic = normalize_topic(topic);

        let Some(current) = self.topics_for_repository(owner, repo_name).await? else {
            return Ok(None);
        };
        let names = change.apply(&current, &topic);

        let response = self
            .put(
                &format!("/repos/{owner}/{repo_name}/topics"),
                &Topics { names },
            )
            .await?;
        let stored = stored_topics(&response, owner, repo_name)?;
        if stored.is_some() {
            info!(?change, topic = %topic, "Updated topics for {owner}/{repo_name}");
        }
        Ok(stored)
    }

    /// Adds `topic` and returns the topics GitHub stored.
    pub async fn add_topic_to_repository(
        &self,
        topic: &str,
        owner: &str,
        repo_name: &str,
    ) -> Result<Option<Vec<String>>> {
        self.change_topic(TopicChange::Add, topic, owner, repo_name)
            .await
    }

    /// Removes `topic` and returns the topics GitHub stored.
    pub async fn remove_topic_from_repository(
        &self,
        topic: &str,
        owner: &str,
        repo_name: &str,
    ) -> Result<Option<Vec<String>>> {
        self.change_topic(TopicChange::Remove, topic, owner, repo_name)
            .await
    }

    pub async fn add_topic_to_all_repositories(
        &self,
        topic: &str,
        confirm: &dyn Confirm,
    ) -> Result<BulkTopicReport> {
        change_topic_on_all_repositories(TopicChange::Add, topic, self, self, confirm).await
    }

    pub async fn remove_topic_from_all_repositories(
        &self,
        topic: &str,
        confirm: &dyn Confirm,
    ) -> Result<BulkTopicReport> {
        change_topic_on_all_repositories(TopicChange::Remove, topic, self, self, confirm).await
    }
}

#[async_trait]
impl TopicMutator for GitHub {
    async fn add_topic_to_repository(
        &self,
        topic: &str,
        owner: &str,
        repo_name: &str,
    ) -> Result<Option<Vec<String>>> {
        GitHub::add_topic_to_repository(self, topic, owner, repo_name).await
    }

    async fn remove_topic_from_repository(
        &self,
        topic: &str,
        owner: &str,
        repo_name: &str,
    ) -> Result<Option<Vec<String>>> {
        GitHub::remove_topic_from_repository(self, topic, owner, repo_name).await
    }
}

/// Applies a topic change to every repository of the default organization.
///
/// Nothing is mutated unless `confirm` accepts; a declined prompt returns
/// `Error::Aborted`. Repositories are updated one after another and a failure
/// on one does not stop the others.
pub async fn change_topic_on_all_repositories(
    change: TopicChange,
    topic: &str,
    source: &dyn RepositorySource,
    mutator: &dyn TopicMutator,
    confirm: &dyn Confirm,
) -> Result<BulkTopicReport> {
    validation::require("topic", Some(topic))?;
    let org = source.default_organization().to_string();
    let repositories = source
        .organization_repositories(None)
        .await?
        .unwrap_or_default();

    if !confirm.confirm(&change.describe(topic, &org, repositories.len())) {
        warn!(org, "Topic change declined");
        return Err(Error::Aborted);
    }

    let mut outcomes = Vec::with_capacity(repositories.len());
    for repository in &repositories {
        let owner = repository.owner.login.as_str();
        let name = repository.name.as_str();
        let result = match change {
            TopicChange::Add => mutator.add_topic_to_repository(topic, owner, name).await,
            TopicChange::Remove => {
                mutator
                    .remove_topic_from_repository(topic, owner, name)
                    .await
            }
        };
        let result = match result {
            Ok(Some(topics)) => Ok(topics),
            Ok(None) => Err("GitHub did not return the updated topics".to_string()),
            Err(err) => Err(err.to_string()),
        };
        if let Err(message) = &result {
            error!("Topic change failed for {owner}/{name}: {message}");
        }
        outcomes.push(RepositoryOutcome {
            owner: owner.to_string(),
            repository: name.to_string(),
            result,
        });
    }

    let report = BulkTopicReport {
        change,
        topic: topic.to_string(),
        outcomes,
    };
    info!(
        org,
        succeeded = report.succeeded().count(),
        failed = report.failed().count(),
        "Finished topic change"
    );
    Ok(report)
}
