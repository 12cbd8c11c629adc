use serde::{Deserialize, Serialize};

/// Account that owns a repository or authored an issue, pull request or review.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct Account {
    pub login: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Repository {
    pub name: String,
    pub owner: Account,
    pub url: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Label {
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub user: Account,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub user: Account,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub id: u64,
    pub user: Account,
    pub state: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
}

/// Body of the repository topics endpoints (`GET`/`PUT .../topics`).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct Topics {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateIssueDto {
    pub owner: String,
    pub repo: String,
    pub title: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CloneIssueSourceDto {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CloneIssueDestinationDto {
    pub owner: String,
    pub repo: String,
}

/// Request body of `POST /repos/{owner}/{repo}/issues`
#[derive(Serialize, Debug)]
pub(crate) struct CreateIssueRequest<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<&'a str>,
}

impl CreateIssueDto {
    /// Builds the creation request for a copy of `issue` in the destination repository.
    pub fn from_issue(issue: &Issue, destination: &CloneIssueDestinationDto) -> Self {
        CreateIssueDto {
            owner: destination.owner.clone(),
            repo: destination.repo.clone(),
            title: issue.title.clone(),
            body: issue.body.clone(),
        }
    }
}
