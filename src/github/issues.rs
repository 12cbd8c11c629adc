use crate::error::{Error, Result};
use crate::github::client::GitHub;
use crate::github::models::{
    CloneIssueDestinationDto, CloneIssueSourceDto, CreateIssueDto, CreateIssueRequest, Issue,
    PullRequest, Review,
};
use crate::validation;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

/// Issue creation statuses reported as "not created" rather than as errors
pub const CREATE_ISSUE_NO_RESULT_STATUSES: [u16; 5] = [300, 400, 401, 403, 404];

impl GitHub {
    /// GETs every page of a collection. Non-2xx statuses are logged and
    /// reported as `Ok(None)`.
    async fn fetch_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<Vec<T>>> {
        match self.get_all_pages(path, query).await {
            Ok(items) => Ok(Some(items)),
            Err(Error::Api { status, message }) => {
                error!(status, "Failed to fetch {path}: {message}");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Open issues of a repository.
    pub async fn get_issues(&self, owner: &str, repo: &str) -> Result<Option<Vec<Issue>>> {
        validation::require_all(&[("owner", Some(owner)), ("repo", Some(repo))])?;
        self.fetch_list(&format!("/repos/{owner}/{repo}/issues"), &[])
            .await
    }

    /// Open and closed issues of a repository.
    async fn get_all_issues(&self, owner: &str, repo: &str) -> Result<Option<Vec<Issue>>> {
        self.fetch_list(
            &format!("/repos/{owner}/{repo}/issues"),
            &[("state", "all".to_string())],
        )
        .await
    }

    pub async fn get_pull_requests(
        &self,
        owner: &str,
        repo_name: &str,
    ) -> Result<Option<Vec<PullRequest>>> {
        validation::require_all(&[("owner", Some(owner)), ("repo", Some(repo_name))])?;
        self.fetch_list(&format!("/repos/{owner}/{repo_name}/pulls"), &[])
            .await
    }

    pub async fn get_pull_request_reviews(
        &self,
        owner: &str,
        repo_name: &str,
        pull_number: u64,
    ) -> Result<Option<Vec<Review>>> {
        validation::require_all(&[("owner", Some(owner)), ("repo", Some(repo_name))])?;
        self.fetch_list(
            &format!("/repos/{owner}/{repo_name}/pulls/{pull_number}/reviews"),
            &[],
        )
        .await
    }

    /// Creates an issue and returns it as stored by GitHub.
    ///
    /// Statuses in [`CREATE_ISSUE_NO_RESULT_STATUSES`] yield `Ok(None)`.
    pub async fn add_issue_to_repository(&self, dto: &CreateIssueDto) -> Result<Option<Issue>> {
        validation::require_all(&[
            ("owner", Some(dto.owner.as_str())),
            ("repo", Some(dto.repo.as_str())),
            ("title", Some(dto.title.as_str())),
        ])?;

        let request = CreateIssueRequest {
            title: &dto.title,
            body: dto.body.as_deref(),
        };
        let response = self
            .post(&format!("/repos/{}/{}/issues", dto.owner, dto.repo), &request)
            .await?;

        if CREATE_ISSUE_NO_RESULT_STATUSES.contains(&response.status) {
            debug!(
                status = response.status,
                "Issue not created in {}/{}: {}",
                dto.owner,
                dto.repo,
                response.message()
            );
            return Ok(None);
        }
        if !response.is_success() {
            return Err(Error::Api {
                status: response.status,
                message: response.message(),
            });
        }

        let issue = response.parse::<Issue>()?;
        if let Some(issue) = &issue {
            info!("Created issue #{} in {}/{}", issue.number, dto.owner, dto.repo);
        }
        Ok(issue)
    }

    /// Re-creates issue `source.number` in the destination repository.
    ///
    /// Closed source issues are found too. A source issue that cannot be
    /// found is a hard stop: nothing is created
    /// and `Error::IssueNotFound` is returned.
    pub async fn clone_issue_to_repository(
        &self,
        source: &CloneIssueSourceDto,
        destination: &CloneIssueDestinationDto,
    ) -> Result<Option<Issue>> {
        validation::require_all(&[
            ("source owner", Some(source.owner.as_str())),
            ("source repo", Some(source.repo.as_str())),
            ("destination owner", Some(destination.owner.as_str())),
            ("destination repo", Some(destination.repo.as_str())),
        ])?;

        let issues = self
            .get_all_issues(&source.owner, &source.repo)
            .await?
            .unwrap_or_default();
        let Some(issue) = issues.iter().find(|issue| issue.number == source.number) else {
            error!(
                "Issue #{} not found in {}/{}",
                source.number, source.owner, source.repo
            );
            return Err(Error::IssueNotFound {
                owner: source.owner.clone(),
                repo: source.repo.clone(),
                number: source.number,
            });
        };

        let dto = CreateIssueDto::from_issue(issue, destination);
        self.add_issue_to_repository(&dto).await
    }
}
