use crate::error::{Error, Result};
use crate::github::client::GitHub;
use crate::github::models::Repository;
use crate::validation;
use async_trait::async_trait;
use tracing::{debug, info};

pub use crate::github::client::PER_PAGE;

/// Client-side transform applied to a complete repository listing.
pub type RepositoryFilter<'a> = &'a (dyn Fn(Vec<Repository>) -> Vec<Repository> + Send + Sync);

/// Source of an organization's repositories, used by bulk topic operations.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    fn default_organization(&self) -> &str;

    /// `None` organization means the default organization.
    async fn organization_repositories(
        &self,
        org: Option<&str>,
    ) -> Result<Option<Vec<Repository>>>;
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Keeps repositories whose name starts with `prefix`, ignoring case.
pub fn name_prefix_filter(prefix: &str) -> impl Fn(Vec<Repository>) -> Vec<Repository> + Send + Sync {
    let prefix = prefix.to_lowercase();
    move |repositories| {
        repositories
            .into_iter()
            .filter(|repo| repo.name.to_lowercase().starts_with(&prefix))
            .collect()
    }
}

impl GitHub {
    async fn list_with_filter(
        &self,
        path: &str,
        filter: Option<RepositoryFilter<'_>>,
    ) -> Result<Vec<Repository>> {
        let repositories = self.get_all_pages(path, &[]).await?;
        Ok(match filter {
            Some(filter) => filter(repositories),
            None => repositories,
        })
    }

    /// Lists the repositories of a user. No owner means nothing to list.
    pub async fn repositories(
        &self,
        owner: Option<&str>,
        filter: Option<RepositoryFilter<'_>>,
    ) -> Result<Option<Vec<Repository>>> {
        let owner = match owner {
            Some(owner) if !owner.trim().is_empty() => owner,
            _ => {
                debug!("No owner given, nothing to list");
                return Ok(None);
            }
        };
        let repositories = self
            .list_with_filter(&format!("/users/{owner}/repos"), filter)
            .await?;
        info!(owner, count = repositories.len(), "Listed repositories");
        Ok(Some(repositories))
    }

    /// Lists the repositories of an organization, the default one when `org` is absent.
    pub async fn repositories_by_organization(
        &self,
        org: Option<&str>,
        filter: Option<RepositoryFilter<'_>>,
    ) -> Result<Option<Vec<Repository>>> {
        let org = match org {
            Some(org) if !org.trim().is_empty() => org,
            _ => self.settings().default_organization.as_str(),
        };
        let repositories = self
            .list_with_filter(&format!("/orgs/{org}/repos"), filter)
            .await?;
        info!(org, count = repositories.len(), "Listed organization repositories");
        Ok(Some(repositories))
    }

    /// Default organization's repositories, or a user's forks of them.
    ///
    /// With a username, lists that user's repositories whose name is prefixed
    /// by the default organization name.
    pub async fn repositories_by_andculture(
        &self,
        username: Option<&str>,
    ) -> Result<Option<Vec<Repository>>> {
        if is_blank(username) {
            return self.repositories_by_organization(None, None).await;
        }
        let filter = name_prefix_filter(&self.settings().default_organization);
        self.repositories(username, Some(&filter)).await
    }

    /// Fetches a single repository. `Ok(None)` when it does not exist.
    pub async fn repository(&self, owner: &str, repo_name: &str) -> Result<Option<Repository>> {
        validation::require_all(&[("owner", Some(owner)), ("repo", Some(repo_name))])?;

        let response = self.get(&format!("/repos/{owner}/{repo_name}"), &[]).await?;
        match response.status {
            404 => Ok(None),
            _ if response.is_success() => response.parse(),
            status => Err(Error::Api {
                status,
                message: response.message(),
            }),
        }
    }
}

#[async_trait]
impl RepositorySource for GitHub {
    fn default_organization(&self) -> &str {
        &self.settings().default_organization
    }

    async fn organization_repositories(
        &self,
        org: Option<&str>,
    ) -> Result<Option<Vec<Repository>>> {
        self.repositories_by_organization(org, None).await
    }
}
