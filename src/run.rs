use crate::cli::parser::{
    Cli, Command, GithubCommand, IssuesCommand, ReposArgs, TopicChangeArgs, TopicsCommand,
};
use crate::config::Settings;
use crate::error::Error;
use crate::github::GitHub;
use crate::github::models::{CloneIssueDestinationDto, CloneIssueSourceDto, CreateIssueDto};
use crate::github::repositories::{RepositoryFilter, name_prefix_filter};
use crate::github::topics::TopicChange;
use crate::output;
use crate::prompt::{AssumeYes, Confirm, StdinConfirm};
use crate::storage::TokenStorage;
use crate::validation;
use anyhow::Context;
use clap::Parser;
use std::io::Write;

/// Parses `args` and runs the command, asking for confirmation on stdin.
pub async fn run(
    args: Vec<String>,
    settings: Settings,
    stdout_additional: Option<&mut dyn Write>,
) -> anyhow::Result<()> {
    run_with_confirm(args, settings, &StdinConfirm, stdout_additional).await
}

/// Same as [`run`] with an injected confirmation prompt. `--yes` still wins.
pub async fn run_with_confirm(
    args: Vec<String>,
    settings: Settings,
    confirm: &dyn Confirm,
    mut stdout_additional: Option<&mut dyn Write>,
) -> anyhow::Result<()> {
    let cli = Cli::try_parse_from(args)?;
    let Command::Github(command) = cli.command;
    let out = &mut stdout_additional;

    let github = GitHub::from_settings(settings).context("Failed to create HTTP client")?;
    match command {
        GithubCommand::Auth { token } => {
            let token = validation::require("token", token.as_deref())?;
            github
                .tokens()
                .configure_token(token.trim())
                .context("Failed to save token")?;
            output::println(
                &format!(
                    "✓ Token saved to {}",
                    github.settings().config_path.display()
                ),
                out,
            )?;
        }
        GithubCommand::Repos(args) => list_repositories(&github, &args, out).await?,
        GithubCommand::Repo { owner, repo } => {
            let owner = validation::require("owner", owner.as_deref())?;
            let repo = validation::require("repo", repo.as_deref())?;
            match github.repository(owner, repo).await? {
                Some(repository) => {
                    output::println(&output::repository_line(&repository), out)?;
                    if let Some(url) = &repository.html_url {
                        output::println(url, out)?;
                    }
                    if let Some(topics) = &repository.topics {
                        output::println(&output::topics_line(topics), out)?;
                    }
                }
                None => output::println(&format!("Repository {owner}/{repo} not found"), out)?,
            }
        }
        GithubCommand::Topics(TopicsCommand::List { owner, repo }) => {
            let owner = validation::require("owner", owner.as_deref())?;
            let repo = validation::require("repo", repo.as_deref())?;
            if let Some(topics) = github.topics_for_repository(owner, repo).await? {
                output::println(&output::topics_line(&topics), out)?;
            }
        }
        GithubCommand::Topics(TopicsCommand::Add(args)) => {
            change_topic(&github, TopicChange::Add, &args, confirm, out).await?
        }
        GithubCommand::Topics(TopicsCommand::Remove(args)) => {
            change_topic(&github, TopicChange::Remove, &args, confirm, out).await?
        }
        GithubCommand::Issues(IssuesCommand::List { owner, repo }) => {
            let owner = validation::require("owner", owner.as_deref())?;
            let repo = validation::require("repo", repo.as_deref())?;
            for issue in github.get_issues(owner, repo).await?.unwrap_or_default() {
                output::println(&output::issue_line(&issue), out)?;
            }
        }
        GithubCommand::Issues(IssuesCommand::Create {
            owner,
            repo,
            title,
            body,
        }) => {
            let dto = CreateIssueDto {
                owner: owner.unwrap_or_default(),
                repo: repo.unwrap_or_default(),
                title: title.unwrap_or_default(),
                body,
            };
            match github.add_issue_to_repository(&dto).await? {
                Some(issue) => output::println(
                    &format!("✓ Created {}", output::issue_line(&issue)),
                    out,
                )?,
                None => anyhow::bail!("Issue was not created in {}/{}", dto.owner, dto.repo),
            }
        }
        GithubCommand::Issues(IssuesCommand::Clone {
            owner,
            repo,
            number,
            dest_owner,
            dest_repo,
        }) => {
            let source = CloneIssueSourceDto {
                owner: owner.unwrap_or_default(),
                repo: repo.unwrap_or_default(),
                number: validation::require_number("number", number)?,
            };
            let destination = CloneIssueDestinationDto {
                owner: dest_owner.unwrap_or_default(),
                repo: dest_repo.unwrap_or_default(),
            };
            match github
                .clone_issue_to_repository(&source, &destination)
                .await?
            {
                Some(issue) => output::println(
                    &format!(
                        "✓ Cloned issue #{} to {}/{} as {}",
                        source.number,
                        destination.owner,
                        destination.repo,
                        output::issue_line(&issue)
                    ),
                    out,
                )?,
                None => anyhow::bail!(
                    "Issue #{} was not cloned to {}/{}",
                    source.number,
                    destination.owner,
                    destination.repo
                ),
            }
        }
        GithubCommand::Pulls { owner, repo } => {
            let owner = validation::require("owner", owner.as_deref())?;
            let repo = validation::require("repo", repo.as_deref())?;
            for pull in github.get_pull_requests(owner, repo).await?.unwrap_or_default() {
                output::println(&output::pull_request_line(&pull), out)?;
            }
        }
        GithubCommand::Reviews {
            owner,
            repo,
            number,
        } => {
            let owner = validation::require("owner", owner.as_deref())?;
            let repo = validation::require("repo", repo.as_deref())?;
            let number = validation::require_number("number", number)?;
            for review in github
                .get_pull_request_reviews(owner, repo, number)
                .await?
                .unwrap_or_default()
            {
                output::println(&output::review_line(&review), out)?;
            }
        }
    }
    Ok(())
}

async fn list_repositories(
    github: &GitHub,
    args: &ReposArgs,
    out: &mut Option<&mut dyn Write>,
) -> anyhow::Result<()> {
    let filter = args.filter.as_deref().map(name_prefix_filter);
    let filter: Option<RepositoryFilter<'_>> = filter.as_ref().map(|f| f as RepositoryFilter<'_>);

    let repositories = match (args.user.as_deref(), args.andculture) {
        (Some(user), true) => github.repositories_by_andculture(Some(user)).await?,
        (Some(user), false) => github.repositories(Some(user), filter).await?,
        (None, _) => {
            github
                .repositories_by_organization(args.org.as_deref(), filter)
                .await?
        }
    };

    for repository in repositories.unwrap_or_default() {
        output::println(&output::repository_line(&repository), out)?;
    }
    Ok(())
}

async fn change_topic(
    github: &GitHub,
    change: TopicChange,
    args: &TopicChangeArgs,
    confirm: &dyn Confirm,
    out: &mut Option<&mut dyn Write>,
) -> anyhow::Result<()> {
    let topic = validation::require("topic", args.topic.as_deref())?;

    if args.all {
        let confirm: &dyn Confirm = if args.yes { &AssumeYes } else { confirm };
        let report = match change {
            TopicChange::Add => github.add_topic_to_all_repositories(topic, confirm).await,
            TopicChange::Remove => {
                github
                    .remove_topic_from_all_repositories(topic, confirm)
                    .await
            }
        };
        let report = match report {
            Err(Error::Aborted) => {
                output::println(&Error::Aborted.to_string(), out)?;
                return Ok(());
            }
            other => other?,
        };
        for line in output::report_lines(&report) {
            output::println(&line, out)?;
        }
        if !report.is_success() {
            anyhow::bail!(
                "Topic '{topic}' could not be changed on {} repositories",
                report.failed().count()
            );
        }
        return Ok(());
    }

    let owner = validation::require("owner", args.owner.as_deref())?;
    let repo = validation::require("repo", args.repo.as_deref())?;
    let topics = match change {
        TopicChange::Add => github.add_topic_to_repository(topic, owner, repo).await?,
        TopicChange::Remove => {
            github
                .remove_topic_from_repository(topic, owner, repo)
                .await?
        }
    };
    if let Some(topics) = topics {
        output::println(
            &format!("✓ {owner}/{repo}: {}", output::topics_line(&topics)),
            out,
        )?;
    }
    Ok(())
}
