use crate::github::models::{Issue, PullRequest, Repository, Review};
use crate::github::topics::{BulkTopicReport, RepositoryOutcome};
use std::io::{self, Write};

/// Prints to stdout and mirrors the line into `writer` when one is given.
pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    if let Err(e) = writeln!(io::stdout(), "{message}") {
        eprintln!("Failed to write to stdout: {e}");
    }

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}

pub fn repository_line(repository: &Repository) -> String {
    let name = match &repository.full_name {
        Some(full_name) => full_name.clone(),
        None => format!("{}/{}", repository.owner.login, repository.name),
    };
    match &repository.description {
        Some(description) if !description.is_empty() => format!("{name}\t{description}"),
        _ => name,
    }
}

pub fn topics_line(topics: &[String]) -> String {
    if topics.is_empty() {
        "(no topics)".to_string()
    } else {
        topics.join(", ")
    }
}

pub fn issue_line(issue: &Issue) -> String {
    format!("#{} {} (@{})", issue.number, issue.title, issue.user.login)
}

pub fn pull_request_line(pull: &PullRequest) -> String {
    format!("#{} {} (@{})", pull.number, pull.title, pull.user.login)
}

pub fn review_line(review: &Review) -> String {
    format!("{} by @{}", review.state, review.user.login)
}

fn outcome_line(outcome: &RepositoryOutcome) -> String {
    match &outcome.result {
        Ok(_) => format!("✓ {}/{}", outcome.owner, outcome.repository),
        Err(message) => format!("✗ {}/{}: {message}", outcome.owner, outcome.repository),
    }
}

/// One line per repository followed by a summary line.
pub fn report_lines(report: &BulkTopicReport) -> Vec<String> {
    let mut lines: Vec<String> = report.outcomes.iter().map(outcome_line).collect();
    lines.push(format!(
        "{} succeeded, {} failed",
        report.succeeded().count(),
        report.failed().count()
    ));
    lines
}
