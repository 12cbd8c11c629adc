use clap::{Args, Parser, Subcommand};

/// and-cli command line
#[derive(Parser, Debug, PartialEq)]
#[command(name = "and-cli", version, about = "andculture developer tooling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Work with GitHub repositories, topics, issues and pull requests
    #[command(subcommand)]
    Github(GithubCommand),
}

// Positionals are optional here so that missing values are reported by
// `validation::require` with the same message the library uses.
#[derive(Subcommand, Debug, PartialEq)]
pub enum GithubCommand {
    /// Save a GitHub API token to the config file
    Auth { token: Option<String> },

    /// List repositories of an organization or user
    Repos(ReposArgs),

    /// Show a single repository
    Repo {
        owner: Option<String>,
        repo: Option<String>,
    },

    /// Manage repository topics
    #[command(subcommand)]
    Topics(TopicsCommand),

    /// List, create and clone issues
    #[command(subcommand)]
    Issues(IssuesCommand),

    /// List pull requests of a repository
    Pulls {
        owner: Option<String>,
        repo: Option<String>,
    },

    /// List reviews of a pull request
    Reviews {
        owner: Option<String>,
        repo: Option<String>,
        number: Option<u64>,
    },
}

#[derive(Args, Debug, PartialEq, Default)]
pub struct ReposArgs {
    /// Organization to list, defaults to the configured organization
    #[arg(long, conflicts_with = "user")]
    pub org: Option<String>,

    /// User whose repositories are listed
    #[arg(long)]
    pub user: Option<String>,

    /// With --user, only list the user's forks of the default organization
    #[arg(long, requires = "user")]
    pub andculture: bool,

    /// Only list repositories whose name starts with this text
    #[arg(long, conflicts_with = "andculture")]
    pub filter: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum TopicsCommand {
    /// List the topics of a repository
    List {
        owner: Option<String>,
        repo: Option<String>,
    },
    /// Add a topic to one repository, or to every repository with --all
    Add(TopicChangeArgs),
    /// Remove a topic from one repository, or from every repository with --all
    Remove(TopicChangeArgs),
}

#[derive(Args, Debug, PartialEq, Default)]
pub struct TopicChangeArgs {
    pub topic: Option<String>,

    #[arg(conflicts_with = "all")]
    pub owner: Option<String>,

    #[arg(conflicts_with = "all")]
    pub repo: Option<String>,

    /// Apply to every repository of the default organization
    #[arg(long)]
    pub all: bool,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y', requires = "all")]
    pub yes: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum IssuesCommand {
    /// List the issues of a repository
    List {
        owner: Option<String>,
        repo: Option<String>,
    },
    /// Open a new issue
    Create {
        owner: Option<String>,
        repo: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },
    /// Copy an issue into another repository
    Clone {
        owner: Option<String>,
        repo: Option<String>,
        number: Option<u64>,
        dest_owner: Option<String>,
        dest_repo: Option<String>,
    },
}
