use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "jiragoli", version, about = "Munch them sweet issues")]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Display JIRA issues of a project
    Issues(IssuesArgs),
    /// List the projects visible to the configured user
    Projects,
}

#[derive(Debug, Args)]
pub struct IssuesArgs {
    /// Project name prefix or numeric project id
    #[arg(short, long)]
    pub project: String,

    /// Only issues whose assignee name contains this text
    #[arg(long)]
    pub assignee: Option<String>,

    /// Only issues whose reporter name contains this text
    #[arg(long)]
    pub reporter: Option<String>,

    /// Only issues whose status contains this text
    #[arg(long)]
    pub status: Option<String>,
}
