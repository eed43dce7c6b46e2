use std::{process, time::Instant};

use anyhow::Result;
use clap::Parser;
use jiragoli_config::JiragoliConfig;
use jiragoli_domain::ProjectRef;
use jiragoli_jira::{default_http_client, JiraClient};
use log::{error, info};

mod cli_args;
mod filter;
mod render;
mod telemetry;
mod utils;

use cli_args::{Cli, CliCommand, IssuesArgs};
use filter::IssueFilter;

fn main() {
    let cli = Cli::parse();
    telemetry::init_logging();

    let client = match connect() {
        Ok(client) => client,
        Err(error) => {
            error!("{error:#}");
            process::exit(1);
        }
    };

    match cli.command {
        CliCommand::Issues(args) => {
            run_issues(&client, &args);
        }
        CliCommand::Projects => run_projects(&client),
    }
}

fn connect() -> Result<JiraClient> {
    let config = JiragoliConfig::load_default()?;
    let http = default_http_client()?;

    let started = Instant::now();
    let result = JiraClient::from_config(&config, http);
    match &result {
        Ok(_) => telemetry::emit_success("connect", None, started.elapsed()),
        Err(error) => {
            telemetry::emit_failure("connect", None, started.elapsed(), &error.to_string())
        }
    }
    result
}

/// Logs the matching issues and returns how many were shown, or `None` when
/// the query could not run.
fn run_issues(client: &JiraClient, args: &IssuesArgs) -> Option<usize> {
    let project = args.project.trim();
    if project.is_empty() {
        error!("value of --project cannot be empty");
        return None;
    }

    let project = ProjectRef::parse(project);
    let label = project.to_string();
    let started = Instant::now();
    let issues = match client.issues(&project) {
        Ok(issues) => {
            telemetry::emit_success("issues", Some(&label), started.elapsed());
            issues
        }
        Err(error) => {
            telemetry::emit_failure("issues", Some(&label), started.elapsed(), &error.to_string());
            error!("error: {error}");
            return None;
        }
    };

    let matching = IssueFilter::from_args(args).apply(&issues);
    for issue in &matching {
        for line in render::issue_lines(issue) {
            info!("{line}");
        }
    }
    info!("{}", render::total_line(matching.len()));

    Some(matching.len())
}

fn run_projects(client: &JiraClient) {
    for project in client.projects() {
        info!("{}", render::project_line(project));
    }
}
