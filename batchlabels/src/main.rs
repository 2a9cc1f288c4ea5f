mod args;
mod batch;
mod error;
mod grouping;
mod hacktoberfest;
mod model;

use crate::args::{Args, Command};
use crate::batch::{add_labels, remove_labels, BatchOptions, BatchSummary};
use crate::error::{BatchError, UsageError};
use crate::grouping::build_repo_list;
use crate::hacktoberfest::add_hacktoberfest_issues;
use crate::model::Repo;
use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use github_lib::GitHubClient;
use log::warn;
use std::process::ExitCode;

const LOG_ENV: &str = "BATCHLABELS_LOG";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::new().filter_or(LOG_ENV, "warn")).init();

    let args = Args::parse();

    match run(&args).await {
        Ok(summary) => {
            let done = match args.command {
                Command::Add => "Labels successfully added",
                Command::Remove => "Labels successfully removed",
            };
            println!("{} ({} issues)", done.green(), summary.issues);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(args: &Args) -> Result<BatchSummary, BatchError> {
    let repos = build_batch(args)?;
    let options = BatchOptions {
        only_issues: args.only_issues,
        only_pull_requests: args.only_pull_requests,
        hacktoberfest: args.hacktoberfest,
    };

    let github = GitHubClient::new(
        args.api_url.as_str(),
        args.auth_token.as_deref().filter(|token| !token.is_empty()),
    )
        .map_err(|e| UsageError::InvalidApiUrl(e.to_string()))?;

    let result = match args.command {
        Command::Add => {
            println!("Adding labels...");
            add_labels(&github, &repos, &options)
                .await
                .context("Failed to add labels")
        }
        Command::Remove => {
            println!("Removing labels...");
            remove_labels(&github, &repos, &options)
                .await
                .context("Failed to remove labels")
        }
    };
    result.map_err(BatchError::Remote)
}

fn build_batch(args: &Args) -> Result<Vec<Repo>, UsageError> {
    let mut repos = build_repo_list(args.targets.as_slice())?;
    if args.hacktoberfest {
        add_hacktoberfest_issues(&mut repos);
    }

    if repos.iter().all(|repo| repo.issues.is_empty()) {
        return Err(UsageError::NoLabels);
    }

    for repo in repos.iter().filter(|repo| repo.issues.is_empty()) {
        warn!("no labels given for {repo}, skipping it");
    }

    Ok(repos)
}
