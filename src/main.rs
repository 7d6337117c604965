mod cli;
mod config;
mod error;
mod prompt;
mod release;
mod rules;
mod runner;
mod tracker;
mod triage;
mod ui;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use cli::Cli;
use config::Config;
use error::CloseoutError;
use prompt::ConsolePrompter;
use release::ReleaseVersion;
use rules::RuleStore;
use tracker::TrackerClient;
use ui::Reporter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    config.validate()?;

    let jql = match &cli.jql {
        Some(jql) => jql.clone(),
        None => {
            // clap guarantees --week when --jql is absent.
            let week = cli.week.ok_or_else(|| anyhow!("--week is required"))?;
            let version =
                ReleaseVersion::new(&config.release_prefix, config.major_version, week, cli.year)?;
            println!("Closing tickets for release '{version}'");
            version.jql()
        }
    };

    let rules_path = cli
        .rules_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.rules_file));

    let reporter = Reporter::new(cli.verbose);
    let (mut store, corrupt) = RuleStore::load(&rules_path);
    if corrupt {
        reporter.warn(&format!(
            "rules file {} is unreadable, starting with an empty one",
            rules_path.display()
        ));
    }

    let gateway = TrackerClient::new(config.tracker_url.clone(), config.username, config.token);
    let mut prompter = ConsolePrompter::new();

    let result = runner::run(&gateway, &mut prompter, &mut store, &jql, cli.dry_run).await;

    // The store is flushed whatever the batch did, so answers given before
    // a failure are not lost. A dry run leaves the file alone.
    if !cli.dry_run {
        store.save(&rules_path)?;
    }

    let reports = result.map_err(CloseoutError::Tracker)?;
    reporter.print_reports(&reports);
    reporter.print_summary(&reports);

    Ok(())
}
