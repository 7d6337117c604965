//! Command-line interface of closeout, based on clap.
//!
//! A single-action tool: pick the release (by week/year or a raw JQL
//! override), then close its tickets. `--dry-run` reports without
//! touching the tracker.

use std::path::PathBuf;

use clap::Parser;

/// Close the tracker tickets attached to a weekly release.
#[derive(Debug, Parser)]
#[command(name = "closeout", version, about)]
pub struct Cli {
    /// Week number of the release (1-53).
    #[arg(long, short, required_unless_present = "jql", conflicts_with = "jql")]
    pub week: Option<u32>,

    /// Year of the release (4 digits), defaults to the current one.
    #[arg(long, short, conflicts_with = "jql")]
    pub year: Option<i32>,

    /// Raw JQL filter, bypassing the week/year release version.
    #[arg(long)]
    pub jql: Option<String>,

    /// Evaluate and report only; no transitions, no prompts, no rule writes.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Override the learned-rules file from the config.
    #[arg(long)]
    pub rules_file: Option<PathBuf>,

    /// Path to the configuration file.
    #[arg(long, default_value = "closeout.toml")]
    pub config: PathBuf,

    /// Enable verbose output.
    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_week_and_year() {
        let cli = Cli::parse_from(["closeout", "--week", "42", "--year", "2019"]);
        assert_eq!(cli.week, Some(42));
        assert_eq!(cli.year, Some(2019));
        assert!(!cli.dry_run);
        assert!(cli.jql.is_none());
    }

    #[test]
    fn cli_parses_jql_override() {
        let cli = Cli::parse_from(["closeout", "--jql", r#"fixVersion = "Operator 4.19.42""#]);
        assert_eq!(
            cli.jql.as_deref(),
            Some(r#"fixVersion = "Operator 4.19.42""#)
        );
        assert!(cli.week.is_none());
    }

    #[test]
    fn cli_requires_week_or_jql() {
        assert!(Cli::try_parse_from(["closeout"]).is_err());
        assert!(Cli::try_parse_from(["closeout", "--week", "1"]).is_ok());
    }

    #[test]
    fn cli_rejects_week_together_with_jql() {
        assert!(Cli::try_parse_from(["closeout", "--week", "1", "--jql", "x = 1"]).is_err());
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from([
            "closeout",
            "--week",
            "7",
            "--dry-run",
            "--verbose",
            "--rules-file",
            "/tmp/rules.json",
        ]);
        assert!(cli.dry_run);
        assert!(cli.verbose);
        assert_eq!(cli.rules_file.unwrap(), PathBuf::from("/tmp/rules.json"));
        assert_eq!(cli.config, PathBuf::from("closeout.toml"));
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
