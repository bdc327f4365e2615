use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/orgquery.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Pre-issued bearer token; skips the login handshake when set.
    pub token: Option<String>,
    pub page_size: u32,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
    pub timeout_secs: u64,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/api/".to_string(),
            username: String::new(),
            password: String::new(),
            token: None,
            page_size: 25,
            max_attempts: 10,
            retry_delay_ms: 0,
            timeout_secs: 30,
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "orgquery", disable_version_flag = true)]
#[command(about = "Resolve group memberships against the directory API")]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct Overrides {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8080/api/).
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Override username (password is never read from CLI).
    #[arg(long, global = true)]
    username: Option<String>,
    /// Override records requested per page.
    #[arg(long, global = true)]
    page_size: Option<u32>,
    /// Override attempts per page while throttled.
    #[arg(long, global = true)]
    max_attempts: Option<u32>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    level: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the accounts registered under an employee id.
    Account {
        #[arg(long)]
        employee_id: String,
    },
    /// Active groups a member belongs to directly.
    DirectGroups {
        #[arg(long)]
        member: String,
    },
    /// Active groups a member belongs to, directly or through nested groups.
    AllGroups {
        #[arg(long)]
        member: String,
    },
    /// Accounts that ultimately belong to a group.
    Members {
        #[arg(long)]
        group: String,
    },
    /// Total salary in SEK of the active accounts of a group.
    Salary {
        #[arg(long)]
        group: String,
    },
    /// Managers of the accounts found in every given group and employed in
    /// the date range, ranked by managed count.
    Managers {
        #[arg(long = "group", required = true)]
        groups: Vec<String>,
        /// First employment day included (YYYY-MM-DD).
        #[arg(long)]
        from: NaiveDate,
        /// Last employment day included (YYYY-MM-DD).
        #[arg(long)]
        to: NaiveDate,
    },
    /// Serve a JSON dataset with the directory API protocol.
    Serve {
        #[arg(long)]
        dataset: PathBuf,
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
        /// Cap every page at this many records.
        #[arg(long)]
        page_limit: Option<usize>,
        /// Answer the first N collection requests with 429.
        #[arg(long, default_value_t = 0)]
        throttle: u32,
    },
}

pub fn load(args: &Overrides) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("ORGQUERY"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = &args.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(username) = &args.username {
        settings.username = username.clone();
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    if let Some(max_attempts) = args.max_attempts {
        settings.max_attempts = max_attempts;
    }
    if let Some(level) = &args.level {
        settings.level = level.clone();
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn managers_accepts_repeated_groups_and_dates() {
        let cli = Cli::try_parse_from([
            "orgquery",
            "managers",
            "--group",
            "grp_saljare",
            "--group",
            "grp_sverige",
            "--from",
            "2019-01-01",
            "--to",
            "2022-12-31",
        ])
        .unwrap();

        match cli.command {
            Command::Managers { groups, from, to } => {
                assert_eq!(groups, ["grp_saljare", "grp_sverige"]);
                assert_eq!(from, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
                assert_eq!(to, NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_overrides_win_over_defaults() {
        let cli = Cli::try_parse_from([
            "orgquery",
            "--config",
            "does/not/exist",
            "members",
            "--group",
            "grp_inhyrda",
            "--page-size",
            "50",
        ])
        .unwrap();

        let settings = load(&cli.overrides).unwrap();
        assert_eq!(settings.page_size, 50);
        assert_eq!(settings.max_attempts, 10);
        assert_eq!(settings.base_url, "http://127.0.0.1:8080/api/");
    }
}
