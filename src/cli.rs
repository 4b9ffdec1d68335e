use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::config::{self, AppConfig, TOKEN_ENV_VAR};
use crate::providers::jira::JiraClient;
use crate::provisioner::IssueProvisioner;

/// Create a Jira issue from a config file, then assign it, move it to the
/// configured status and fill in its custom fields.
#[derive(Parser, Debug)]
#[command(name = "jira-provision", version)]
pub struct Cli {
    /// Config file (default: ./provision.toml, then ~/.jira-provision/config.toml).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Check config and credentials with read-only calls; create nothing.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

pub async fn run(cli: &Cli) -> Result<()> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    let config = AppConfig::load(&path)?;
    let credentials = config
        .jira
        .credentials(std::env::var(TOKEN_ENV_VAR).ok())?;

    let client = JiraClient::new(&credentials);
    info!(
        url = client.base_url(),
        project = %config.issue.project_key,
        "using Jira site"
    );
    let mut provisioner = IssueProvisioner::new(client);

    if cli.dry_run {
        let me = provisioner
            .check_connectivity(&config.issue)
            .await
            .context("Dry run failed")?;
        println!(
            "Authenticated as {} ({}); project {} is reachable. Nothing was created.",
            me.display_name, me.account_id, config.issue.project_key
        );
        return Ok(());
    }

    let issue = provisioner
        .provision(&config.issue)
        .await
        .with_context(|| {
            format!(
                "Failed to provision issue in {}; check Jira for steps already applied",
                config.issue.project_key
            )
        })?;

    println!("Created {}: {}", issue.key, config.issue.summary);
    println!("  {}/browse/{}", credentials.url, issue.key);
    Ok(())
}
