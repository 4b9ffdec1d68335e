//! Create a single Jira issue from a config file and bring it into shape:
//! sprint, labels, assignee, status and custom fields.

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod providers;
pub mod provisioner;
pub mod resolve;
pub mod util;

pub use error::{ProvisionError, Result};
pub use provisioner::IssueProvisioner;
