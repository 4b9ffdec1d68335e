pub mod jira;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::model::agile::{Board, Sprint};
use crate::model::field::{Field, FieldMeta};
use crate::model::issue::{Issue, Project, User};

/// Field name to JSON value, as sent in the `fields` object of issue payloads.
pub type FieldMap = Map<String, Value>;

/// The slice of the remote tracker's API the provisioner needs.
#[async_trait]
pub trait Tracker: Send + Sync {
    async fn boards_for_project(&self, project_key: &str) -> Result<Vec<Board>>;

    /// Active sprints of `board`, or `None` when the board does not support
    /// sprints at all.
    async fn active_sprints(&self, board: &Board) -> Result<Option<Vec<Sprint>>>;

    async fn create_issue(&self, fields: FieldMap) -> Result<Issue>;

    async fn issue_labels(&self, issue_id: &str) -> Result<Vec<String>>;

    /// Overwrite the given fields of an issue. List fields such as `labels`
    /// are replaced wholesale.
    async fn update_fields(&self, issue_key: &str, fields: FieldMap) -> Result<()>;

    async fn assignable_users(&self, project_key: &str, limit: usize) -> Result<Vec<User>>;

    async fn assign_issue(&self, issue_key: &str, account_id: &str) -> Result<()>;

    /// Move an issue to the named status through whichever transition leads
    /// there.
    async fn transition_issue(&self, issue_key: &str, status: &str) -> Result<()>;

    /// The global field catalog, including project-scoped custom fields.
    async fn fields(&self) -> Result<Vec<Field>>;

    async fn project(&self, project_key: &str) -> Result<Project>;

    /// Create-screen field metadata for one issue type of a project.
    async fn create_metadata(&self, project_key: &str, issue_type: &str) -> Result<Vec<FieldMeta>>;

    /// The authenticated user.
    async fn myself(&self) -> Result<User>;
}
