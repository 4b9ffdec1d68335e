use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::IssueConfig;
use crate::error::{ProvisionError, Result};
use crate::model::agile::SprintState;
use crate::model::field::{Field, FieldMeta};
use crate::model::issue::{Issue, Project, User};
use crate::providers::{FieldMap, Tracker};
use crate::resolve::exactly_one;
use crate::util::adf::text_to_adf;

/// Page size for the assignable-user lookup. A full page means the listing
/// was cut off.
pub const USER_PAGE_LIMIT: usize = 1000;

const SPRINT_FIELD: &str = "Sprint";

/// Creates one issue and walks it through the post-create steps.
///
/// Remote metadata is fetched on first use and kept for the lifetime of the
/// provisioner, which covers a single run against a single project.
pub struct IssueProvisioner<T> {
    tracker: T,
    project: Option<Project>,
    custom_fields: Option<Vec<Field>>,
    sprint_field_id: Option<String>,
    /// Outer `None`: not looked up yet. Inner `None`: the board has no sprints.
    active_sprint: Option<Option<u64>>,
}

impl<T: Tracker> IssueProvisioner<T> {
    pub fn new(tracker: T) -> Self {
        Self {
            tracker,
            project: None,
            custom_fields: None,
            sprint_field_id: None,
            active_sprint: None,
        }
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Create the issue and run every post-create step on it.
    pub async fn provision(&mut self, config: &IssueConfig) -> Result<Issue> {
        let issue = self.create_issue(config).await?;
        self.postprocess(&issue, config).await?;
        Ok(issue)
    }

    /// Read-only round trip used to validate credentials and the project key.
    pub async fn check_connectivity(&mut self, config: &IssueConfig) -> Result<User> {
        let me = self.tracker.myself().await?;
        let project = self.project(&config.project_key).await?;
        info!(
            user = %me.display_name,
            project = %project.key,
            "Jira connection verified"
        );
        Ok(me)
    }

    pub async fn create_issue(&mut self, config: &IssueConfig) -> Result<Issue> {
        let mut fields = FieldMap::new();
        fields.insert("summary".into(), json!(config.summary));
        fields.insert("project".into(), json!({ "key": config.project_key }));
        fields.insert("issuetype".into(), json!({ "name": config.issuetype }));
        if let Some(doc) = config.description.as_deref().and_then(text_to_adf) {
            fields.insert("description".into(), doc);
        }

        if let Some(sprint_id) = self.active_sprint(&config.project_key).await? {
            let field_id = self.sprint_field_id(&config.project_key).await?;
            fields.insert(field_id, json!(sprint_id));
        }

        let issue = self.tracker.create_issue(fields).await?;
        info!(issue = %issue.key, "created issue");
        Ok(issue)
    }

    /// Post-create steps in order. The first failure stops the pipeline and
    /// leaves earlier steps applied.
    pub async fn postprocess(&mut self, issue: &Issue, config: &IssueConfig) -> Result<()> {
        self.remove_labels(issue, &config.remove_labels).await?;
        self.resolve_and_assign(issue, config).await?;
        self.transition_status(issue, &config.status).await?;
        self.set_custom_fields(issue, config).await?;
        Ok(())
    }

    pub async fn remove_labels(&self, issue: &Issue, disposable: &[String]) -> Result<Vec<String>> {
        let labels = self.tracker.issue_labels(&issue.id).await?;
        let kept = without_labels(labels, disposable);

        let mut fields = FieldMap::new();
        fields.insert("labels".into(), json!(kept));
        self.tracker.update_fields(&issue.key, fields).await?;
        debug!(issue = %issue.key, labels = ?kept, "labels replaced");
        Ok(kept)
    }

    pub async fn resolve_and_assign(&self, issue: &Issue, config: &IssueConfig) -> Result<User> {
        let user = self.resolve_assignee(&config.project_key, &config.assignee).await?;
        self.tracker.assign_issue(&issue.key, &user.account_id).await?;
        info!(issue = %issue.key, assignee = %user.display_name, "assigned issue");
        Ok(user)
    }

    pub async fn resolve_assignee(&self, project_key: &str, fragment: &str) -> Result<User> {
        let users = self
            .tracker
            .assignable_users(project_key, USER_PAGE_LIMIT)
            .await?;
        if users.len() >= USER_PAGE_LIMIT {
            return Err(ProvisionError::Truncated {
                what: "assignable user",
                limit: USER_PAGE_LIMIT,
            });
        }

        exactly_one(
            users,
            "assignable user",
            format!("display name containing {fragment:?}"),
            |u| u.display_name.contains(fragment),
        )
    }

    /// Whether the transition is legal from the current status is for Jira to
    /// decide.
    pub async fn transition_status(&self, issue: &Issue, status: &str) -> Result<()> {
        self.tracker.transition_issue(&issue.key, status).await?;
        info!(issue = %issue.key, status, "transitioned issue");
        Ok(())
    }

    pub async fn set_custom_fields(&mut self, issue: &Issue, config: &IssueConfig) -> Result<()> {
        if config.fields.is_empty() {
            return Ok(());
        }

        let mut resolved = Vec::with_capacity(config.fields.len());
        for (name, value) in &config.fields {
            let field_id = self.custom_field_id(&config.project_key, name).await?;
            resolved.push((field_id, value));
        }

        let meta = self
            .tracker
            .create_metadata(&config.project_key, &config.issuetype)
            .await?;

        let mut fields = FieldMap::new();
        for (field_id, value) in resolved {
            let value = coerce_field_value(&meta, &field_id, value)?;
            fields.insert(field_id, value);
        }

        self.tracker.update_fields(&issue.key, fields).await?;
        info!(issue = %issue.key, count = config.fields.len(), "set custom fields");
        Ok(())
    }

    /// `Some(true)` once a sprint-enabled board has been seen, `None` before
    /// the board was looked up.
    pub fn supports_sprints(&self) -> Option<bool> {
        self.active_sprint.map(|sprint| sprint.is_some())
    }

    async fn project(&mut self, project_key: &str) -> Result<Project> {
        if let Some(project) = &self.project {
            return Ok(project.clone());
        }
        let project = self.tracker.project(project_key).await?;
        debug!(project = %project.key, id = %project.id, "fetched project");
        self.project = Some(project.clone());
        Ok(project)
    }

    async fn custom_fields(&mut self, project_key: &str) -> Result<&[Field]> {
        if self.custom_fields.is_none() {
            let project = self.project(project_key).await?;
            let fields: Vec<Field> = self
                .tracker
                .fields()
                .await?
                .into_iter()
                .filter(|f| f.custom && f.visible_in(&project.id))
                .collect();
            debug!(count = fields.len(), "fetched custom field catalog");
            self.custom_fields = Some(fields);
        }
        Ok(self.custom_fields.as_deref().unwrap_or_default())
    }

    async fn custom_field_id(&mut self, project_key: &str, name: &str) -> Result<String> {
        let fields = self.custom_fields(project_key).await?;
        let field = exactly_one(
            fields,
            "custom field",
            format!("name {name:?} in project {project_key}"),
            |f| f.is_named(name),
        )?;
        Ok(field.id.clone())
    }

    async fn sprint_field_id(&mut self, project_key: &str) -> Result<String> {
        if let Some(id) = &self.sprint_field_id {
            return Ok(id.clone());
        }
        let id = self.custom_field_id(project_key, SPRINT_FIELD).await?;
        self.sprint_field_id = Some(id.clone());
        Ok(id)
    }

    async fn active_sprint(&mut self, project_key: &str) -> Result<Option<u64>> {
        if let Some(cached) = self.active_sprint {
            return Ok(cached);
        }

        let boards = self.tracker.boards_for_project(project_key).await?;
        let board = exactly_one(boards, "board", format!("project {project_key}"), |_| true)?;

        let sprint_id = match self.tracker.active_sprints(&board).await? {
            None => {
                info!(board = board.id, "board has no sprints, leaving sprint unset");
                None
            }
            Some(sprints) => {
                let sprint = exactly_one(
                    sprints,
                    "active sprint",
                    format!("board {}", board.id),
                    |s| s.state == SprintState::Active,
                )?;
                debug!(sprint = sprint.id, name = %sprint.name, "found active sprint");
                Some(sprint.id)
            }
        };

        self.active_sprint = Some(sprint_id);
        Ok(sprint_id)
    }
}

/// `labels` minus everything in `disposable`, order preserved.
pub fn without_labels(labels: Vec<String>, disposable: &[String]) -> Vec<String> {
    labels
        .into_iter()
        .filter(|label| !disposable.contains(label))
        .collect()
}

/// Map a configured value onto what Jira expects for `field_id`.
///
/// Fields whose create metadata lists allowed values take an option reference,
/// found by exact label match, wrapped in a list for multi-value fields.
/// Everything else gets the value as configured.
pub fn coerce_field_value(meta: &[FieldMeta], field_id: &str, value: &Value) -> Result<Value> {
    let Some(field) = meta.iter().find(|m| m.field_id == field_id) else {
        return Ok(value.clone());
    };
    let allowed = field
        .allowed_values
        .as_deref()
        .filter(|values| !values.is_empty());

    let Some(allowed) = allowed else {
        return Ok(value.clone());
    };

    let wanted = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let option = exactly_one(
        allowed,
        "option",
        format!("{wanted:?} for field {field_id}"),
        |o| o.label() == Some(wanted.as_str()),
    )?;

    let reference = json!({ "id": option.id });
    if field.takes_many() {
        Ok(json!([reference]))
    } else {
        Ok(reference)
    }
}
