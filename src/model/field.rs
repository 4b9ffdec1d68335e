use serde::Deserialize;

/// An entry of the global field catalog (`GET /rest/api/3/field`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Field {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub custom: bool,
    /// Present on fields that belong to a single team-managed project.
    #[serde(default)]
    pub scope: Option<FieldScope>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldScope {
    #[serde(default)]
    pub project: Option<ScopeProject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScopeProject {
    pub id: String,
}

impl Field {
    /// Global fields are visible everywhere; scoped ones only in their project.
    pub fn visible_in(&self, project_id: &str) -> bool {
        match &self.scope {
            None => true,
            Some(scope) => scope
                .project
                .as_ref()
                .is_some_and(|project| project.id == project_id),
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Create-screen metadata for one field of one issue type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMeta {
    pub field_id: String,
    #[serde(default)]
    pub schema: Option<FieldSchema>,
    #[serde(default)]
    pub allowed_values: Option<Vec<AllowedValue>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldSchema {
    /// `array` for multi-value fields, `option`, `string`, `number` and so on
    /// otherwise.
    #[serde(rename = "type")]
    pub field_type: String,
}

impl FieldMeta {
    /// Multi-selects and checkboxes take a list of options, not a single one.
    pub fn takes_many(&self) -> bool {
        self.schema
            .as_ref()
            .is_some_and(|schema| schema.field_type == "array")
    }
}

/// One option of a select-style field. Options carry their label in `value`,
/// while priorities and similar system types use `name`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AllowedValue {
    pub id: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl AllowedValue {
    pub fn label(&self) -> Option<&str> {
        self.value.as_deref().or(self.name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueTypeMeta {
    pub id: String,
    pub name: String,
}
