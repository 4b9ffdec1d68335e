use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Board {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// `scrum`, `kanban` or `simple`.
    #[serde(rename = "type", default)]
    pub board_type: String,
}

impl Board {
    /// Kanban boards never carry sprints, so there is nothing to ask for.
    pub fn lacks_sprints(&self) -> bool {
        self.board_type.eq_ignore_ascii_case("kanban")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintState {
    Active,
    Closed,
    Future,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Sprint {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub state: SprintState,
}
