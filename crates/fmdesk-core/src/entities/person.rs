use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference to a user (assignee or assigner) as embedded in a task.
///
/// Either half may be missing in raw payloads; a reference with neither is
/// never constructed by the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PersonRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl PersonRef {
    /// Name if known, otherwise the id.
    #[must_use]
    pub fn display(&self) -> Option<&str> {
        self.name.as_deref().or(self.id.as_deref())
    }
}
