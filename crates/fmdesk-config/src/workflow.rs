//! Approval workflow policy.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Refuse to reject a task without a comment.
    #[serde(default)]
    pub require_reject_comment: bool,
}
