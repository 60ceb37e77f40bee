//! Entity structs for fmdesk domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! output and schema validation. They hold canonical values only; raw API
//! shapes are handled by [`crate::normalize`].

mod person;
mod task;

pub use person::PersonRef;
pub use task::{Schedule, Task};
