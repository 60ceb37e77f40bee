//! # fmdesk-client
//!
//! HTTP access to the facility backend's task API.
//!
//! - [`TaskApiClient`]: one method per route, with explicit [`Credentials`]
//! - [`ApiOutcome`]: reads that hit an undeployed endpoint (404) come back as
//!   [`ApiOutcome::NotDeployedFallback`] instead of an error
//! - Approve/reject on top of the core workflow rules, including the
//!   status-patch fallback when the reject endpoint is missing
//! - [`TaskService`]: snapshot reads that degrade instead of failing, writes
//!   that surface errors, and a refetch after every workflow action

mod client;
mod credentials;
mod error;
mod http;
mod outcome;
mod service;
mod workflow;

pub use client::{TaskApiClient, TaskApiClientBuilder};
pub use credentials::Credentials;
pub use error::{ApiError, ServiceError};
pub use outcome::ApiOutcome;
pub use service::{
    NOT_DEPLOYED_BANNER, ServiceOptions, SnapshotSource, TaskService, TaskSnapshot, WorkflowReport,
};
pub use workflow::{ApprovalOutcome, WorkflowPath};
