//! # fmdesk-core
//!
//! Core task model for the fmdesk facility back-office.
//!
//! Everything in this crate is synchronous and free of I/O, so the same
//! derivations can back the staff, supervisor, manager, and board views:
//! - Canonical status enum, alias table, and per-role display labels
//! - Entity structs and request payloads (drafts, partial updates, filters)
//! - Normalization of raw API records into canonical [`entities::Task`]s
//! - Overdue derivation and elapsed-time progress
//! - Approve/reject and explicit status transition rules
//! - Dashboard aggregates and per-assignee performance
//! - Recent-activity feed
//! - Cross-cutting error type

pub mod activity;
pub mod aggregates;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod normalize;
pub mod overdue;
pub mod parse;
pub mod requests;
pub mod views;
pub mod workflow;

#[cfg(test)]
mod test_support;
