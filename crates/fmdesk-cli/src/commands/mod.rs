pub mod activity;
pub mod dashboard;
pub mod dispatch;
pub mod shared;
pub mod task;
