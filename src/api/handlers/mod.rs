//! Route handlers for the banner service.

pub mod environment;
pub mod health;
pub mod page;
pub mod refresh;
