//! Shared types.

pub mod page;
