//! Endpoint handlers

pub mod logs;
pub mod smells;
pub mod status;
