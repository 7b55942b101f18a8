//! Client side of the lookup
//!
//! [`client::SmellsClient`] talks to the API, [`selector::Selector`] holds the
//! two dependent choice lists, and [`page::PageShell`] fetches and keeps the
//! results of a finished selection.

pub mod api;
pub mod client;
pub mod commands;
pub mod display;
pub mod page;
pub mod selector;

pub use api::SmellsApi;
pub use client::{ClientConfig, ClientError, SmellsClient};
