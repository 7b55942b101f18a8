//! SmellCheck - what is that smell?
//!
//! Pick a location and an observed odor and get back the stored causes and
//! solutions. The crate carries both sides of the lookup:
//!
//! - [`server`]: the `POST /api/smells` endpoint proxying to the hosted table
//! - [`store`]: the table seam, backed by Supabase or by in-memory records
//! - [`cli`]: the HTTP client, the two-step selector and the results page

pub mod cli;
pub mod config;
pub mod models;
pub mod sanitize;
pub mod server;
pub mod store;
