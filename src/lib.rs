//! Associated Press News feed bridge.
//!
//! Queries the AP GraphQL endpoint for a topic feed and maps the response
//! into normalized feed items for an external feed renderer.

pub mod bridge;
pub mod config;
pub mod transport;
pub mod util;
