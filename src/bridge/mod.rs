//! Associated Press News bridge.
//!
//! Turns one AP topic feed into normalized feed items:
//!
//! - **Request**: a single `GetFeed` GraphQL query for the topic tag
//! - **Mapping**: each content card becomes a [`NormalizedItem`] with an
//!   absolute link, cleaned-up author and absolutized story HTML
//! - **Metadata**: feed name and hub URI for the renderer
//!
//! # Architecture
//!
//! - [`adapter`] - the [`ApNewsBridge`] fetch/map pipeline
//! - [`graphql`] - query document and wire types
//! - [`topic`] - standard topics and the parameter groups offered to users
//!
//! HTTP and HTML link rewriting are collaborators behind the
//! [`HttpTransport`](crate::transport::HttpTransport) and
//! [`LinkRewriter`](crate::util::LinkRewriter) traits.
//!
//! # Example
//!
//! ```ignore
//! use apbridge::bridge::{ApNewsBridge, TopicSelector};
//! use apbridge::transport::ReqwestTransport;
//!
//! let transport = ReqwestTransport::from_config(&config)?;
//! let mut bridge = ApNewsBridge::new(transport);
//! let (metadata, items) = bridge.fetch_feed(TopicSelector::default().as_str()).await?;
//! println!("{}", bridge.display_name());
//! ```

pub mod adapter;
mod error;
pub mod graphql;
mod item;
pub mod topic;

use std::time::Duration;

pub use adapter::{display_uri, ApNewsBridge, MAX_ITEMS};
pub use error::BridgeError;
pub use item::{FeedMetadata, NormalizedItem};
pub use topic::{parameter_groups, Topic, TopicError, TopicSelector};

/// Bridge name, also the fallback display name.
pub const NAME: &str = "Associated Press News Bridge";
/// Provider home page; base for article, hub and relative links.
pub const URI: &str = "https://apnews.com/";
pub const DESCRIPTION: &str = "Returns newest articles by topic";
pub const MAINTAINER: &str = "VerifiedJoseph";
/// How long the hosting framework may cache a rendered feed.
pub const CACHE_TIMEOUT: Duration = Duration::from_secs(15 * 60);
