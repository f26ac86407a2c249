//! Utility functions used by the bridge.
//!
//! - **Link rewriting**: absolutize relative links in story HTML
//! - **Text processing**: byline clean-up and topic humanizing
//! - **URL validation**: endpoint checks for configuration
//!
//! # Examples
//!
//! ```
//! use apbridge::util::{humanize_topic, normalize_author, HtmlLinkRewriter, LinkRewriter};
//!
//! assert_eq!(normalize_author("By JANE DOE").as_deref(), Some("Jane Doe"));
//! assert_eq!(humanize_topic("world-news"), "World news");
//!
//! let html = HtmlLinkRewriter.rewrite_links(r#"<a href="/x">x</a>"#, "https://apnews.com/");
//! assert_eq!(html, r#"<a href="https://apnews.com/x">x</a>"#);
//! ```

mod links;
mod text;
mod url_validator;

pub use links::{HtmlLinkRewriter, LinkRewriter};
pub use text::{humanize_topic, normalize_author, strip_byline_prefix, title_case_name};
pub use url_validator::{validate_endpoint, UrlValidationError};
