use crate::config::DEFAULT_ENDPOINT;
use crate::transport::HttpTransport;
use crate::util::{humanize_topic, normalize_author, HtmlLinkRewriter, LinkRewriter};

use super::graphql::{ContentCard, FeedRequest, FeedResponse};
use super::{BridgeError, FeedMetadata, NormalizedItem, NAME, URI};

/// Hard cap on items returned by one fetch.
pub const MAX_ITEMS: usize = 15;

/// Rendition appended to a primary image's base URL.
const IMAGE_RENDITION: &str = "alternates/LANDSCAPE_16_9/1000.jpg";

/// Suffix appended to the feed name in [`ApNewsBridge::display_name`].
const NAME_SUFFIX: &str = " - Associated Press";

/// Canonical hub page for `topic`, or the bridge's home page without one.
///
/// ```
/// use apbridge::bridge::display_uri;
///
/// assert_eq!(display_uri(Some("politics")), "https://apnews.com/hub/politics");
/// assert_eq!(display_uri(None), "https://apnews.com/");
/// ```
pub fn display_uri(topic: Option<&str>) -> String {
    match topic {
        Some(topic) => format!("{URI}hub/{topic}"),
        None => URI.to_owned(),
    }
}

/// Feed adapter for the Associated Press topic feeds.
///
/// One instance serves one fetch-then-render cycle. The name of the last
/// successfully fetched feed is kept for [`display_name`](Self::display_name).
pub struct ApNewsBridge<T, R = HtmlLinkRewriter> {
    transport: T,
    rewriter: R,
    endpoint: String,
    feed_name: Option<String>,
}

impl<T: HttpTransport> ApNewsBridge<T> {
    pub fn new(transport: T) -> Self {
        Self::with_rewriter(transport, HtmlLinkRewriter)
    }
}

impl<T: HttpTransport, R: LinkRewriter> ApNewsBridge<T, R> {
    pub fn with_rewriter(transport: T, rewriter: R) -> Self {
        Self {
            transport,
            rewriter,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            feed_name: None,
        }
    }

    /// Overrides the GraphQL endpoint (local test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches the feed for `topic` and maps it into at most [`MAX_ITEMS`] items.
    ///
    /// The topic is sent as-is. Cards that do not decode or lack story HTML
    /// are skipped silently; the remaining ones keep the provider's order.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::EncodeRequest`] - the query payload could not be encoded
    /// - [`BridgeError::Transport`] - the transport failed
    /// - [`BridgeError::MalformedResponse`] - the body is not a feed response
    /// - [`BridgeError::NotFound`] - the feed has no items for `topic`
    pub async fn fetch_feed(
        &mut self,
        topic: &str,
    ) -> Result<(FeedMetadata, Vec<NormalizedItem>), BridgeError> {
        let payload =
            serde_json::to_vec(&FeedRequest::for_tag(topic)).map_err(BridgeError::EncodeRequest)?;
        let headers = [
            ("Content-Type", "application/json".to_owned()),
            ("Content-Length", payload.len().to_string()),
        ];

        tracing::debug!(topic = %topic, endpoint = %self.endpoint, bytes = payload.len(), "Requesting feed");
        let body = self.transport.post(&self.endpoint, &headers, payload).await?;
        tracing::debug!(topic = %topic, bytes = body.len(), "Received feed response");

        let response: FeedResponse = serde_json::from_slice(&body)?;
        for error in &response.errors {
            tracing::warn!(topic = %topic, message = %error.message, "Endpoint reported a GraphQL error");
        }

        let entries = response.items().len();
        if entries == 0 {
            return Err(BridgeError::NotFound {
                topic: topic.to_owned(),
            });
        }

        let metadata = FeedMetadata {
            name: response
                .tag_name()
                .map_or_else(|| humanize_topic(topic), str::to_owned),
            uri: display_uri(Some(topic)),
        };

        let items: Vec<NormalizedItem> = response
            .cards()
            .filter_map(|card| self.map_card(&card))
            .take(MAX_ITEMS)
            .collect();

        tracing::info!(
            topic = %topic,
            feed = %metadata.name,
            cards = entries,
            items = items.len(),
            "Fetched feed"
        );

        self.feed_name = Some(metadata.name.clone());
        Ok((metadata, items))
    }

    /// `"<feed name> - Associated Press"` after a successful fetch, else the
    /// bridge name.
    pub fn display_name(&self) -> String {
        match self.feed_name.as_deref() {
            Some(name) if !name.is_empty() => format!("{name}{NAME_SUFFIX}"),
            _ => NAME.to_owned(),
        }
    }

    fn map_card(&self, card: &ContentCard) -> Option<NormalizedItem> {
        let Some(story_html) = card.story_html() else {
            tracing::trace!(short_id = ?card.short_id, "Skipping card without story HTML");
            return None;
        };

        let uri = match card.route_path() {
            Some(path) => format!("{URI}{}", path.trim_start_matches('/')),
            None => format!("{URI}article/{}", card.short_id.as_deref().unwrap_or_default()),
        };

        let mut content = self.rewriter.rewrite_links(story_html, URI);
        let mut enclosures = Vec::new();

        if let Some(image_base) = card.image_base_url() {
            let image_url = format!("{image_base}{IMAGE_RENDITION}");
            content = format!(
                r#"<p><img src="{}"></p>{content}"#,
                escape_attribute(&image_url)
            );
            enclosures.push(image_url);
        }

        Some(NormalizedItem {
            uri,
            title: card.headline.clone().unwrap_or_default(),
            timestamp: card.published.as_ref().map(ToString::to_string),
            content,
            author: card.bylines.as_deref().and_then(normalize_author),
            enclosures,
        })
    }
}

/// Escapes a value for a double-quoted HTML attribute.
fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
