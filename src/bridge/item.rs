/// Feed-level metadata derived once per fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedMetadata {
    /// Tag name reported by the provider, or the humanized topic.
    pub name: String,
    /// Human-facing hub page of the topic.
    pub uri: String,
}

/// A single article, normalized for the feed renderer.
///
/// Items are produced by the bridge and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedItem {
    /// Absolute article URL.
    pub uri: String,
    /// Headline, verbatim.
    pub title: String,
    /// Publish time exactly as the provider sent it.
    ///
    /// `None` when the card has no publish time.
    pub timestamp: Option<String>,
    /// Story HTML with absolute links, optionally preceded by the lead image.
    pub content: String,
    /// Title-cased author line.
    pub author: Option<String>,
    /// Media URLs attached to the item (the lead image, if any).
    pub enclosures: Vec<String>,
}
