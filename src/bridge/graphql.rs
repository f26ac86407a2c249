//! Wire types for the provider's `GetFeed` GraphQL query.
//!
//! Every nested level of the response is optional: the endpoint omits or
//! nulls fields freely, and union members other than `Content` arrive as
//! empty objects. Cards are decoded one at a time so a single odd card
//! cannot sink the whole feed.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Number of cards requested per query.
pub const PAGE_SIZE: u32 = 20;

/// The fixed `GetFeed` query document.
pub const GET_FEED_QUERY: &str = r#"query GetFeed($tag: String, $pageSize: Int, $offset: Int) {
    feed(tag: $tag, first: $pageSize, offset: $offset) {
        items {
            ... on Content {
                id
                shortId
                headline
                bylines
                published
                storyHtml
                siteId
                firstWords
                route {
                    path
                }
                primaryImage {
                    ... on Image {
                        gcsUrl
                    }
                }
            }
        }
        tag {
            name
        }
    }
}"#;

// ============================================================================
// Request
// ============================================================================

#[derive(Debug, Serialize)]
pub struct FeedRequest<'a> {
    pub query: &'static str,
    pub variables: FeedVariables<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedVariables<'a> {
    pub tag: &'a str,
    pub page_size: u32,
    pub offset: u32,
}

impl<'a> FeedRequest<'a> {
    /// First page of the feed for `tag`.
    pub fn for_tag(tag: &'a str) -> Self {
        Self {
            query: GET_FEED_QUERY,
            variables: FeedVariables {
                tag,
                page_size: PAGE_SIZE,
                offset: 0,
            },
        }
    }
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct FeedResponse {
    pub data: Option<FeedData>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedData {
    pub feed: Option<Feed>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Feed {
    /// Raw cards, decoded lazily by [`FeedResponse::cards`].
    pub items: Option<Vec<Value>>,
    pub tag: Option<FeedTag>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedTag {
    pub name: Option<String>,
}

/// One article. Only cards with story HTML are usable.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentCard {
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub short_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bylines: Option<String>,
    pub published: Option<Published>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub story_html: Option<String>,
    pub site_id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_words: Option<String>,
    pub route: Option<Route>,
    pub primary_image: Option<PrimaryImage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Route {
    pub path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryImage {
    pub gcs_url: Option<String>,
}

/// Publish time exactly as the endpoint sent it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Published {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Published {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Published::Text(s) => f.write_str(s),
            Published::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Scalars become text; arrays, objects and null become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

impl FeedResponse {
    /// Raw entries under `data.feed.items`, empty when any level is missing.
    pub fn items(&self) -> &[Value] {
        self.data
            .as_ref()
            .and_then(|d| d.feed.as_ref())
            .and_then(|f| f.items.as_deref())
            .unwrap_or_default()
    }

    /// Decoded cards in feed order. Entries that do not decode are skipped.
    pub fn cards(&self) -> impl Iterator<Item = ContentCard> + '_ {
        self.items()
            .iter()
            .enumerate()
            .filter_map(|(index, value)| match ContentCard::deserialize(value) {
                Ok(card) => Some(card),
                Err(e) => {
                    tracing::trace!(index, error = %e, "Skipping card that does not decode");
                    None
                }
            })
    }

    /// Non-empty `data.feed.tag.name`.
    pub fn tag_name(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.feed.as_ref())
            .and_then(|f| f.tag.as_ref())
            .and_then(|t| t.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

impl ContentCard {
    /// Story HTML when present and non-empty.
    pub fn story_html(&self) -> Option<&str> {
        self.story_html.as_deref().filter(|s| !s.is_empty())
    }

    /// Route path when present and non-empty.
    pub fn route_path(&self) -> Option<&str> {
        self.route
            .as_ref()
            .and_then(|r| r.path.as_deref())
            .filter(|p| !p.is_empty())
    }

    /// Base URL of the primary image rendition set.
    pub fn image_base_url(&self) -> Option<&str> {
        self.primary_image
            .as_ref()
            .and_then(|i| i.gcs_url.as_deref())
            .filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_payload_shape() {
        let payload = serde_json::to_value(FeedRequest::for_tag("world-news")).unwrap();
        assert_eq!(payload["variables"]["tag"], "world-news");
        assert_eq!(payload["variables"]["pageSize"], 20);
        assert_eq!(payload["variables"]["offset"], 0);
        assert_eq!(payload["query"], GET_FEED_QUERY);
        assert_eq!(payload.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_parse_full_card() {
        let json = r#"{
            "data": {"feed": {
                "items": [{
                    "id": "abc",
                    "shortId": "xyz",
                    "headline": "Headline",
                    "bylines": "By JOHN SMITH",
                    "published": 1700000000000,
                    "storyHtml": "<p>Body</p>",
                    "siteId": 7,
                    "firstWords": "Body",
                    "route": {"path": "/article/xyz"},
                    "primaryImage": {"gcsUrl": "https://img.example/foo/"}
                }],
                "tag": {"name": "World News"}
            }}
        }"#;
        let response: FeedResponse = serde_json::from_str(json).unwrap();
        let card = response.cards().next().unwrap();

        assert_eq!(card.short_id.as_deref(), Some("xyz"));
        assert_eq!(card.story_html(), Some("<p>Body</p>"));
        assert_eq!(card.route_path(), Some("/article/xyz"));
        assert_eq!(card.image_base_url(), Some("https://img.example/foo/"));
        assert_eq!(
            card.published.as_ref().map(ToString::to_string).as_deref(),
            Some("1700000000000")
        );
        assert_eq!(response.tag_name(), Some("World News"));
    }

    #[test]
    fn test_non_content_union_member_is_empty_card() {
        let json = r#"{"data": {"feed": {"items": [{}, {"storyHtml": ""}]}}}"#;
        let response: FeedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.items().len(), 2);
        assert_eq!(response.cards().count(), 2);
        assert!(response.cards().all(|c| c.story_html().is_none()));
    }

    #[test]
    fn test_scalar_fields_tolerate_other_types() {
        let json = r#"{"data": {"feed": {"items": [{
            "shortId": 12345,
            "headline": true,
            "bylines": ["By A", "By B"],
            "storyHtml": "<p>fine</p>",
            "firstWords": {"text": "fine"}
        }]}}}"#;
        let response: FeedResponse = serde_json::from_str(json).unwrap();
        let card = response.cards().next().unwrap();

        assert_eq!(card.short_id.as_deref(), Some("12345"));
        assert_eq!(card.headline.as_deref(), Some("true"));
        assert_eq!(card.bylines, None);
        assert_eq!(card.first_words, None);
        assert_eq!(card.story_html(), Some("<p>fine</p>"));
    }

    #[test]
    fn test_undecodable_card_is_skipped() {
        let json = r#"{"data": {"feed": {"items": [
            {"shortId": "a", "storyHtml": "<p>a</p>"},
            {"shortId": "b", "storyHtml": "<p>b</p>", "route": "not-an-object"},
            "not-a-card",
            {"shortId": "c", "storyHtml": "<p>c</p>", "published": [1, 2]},
            {"shortId": "d", "storyHtml": "<p>d</p>"}
        ]}}}"#;
        let response: FeedResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.items().len(), 5);
        let ids: Vec<_> = response.cards().filter_map(|c| c.short_id).collect();
        assert_eq!(ids, vec!["a".to_string(), "d".to_string()]);
    }

    #[test]
    fn test_missing_levels_yield_no_items() {
        for json in [
            r#"{}"#,
            r#"{"data": null}"#,
            r#"{"data": {"feed": null}}"#,
            r#"{"data": {"feed": {"items": null}}}"#,
        ] {
            let response: FeedResponse = serde_json::from_str(json).unwrap();
            assert!(response.items().is_empty(), "input: {json}");
            assert_eq!(response.tag_name(), None);
        }
    }

    #[test]
    fn test_empty_tag_name_is_none() {
        let json = r#"{"data": {"feed": {"items": [], "tag": {"name": ""}}}}"#;
        let response: FeedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.tag_name(), None);
    }

    #[test]
    fn test_graphql_errors_parsed() {
        let json = r#"{"errors": [{"message": "boom"}], "data": null}"#;
        let response: FeedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "boom");
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let json = r#"{"data": {"feed": {"items": "nope"}}}"#;
        assert!(serde_json::from_str::<FeedResponse>(json).is_err());
    }
}
