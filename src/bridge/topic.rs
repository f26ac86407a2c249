use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while turning user input into a [`TopicSelector`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopicError {
    #[error("Unknown standard topic: {0}")]
    Unknown(String),
    #[error("Custom topic must not be empty")]
    EmptyCustom,
    #[error("Choose either a standard topic or a custom topic, not both")]
    Conflicting,
}

/// The named standard topics offered by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topic {
    #[default]
    TopNews,
    WorldNews,
    UsNews,
    Politics,
    Sports,
    Entertainment,
    Oddities,
    Travel,
    Technology,
    Lifestyle,
    Business,
    Health,
    Science,
    Religion,
    FactChecks,
}

impl Topic {
    /// All standard topics in menu order.
    pub const ALL: [Topic; 15] = [
        Topic::TopNews,
        Topic::WorldNews,
        Topic::UsNews,
        Topic::Politics,
        Topic::Sports,
        Topic::Entertainment,
        Topic::Oddities,
        Topic::Travel,
        Topic::Technology,
        Topic::Lifestyle,
        Topic::Business,
        Topic::Health,
        Topic::Science,
        Topic::Religion,
        Topic::FactChecks,
    ];

    /// The tag sent to the GraphQL endpoint.
    pub fn selector(self) -> &'static str {
        match self {
            Topic::TopNews => "apf-topnews",
            Topic::WorldNews => "world-news",
            Topic::UsNews => "us-news",
            Topic::Politics => "politics",
            Topic::Sports => "sports",
            Topic::Entertainment => "entertainment",
            Topic::Oddities => "oddities",
            Topic::Travel => "travel",
            Topic::Technology => "technology",
            Topic::Lifestyle => "lifestyle",
            Topic::Business => "business",
            Topic::Health => "health",
            Topic::Science => "science",
            Topic::Religion => "religion",
            Topic::FactChecks => "ap-fact-check",
        }
    }

    /// Menu label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Topic::TopNews => "AP Top News",
            Topic::WorldNews => "World News",
            Topic::UsNews => "U.S. News",
            Topic::Politics => "Politics",
            Topic::Sports => "Sports",
            Topic::Entertainment => "Entertainment",
            Topic::Oddities => "Oddities",
            Topic::Travel => "Travel",
            Topic::Technology => "Technology",
            Topic::Lifestyle => "Lifestyle",
            Topic::Business => "Business",
            Topic::Health => "Health",
            Topic::Science => "Science",
            Topic::Religion => "Religion",
            Topic::FactChecks => "Fact Checks",
        }
    }
}

impl FromStr for Topic {
    type Err = TopicError;

    /// Parses a selector value such as `world-news`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|t| t.selector() == s)
            .ok_or_else(|| TopicError::Unknown(s.to_owned()))
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Which feed to request: a standard topic or free-form custom text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicSelector {
    Standard(Topic),
    Custom(String),
}

impl Default for TopicSelector {
    fn default() -> Self {
        TopicSelector::Standard(Topic::default())
    }
}

impl TopicSelector {
    /// Resolves the two mutually exclusive parameter groups into a selector.
    ///
    /// With neither input the default standard topic is used.
    pub fn from_inputs(standard: Option<&str>, custom: Option<&str>) -> Result<Self, TopicError> {
        match (standard, custom) {
            (Some(_), Some(_)) => Err(TopicError::Conflicting),
            (None, Some(text)) => Self::custom(text),
            (Some(value), None) => value.parse().map(TopicSelector::Standard),
            (None, None) => Ok(Self::default()),
        }
    }

    /// Custom-topic mode. The text is trimmed and must not be blank.
    pub fn custom(text: &str) -> Result<Self, TopicError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TopicError::EmptyCustom);
        }
        Ok(TopicSelector::Custom(text.to_owned()))
    }

    /// The raw tag value sent to the provider.
    pub fn as_str(&self) -> &str {
        match self {
            TopicSelector::Standard(topic) => topic.selector(),
            TopicSelector::Custom(text) => text,
        }
    }
}

impl fmt::Display for TopicSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Parameter metadata
// ============================================================================

/// Input widget type of a bridge parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum ParameterKind {
    /// Pick one of `(label, value)` pairs.
    List {
        values: Vec<(&'static str, &'static str)>,
        default: &'static str,
    },
    /// Free-form text.
    Text { example: &'static str },
}

/// One parameter inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub key: &'static str,
    pub name: &'static str,
    pub required: bool,
    #[serde(flatten)]
    pub kind: ParameterKind,
}

/// A set of parameters; exactly one group is active per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterGroup {
    pub name: &'static str,
    pub parameters: Vec<Parameter>,
}

/// Declarative parameter metadata for the framework's input form.
pub fn parameter_groups() -> Vec<ParameterGroup> {
    vec![
        ParameterGroup {
            name: "Standard Topics",
            parameters: vec![Parameter {
                key: "topic",
                name: "Topic",
                required: false,
                kind: ParameterKind::List {
                    values: Topic::ALL
                        .into_iter()
                        .map(|t| (t.label(), t.selector()))
                        .collect(),
                    default: Topic::default().selector(),
                },
            }],
        },
        ParameterGroup {
            name: "Custom Topic",
            parameters: vec![Parameter {
                key: "topic",
                name: "Topic",
                required: true,
                kind: ParameterKind::Text { example: "europe" },
            }],
        },
    ]
}
