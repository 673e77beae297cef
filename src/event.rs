//! Analytics events and the collect payload
//!
//! Every event shares a handful of common fields (`siteId`, `timestamp`,
//! `sessionId`, `visitorId`) and carries a kind-specific body tagged by
//! `type`. Only the emitter stamps events, so the timestamp is always the
//! send time.

use indexmap::IndexMap;
use std::borrow::Cow;
use serde::{Deserialize, Serialize};

/// Session ID used for every server-issued event
pub const SERVER_SESSION_ID: &str = "server";

/// Open key-value map for event properties and identify traits
pub type Properties = IndexMap<String, serde_json::Value>;

/// Kind-specific part of an event, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventKind {
    Pageview {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        referrer: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    Event {
        name: String,
        #[serde(default)]
        properties: Properties,
    },
    Identify {
        #[serde(rename = "userId")]
        user_id: String,
        #[serde(default)]
        traits: Properties,
    },
}

impl EventKind {
    /// A pageview with no referrer or title
    pub fn pageview(url: &str) -> Self {
        EventKind::Pageview {
            url: url.to_string(),
            referrer: None,
            title: None,
        }
    }

    pub fn event(name: &str, properties: Properties) -> Self {
        EventKind::Event {
            name: name.to_string(),
            properties,
        }
    }

    pub fn identify(user_id: &str, traits: Properties) -> Self {
        EventKind::Identify {
            user_id: user_id.to_string(),
            traits,
        }
    }

    /// The `type` tag as it appears on the wire
    pub fn type_name(&self) -> &'static str {
        match self {
            EventKind::Pageview { .. } => "pageview",
            EventKind::Event { .. } => "event",
            EventKind::Identify { .. } => "identify",
        }
    }
}

/// A single analytics record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(flatten)]
    pub kind: EventKind,
    pub site_id: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub session_id: String,
    pub visitor_id: String,
}

impl Event {
    pub(crate) fn stamped(site_id: &str, visitor_id: &str, kind: EventKind, timestamp: i64) -> Self {
        Self {
            kind,
            site_id: site_id.to_string(),
            timestamp,
            session_id: SERVER_SESSION_ID.to_string(),
            visitor_id: visitor_id.to_string(),
        }
    }
}

/// The body POSTed to the collect endpoint
///
/// Borrows the events when sending, owns them when parsed back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectPayload<'a> {
    pub events: Cow<'a, [Event]>,
}

impl<'a> CollectPayload<'a> {
    pub fn single(event: &'a Event) -> Self {
        Self {
            events: Cow::Borrowed(std::slice::from_ref(event)),
        }
    }
}
