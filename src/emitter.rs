//! Event emitter: builds events and POSTs them to the collector

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::config::Config;
use crate::error::TrackError;
use crate::event::{CollectPayload, Event, EventKind, Properties};
use crate::transport::{HttpTransport, Transport};

/// Sends events to a single collect endpoint
pub struct EventEmitter<T: Transport = HttpTransport> {
    collect_url: String,
    transport: T,
    last_timestamp: AtomicI64,
}

impl EventEmitter<HttpTransport> {
    /// Create an emitter using the HTTP transport
    pub fn new(config: &Config) -> Self {
        Self::with_transport(config, HttpTransport::new(config.timeout()))
    }
}

impl<T: Transport> EventEmitter<T> {
    pub fn with_transport(config: &Config, transport: T) -> Self {
        Self {
            collect_url: config.collect_url(),
            transport,
            last_timestamp: AtomicI64::new(i64::MIN),
        }
    }

    pub fn collect_url(&self) -> &str {
        &self.collect_url
    }

    /// Send a pageview event
    pub fn track_pageview(&self, site_id: &str, url: &str, visitor_id: &str) -> Result<(), TrackError> {
        self.send(site_id, visitor_id, EventKind::pageview(url))
    }

    /// Send a custom event
    pub fn track_event(
        &self,
        site_id: &str,
        name: &str,
        properties: Properties,
        visitor_id: &str,
    ) -> Result<(), TrackError> {
        self.send(site_id, visitor_id, EventKind::event(name, properties))
    }

    /// Send an identify event
    pub fn identify(&self, site_id: &str, user_id: &str, traits: Properties, visitor_id: &str) -> Result<(), TrackError> {
        self.send(site_id, visitor_id, EventKind::identify(user_id, traits))
    }

    /// Stamp `kind` with the common fields and send it
    pub fn send(&self, site_id: &str, visitor_id: &str, kind: EventKind) -> Result<(), TrackError> {
        let event = Event::stamped(site_id, visitor_id, kind, self.now_millis());
        self.send_event(&event)
    }

    /// POST a single-event collect payload
    fn send_event(&self, event: &Event) -> Result<(), TrackError> {
        let payload = CollectPayload::single(event);
        let body = serde_json::to_string(&payload)?;

        log::debug!("sending {} event to {}", event.kind.type_name(), self.collect_url);

        let status = self.transport.post_json(&self.collect_url, &body).inspect_err(|e| {
            log::warn!("failed to send {} event: {}", event.kind.type_name(), e);
        })?;

        if status != 200 {
            log::warn!("collector rejected {} event with status {}", event.kind.type_name(), status);
            return Err(TrackError::UnexpectedStatus(status));
        }

        Ok(())
    }

    /// Wall-clock milliseconds, never below a value already handed out
    fn now_millis(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let previous = self.last_timestamp.fetch_max(now, Ordering::SeqCst);
        previous.max(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every request and answers with a fixed status
    struct RecordingTransport {
        status: u16,
        requests: Mutex<Vec<(String, String)>>,
    }

    impl RecordingTransport {
        fn new(status: u16) -> Self {
            Self {
                status,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for RecordingTransport {
        fn post_json(&self, url: &str, body: &str) -> Result<u16, TrackError> {
            self.requests.lock().unwrap().push((url.to_string(), body.to_string()));
            Ok(self.status)
        }
    }

    fn emitter(status: u16) -> EventEmitter<RecordingTransport> {
        EventEmitter::with_transport(&Config::default(), RecordingTransport::new(status))
    }

    fn sent_events(emitter: &EventEmitter<RecordingTransport>) -> Vec<serde_json::Value> {
        emitter
            .transport
            .requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, body)| serde_json::from_str::<serde_json::Value>(body).unwrap())
            .map(|payload| {
                let events = payload["events"].as_array().unwrap();
                assert_eq!(events.len(), 1);
                events[0].clone()
            })
            .collect()
    }

    #[test]
    fn test_pageview_payload() {
        let emitter = emitter(200);
        emitter.track_pageview("site-1", "/pricing", "visitor-9").unwrap();

        let event = &sent_events(&emitter)[0];
        assert_eq!(event["type"], "pageview");
        assert_eq!(event["sessionId"], "server");
        assert_eq!(event["url"], "/pricing");
        assert_eq!(event["siteId"], "site-1");
        assert_eq!(event["visitorId"], "visitor-9");
        assert!(event["timestamp"].is_i64());
    }

    #[test]
    fn test_event_payload() {
        let emitter = emitter(200);
        let mut props = Properties::new();
        props.insert("amount".to_string(), serde_json::json!(99));
        emitter.track_event("site-1", "purchase", props, "server").unwrap();

        let event = &sent_events(&emitter)[0];
        assert_eq!(event["type"], "event");
        assert_eq!(event["name"], "purchase");
        assert_eq!(event["properties"], serde_json::json!({"amount": 99}));
    }

    #[test]
    fn test_event_payload_empty_properties() {
        let emitter = emitter(200);
        emitter.track_event("site-1", "ping", Properties::new(), "server").unwrap();

        let event = &sent_events(&emitter)[0];
        assert_eq!(event["properties"], serde_json::json!({}));
    }

    #[test]
    fn test_identify_payload() {
        let emitter = emitter(200);
        let mut traits = Properties::new();
        traits.insert("name".to_string(), serde_json::json!("Jane"));
        emitter.identify("site-1", "user_123", traits, "server").unwrap();

        let event = &sent_events(&emitter)[0];
        assert_eq!(event["type"], "identify");
        assert_eq!(event["userId"], "user_123");
        assert_eq!(event["traits"]["name"], "Jane");
    }

    #[test]
    fn test_posts_to_collect_url() {
        let emitter = emitter(200);
        emitter.track_pageview("s", "/", "v").unwrap();

        let requests = emitter.transport.requests.lock().unwrap();
        assert_eq!(requests[0].0, "http://localhost:3002/api/collect");
    }

    #[test]
    fn test_non_200_is_unexpected_status() {
        for status in [201, 204, 400, 500] {
            let emitter = emitter(status);
            let err = emitter.track_pageview("s", "/", "v").unwrap_err();
            assert!(matches!(err, TrackError::UnexpectedStatus(code) if code == status));
        }
    }

    #[test]
    fn test_all_operations_fail_on_500() {
        let emitter = emitter(500);
        let results = [
            emitter.track_pageview("s", "/", "v"),
            emitter.track_event("s", "e", Properties::new(), "v"),
            emitter.identify("s", "u", Properties::new(), "v"),
        ];
        for result in results {
            assert_eq!(result.unwrap_err().status(), Some(500));
        }
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let emitter = emitter(200);
        for i in 0..20 {
            emitter.track_pageview("s", &format!("/page/{}", i), "v").unwrap();
        }

        let stamps: Vec<i64> = sent_events(&emitter)
            .iter()
            .map(|e| e["timestamp"].as_i64().unwrap())
            .collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_clock_never_goes_backwards() {
        let emitter = emitter(200);
        let future = Utc::now().timestamp_millis() + 60_000;
        emitter.last_timestamp.store(future, Ordering::SeqCst);

        assert_eq!(emitter.now_millis(), future);
    }

    #[test]
    fn test_send_stamps_server_session_and_watermark() {
        let emitter = emitter(200);
        let future = Utc::now().timestamp_millis() + 60_000;
        emitter.last_timestamp.store(future, Ordering::SeqCst);

        emitter.send("s", "v", EventKind::pageview("/")).unwrap();
        emitter.identify("s", "u", Properties::new(), "v").unwrap();

        for event in sent_events(&emitter) {
            assert_eq!(event["sessionId"], "server");
            assert_eq!(event["timestamp"].as_i64(), Some(future));
        }
    }

    #[test]
    fn test_send_with_referrer() {
        let emitter = emitter(200);
        let kind = EventKind::Pageview {
            url: "/blog".to_string(),
            referrer: Some("https://news.example".to_string()),
            title: None,
        };
        emitter.send("s", "v", kind).unwrap();

        let event = &sent_events(&emitter)[0];
        assert_eq!(event["referrer"], "https://news.example");
        assert!(event.get("title").is_none());
    }
}
