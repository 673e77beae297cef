//! HTTP transport for delivering collect payloads

use std::time::Duration;

use ureq::Agent;

use crate::error::TrackError;

/// Something that can POST a JSON body and report the response status
pub trait Transport: Send + Sync {
    fn post_json(&self, url: &str, body: &str) -> Result<u16, TrackError>;
}

/// Blocking transport over a `ureq::Agent`
pub struct HttpTransport {
    agent: Agent,
}

impl HttpTransport {
    /// Create a transport, optionally bounding each request by `timeout`
    pub fn new(timeout: Option<Duration>) -> Self {
        // Non-2xx responses come back as responses so the emitter sees the code
        let agent: Agent = Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build()
            .into();

        Self { agent }
    }

    /// Wrap an agent configured by the caller (proxies, TLS, user agent)
    pub fn from_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, body: &str) -> Result<u16, TrackError> {
        let response = self
            .agent
            .post(url)
            .header("Content-Type", "application/json")
            .send(body.as_bytes())?;

        Ok(response.status().as_u16())
    }
}
