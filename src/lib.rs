//! Server-side event tracking for Insayt
//!
//! Builds pageview, custom and identify events and POSTs each one to the
//! collector's `/api/collect` endpoint in a blocking request.

pub mod config;
pub mod emitter;
pub mod error;
pub mod event;
pub mod transport;

pub use config::Config;
pub use emitter::EventEmitter;
pub use error::TrackError;
pub use event::{CollectPayload, Event, EventKind, Properties};
pub use transport::{HttpTransport, Transport};
