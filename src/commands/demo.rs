//! Sample tracking run: one call per operation, failures reported and skipped

use colored::*;
use eyre::Result;

use insayt_track::{Config, EventEmitter, Properties, TrackError};

pub fn run(config: &Config, emitter: &EventEmitter) -> Result<()> {
    println!("Sending sample events to {}", emitter.collect_url().cyan());
    println!();

    let site_id = &config.site_id;
    let visitor_id = &config.visitor_id;

    report(
        "Pageview tracked",
        "Pageview error",
        emitter.track_pageview(site_id, "/pricing", visitor_id),
    );

    let mut properties = Properties::new();
    properties.insert("amount".to_string(), serde_json::json!(99));
    report(
        "Event tracked",
        "Event error",
        emitter.track_event(site_id, "purchase", properties, visitor_id),
    );

    let mut traits = Properties::new();
    traits.insert("name".to_string(), serde_json::json!("Jane"));
    traits.insert("plan".to_string(), serde_json::json!("pro"));
    report(
        "User identified",
        "Identify error",
        emitter.identify(site_id, "user_123", traits, visitor_id),
    );

    Ok(())
}

fn report(success: &str, failure: &str, result: Result<(), TrackError>) {
    match result {
        Ok(()) => println!("{} {}", "✓".green(), success),
        Err(e) => {
            log::error!("{}: {}", failure, e);
            println!("{} {}: {}", "✗".red(), failure, e);
        }
    }
}
