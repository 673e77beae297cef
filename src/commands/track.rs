use colored::*;
use eyre::{Context, Result};

use insayt_track::{Config, EventEmitter, EventKind};

use super::parse_properties;

pub fn pageview(
    url: &str,
    referrer: Option<String>,
    title: Option<String>,
    config: &Config,
    emitter: &EventEmitter,
) -> Result<()> {
    let kind = EventKind::Pageview {
        url: url.to_string(),
        referrer,
        title,
    };
    emitter
        .send(&config.site_id, &config.visitor_id, kind)
        .context("Failed to track pageview")?;

    println!("{} Pageview tracked: {}", "✓".green(), url.cyan());
    Ok(())
}

pub fn event(name: &str, properties: &[String], config: &Config, emitter: &EventEmitter) -> Result<()> {
    let properties = parse_properties(properties)?;
    emitter
        .track_event(&config.site_id, name, properties, &config.visitor_id)
        .context("Failed to track event")?;

    println!("{} Event tracked: {}", "✓".green(), name.cyan());
    Ok(())
}

pub fn identify(user_id: &str, traits: &[String], config: &Config, emitter: &EventEmitter) -> Result<()> {
    let traits = parse_properties(traits)?;
    emitter
        .identify(&config.site_id, user_id, traits, &config.visitor_id)
        .context("Failed to identify user")?;

    println!("{} User identified: {}", "✓".green(), user_id.cyan());
    Ok(())
}
