use pomotick_core::timer::{SESSIONS_BEFORE_LONG_BREAK, SETTLE_DELAY, TICK_INTERVAL};
use pomotick_core::SessionType;
use serde_json::json;

/// Print the fixed session table as JSON.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let sessions: Vec<_> = SessionType::ALL
        .iter()
        .map(|s| {
            json!({
                "type": s.as_str(),
                "label": s.label(),
                "duration_secs": s.duration_secs(),
            })
        })
        .collect();
    let out = json!({
        "sessions": sessions,
        "sessions_before_long_break": SESSIONS_BEFORE_LONG_BREAK,
        "settle_delay_secs": SETTLE_DELAY.as_secs(),
        "tick_interval_secs": TICK_INTERVAL.as_secs(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
