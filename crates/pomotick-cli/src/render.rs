//! Plain-text rendering of the timer snapshot.

use pomotick_core::timer::SESSIONS_BEFORE_LONG_BREAK;
use pomotick_core::{Event, TimerSnapshot, TimerState};

/// Horizontal progress bar, `width` cells wide.
pub fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// One dot per work session in the current cycle.
pub fn cycle_dots(snapshot: &TimerSnapshot) -> String {
    (0..SESSIONS_BEFORE_LONG_BREAK)
        .map(|i| {
            if i < snapshot.work_sessions_in_cycle {
                '●'
            } else {
                '○'
            }
        })
        .collect()
}

fn state_label(state: TimerState) -> &'static str {
    match state {
        TimerState::Idle => "idle",
        TimerState::Running => "running",
        TimerState::Paused => "paused",
    }
}

/// Single status line for the current snapshot.
pub fn status_line(snapshot: &TimerSnapshot, bar_width: usize) -> String {
    format!(
        "{:<11} {} {} {:>3}%  {}  done {}  {:<7}  auto:{}",
        snapshot.session_type.label(),
        snapshot.format_remaining(),
        progress_bar(snapshot.progress(), bar_width),
        (snapshot.progress() * 100.0).round() as u32,
        cycle_dots(snapshot),
        snapshot.completed_work_sessions,
        state_label(snapshot.timer_state),
        if snapshot.auto_advance { "on" } else { "off" },
    )
}

/// Message worth printing on its own line, if any.
pub fn event_message(event: &Event) -> Option<String> {
    match event {
        Event::SessionCompleted {
            session_type,
            next_session,
            ..
        } => Some(match next_session {
            Some(next) => format!("{} finished. {} is up next.", session_type.label(), next.label()),
            None => format!("{} finished.", session_type.label()),
        }),
        Event::SessionSwitched {
            to,
            automatic: true,
            ..
        } => Some(format!("Switched to {}.", to.label())),
        _ => None,
    }
}
