//! UI helper functions for terminal output formatting.

use std::io::Write;
use std::time::Duration;

use namewheel_engine::events::WheelEvent;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// One human-readable line for an event, stamped with the simulated clock.
pub fn format_event(at: Duration, event: &WheelEvent) -> String {
    let detail = match event {
        WheelEvent::SpinStarted {
            spin_id,
            delta,
            rotation,
            duration_ms,
            entry_count,
            ..
        } => format!(
            "#{spin_id} +{delta:.1} deg -> {rotation:.1} deg over {duration_ms} ms ({entry_count} entries)"
        ),
        WheelEvent::WinnerSelected {
            spin_id,
            index,
            entry,
        } => format!("#{spin_id} slice {index}: {}", entry.name),
        WheelEvent::RevealStarted { spin_id, winner } => {
            format!("#{spin_id} The winner is {}!", winner.name)
        }
        WheelEvent::ToneRequested { spin_id }
        | WheelEvent::CelebrationEnded { spin_id }
        | WheelEvent::AnnouncementClosed { spin_id } => format!("#{spin_id}"),
        WheelEvent::WheelReset { rotation } => format!("rotation {rotation:.1} deg"),
        WheelEvent::WinnerRemoved { entry } => format!("removed {}", entry.name),
    };
    format!(
        "[{:>7.3}s] {:<19} {}",
        at.as_secs_f64(),
        event.name(),
        detail
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use namewheel_engine::entry::Entry;

    #[test]
    fn format_event_shows_time_name_and_winner() {
        let event = WheelEvent::RevealStarted {
            spin_id: 2,
            winner: Entry::new("5", "Eve", "#F7DC6F"),
        };
        let line = format_event(Duration::from_millis(6100), &event);
        assert!(line.starts_with("[  6.100s] reveal_started"));
        assert!(line.ends_with("#2 The winner is Eve!"));
    }

    #[test]
    fn write_error_prefixes_message() {
        let mut err = Vec::new();
        write_error(&mut err, "boom").expect("write");
        assert_eq!(String::from_utf8(err).expect("utf8"), "Error: boom\n");
    }
}
