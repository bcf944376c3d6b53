use std::fmt::Debug;

use tracing::error;

/// UI handlers have nowhere to propagate to, so failures end up in the log.
pub fn log_failure<E: Debug>(what: &str, result: Result<(), E>) {
    if let Err(error) = result {
        error!(?error, "{what} failed");
    }
}

/// `mm:ss`, or `h:mm:ss` once the countdown is an hour or longer.
pub fn format_remaining(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_hours() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(299), "04:59");
        assert_eq!(format_remaining(3600), "1:00:00");
        assert_eq!(format_remaining(3725), "1:02:05");
    }
}
