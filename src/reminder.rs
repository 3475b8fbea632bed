use crate::models::ReminderSettings;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Next instant the daily reminder should fire, strictly after `now`.
/// Disabled settings or an out-of-range time yield `None`; actually raising
/// the notification is the presentation layer's business.
pub fn next_occurrence(settings: &ReminderSettings, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if !settings.enabled {
        return None;
    }
    let today_at = now
        .date_naive()
        .and_hms_opt(settings.hour, settings.minute, 0)?;
    let candidate = Utc.from_utc_datetime(&today_at);
    if candidate > now {
        Some(candidate)
    } else {
        Some(candidate + Duration::days(1))
    }
}

#[cfg(test)]
mod tests {
    use super::next_occurrence;
    use crate::models::ReminderSettings;
    use chrono::{TimeZone, Utc};

    #[test]
    fn disabled_reminder_never_fires() {
        let settings = ReminderSettings {
            enabled: false,
            hour: 21,
            minute: 0,
        };
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(next_occurrence(&settings, now), None);
    }

    #[test]
    fn fires_later_today_when_the_time_is_still_ahead() {
        let settings = ReminderSettings {
            enabled: true,
            hour: 21,
            minute: 0,
        };
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 21, 0, 0).unwrap();
        assert_eq!(next_occurrence(&settings, now), Some(expected));
    }

    #[test]
    fn rolls_to_tomorrow_once_the_time_has_passed() {
        let settings = ReminderSettings {
            enabled: true,
            hour: 8,
            minute: 30,
        };
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 3, 2, 8, 30, 0).unwrap();
        assert_eq!(next_occurrence(&settings, now), Some(expected));
    }

    #[test]
    fn the_exact_minute_counts_as_already_passed() {
        let settings = ReminderSettings {
            enabled: true,
            hour: 8,
            minute: 30,
        };
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 3, 2, 8, 30, 0).unwrap();
        assert_eq!(next_occurrence(&settings, now), Some(expected));
    }

    #[test]
    fn out_of_range_time_yields_none() {
        let settings = ReminderSettings {
            enabled: true,
            hour: 24,
            minute: 0,
        };
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(next_occurrence(&settings, now), None);
    }
}
