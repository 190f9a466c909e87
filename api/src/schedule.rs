use chrono::{DateTime, Days, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

/// All draw times are computed against this zone, independent of the
/// caller's locale.
pub const DRAW_TIME_ZONE: Tz = chrono_tz::US::Pacific;

/// Draws are announced at 2:00 PM.
pub const DRAW_HOUR: u32 = 14;

/// Date format used on the history page and for delete-entry lookups.
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y 2:00 PM";

pub fn now() -> DateTime<Tz> {
    Utc::now().with_timezone(&DRAW_TIME_ZONE)
}

/// The date of the next scheduled draw.
///
/// If a draw was already recorded today the next one is tomorrow.
/// Otherwise the next draw is today if the draw hour has not passed yet,
/// tomorrow if it has.
pub fn next_draw_date(now: DateTime<Tz>, latest_draw: Option<DateTime<Utc>>) -> NaiveDate {
    let today = now.date_naive();

    let drawn_today = latest_draw
        .map(|date| date.with_timezone(&DRAW_TIME_ZONE).date_naive() == today)
        .unwrap_or(false);

    if !drawn_today && now.hour() < DRAW_HOUR {
        today
    } else {
        // Duration arithmetic, not a day-field increment, so month and year
        // boundaries roll over correctly.
        today + Days::new(1)
    }
}

pub fn format_draw_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn format_display_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&DRAW_TIME_ZONE)
        .format(DISPLAY_FORMAT)
        .to_string()
}

pub fn parse_display_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DISPLAY_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn pacific(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Tz> {
        DRAW_TIME_ZONE
            .with_ymd_and_hms(year, month, day, hour, min, 0)
            .unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_before_draw_hour_no_draw_today() {
        assert_eq!(
            next_draw_date(pacific(2024, 5, 10, 9, 30), None),
            date(2024, 5, 10)
        );

        // A draw from yesterday does not push the next draw out.
        let yesterday = pacific(2024, 5, 9, 14, 0).with_timezone(&Utc);
        assert_eq!(
            next_draw_date(pacific(2024, 5, 10, 9, 30), Some(yesterday)),
            date(2024, 5, 10)
        );
    }

    #[test]
    fn test_at_or_after_draw_hour() {
        assert_eq!(
            next_draw_date(pacific(2024, 5, 10, 14, 0), None),
            date(2024, 5, 11)
        );
        assert_eq!(
            next_draw_date(pacific(2024, 5, 10, 23, 59), None),
            date(2024, 5, 11)
        );
    }

    #[test]
    fn test_draw_already_recorded_today() {
        let this_morning = pacific(2024, 5, 10, 8, 0).with_timezone(&Utc);

        // Even before the draw hour, today's draw pushes the next one to
        // tomorrow.
        assert_eq!(
            next_draw_date(pacific(2024, 5, 10, 9, 0), Some(this_morning)),
            date(2024, 5, 11)
        );
    }

    #[test]
    fn test_month_and_year_rollover() {
        assert_eq!(
            next_draw_date(pacific(2024, 1, 31, 15, 0), None),
            date(2024, 2, 1)
        );
        assert_eq!(
            next_draw_date(pacific(2023, 12, 31, 15, 0), None),
            date(2024, 1, 1)
        );
        // Leap year.
        assert_eq!(
            next_draw_date(pacific(2024, 2, 28, 15, 0), None),
            date(2024, 2, 29)
        );
        assert_eq!(
            next_draw_date(pacific(2023, 2, 28, 15, 0), None),
            date(2023, 3, 1)
        );
    }

    #[test]
    fn test_format_draw_date() {
        assert_eq!(format_draw_date(date(2024, 2, 1)), "01.02.2024");
    }

    #[test]
    fn test_display_date_roundtrip() {
        assert_eq!(
            parse_display_date("31.01.2024 2:00 PM"),
            Some(date(2024, 1, 31))
        );
        assert_eq!(
            parse_display_date(" 31.01.2024 2:00 PM "),
            Some(date(2024, 1, 31))
        );
        assert_eq!(parse_display_date("31.01.2024"), None);
        assert_eq!(parse_display_date("2024-01-31 2:00 PM"), None);
        assert_eq!(parse_display_date(""), None);

        let stamp = pacific(2024, 1, 31, 14, 0).with_timezone(&Utc);
        assert_eq!(format_display_date(stamp), "31.01.2024 2:00 PM");
        assert_eq!(
            parse_display_date(&format_display_date(stamp)),
            Some(date(2024, 1, 31))
        );
    }
}
