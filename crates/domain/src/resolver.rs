use crate::day::Day;
use chrono::prelude::*;
use chrono_tz::Tz;

/// Outcome of evaluating one user's preferred send hour against a UTC
/// instant.
#[derive(Debug, Clone, PartialEq)]
pub struct HourResolution {
    /// The user's local wall-clock hour equals their preferred send hour
    /// at this instant
    pub fires: bool,
    /// The calendar date on the user's own wall clock at this instant.
    /// This is the date to look up workouts for, never the UTC date.
    pub local_date: Day,
}

/// Evaluates whether a user's preferred local send hour matches the given
/// UTC instant, under full IANA timezone rules.
///
/// Callers are expected to pass the top of the UTC hour being processed,
/// see [`truncate_to_hour`].
///
/// DST notes:
/// - Spring-forward: a preferred hour that falls in the skipped wall-clock
///   range never occurs locally that day, so no instant fires for it. The
///   user misses that day, there is no compensating delivery at another
///   hour.
/// - Fall-back: two UTC hours map to the repeated local hour and both
///   resolve with `fires: true` here. Restricting delivery to the first
///   occurrence is the delivery log's job, keyed by (user, local date).
pub fn resolve_send_hour(
    now_utc: DateTime<Utc>,
    timezone: &Tz,
    preferred_send_hour: u32,
) -> HourResolution {
    let local = timezone.from_utc_datetime(&now_utc.naive_utc());
    HourResolution {
        fires: local.hour() == preferred_send_hour,
        local_date: Day::from(local.date_naive()),
    }
}

/// Rounds a UTC instant down to the top of its hour. The hourly batch
/// always evaluates eligibility at hour boundaries so that an operator
/// re-run at 13:42 processes the same hour as the scheduled run at 13:00.
pub fn truncate_to_hour(instant: DateTime<Utc>) -> DateTime<Utc> {
    let secs = instant.timestamp();
    match Utc.timestamp_opt(secs - secs.rem_euclid(3600), 0) {
        chrono::LocalResult::Single(dt) => dt,
        _ => instant,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .expect("Valid UTC datetime")
    }

    fn tz(tzid: &str) -> Tz {
        tzid.parse().expect("Valid timezone")
    }

    fn day(datestr: &str) -> Day {
        datestr.parse().expect("Valid day")
    }

    #[test]
    fn fires_at_preferred_hour_in_standard_time() {
        // New York is UTC-5 in January
        let res = resolve_send_hour(utc(2021, 1, 15, 13), &tz("America/New_York"), 8);
        assert!(res.fires);
        assert_eq!(res.local_date, day("2021-1-15"));

        let res = resolve_send_hour(utc(2021, 1, 15, 12), &tz("America/New_York"), 8);
        assert!(!res.fires);
    }

    #[test]
    fn fires_at_preferred_hour_in_daylight_time() {
        // New York is UTC-4 in July
        let res = resolve_send_hour(utc(2021, 7, 1, 12), &tz("America/New_York"), 8);
        assert!(res.fires);
        assert_eq!(res.local_date, day("2021-7-1"));
    }

    #[test]
    fn supports_half_hour_offset_zones() {
        // Kolkata is UTC+5:30, so 03:00 UTC is 08:30 local
        let res = resolve_send_hour(utc(2021, 6, 1, 3), &tz("Asia/Kolkata"), 8);
        assert!(res.fires);
        assert_eq!(res.local_date, day("2021-6-1"));

        // 02:00 UTC is 07:30 local
        let res = resolve_send_hour(utc(2021, 6, 1, 2), &tz("Asia/Kolkata"), 8);
        assert!(!res.fires);
    }

    #[test]
    fn supports_quarter_hour_offset_zones() {
        // Kathmandu is UTC+5:45, so 03:00 UTC is 08:45 local
        let res = resolve_send_hour(utc(2021, 6, 1, 3), &tz("Asia/Kathmandu"), 8);
        assert!(res.fires);
        let res = resolve_send_hour(utc(2021, 6, 1, 2), &tz("Asia/Kathmandu"), 8);
        assert!(!res.fires);
    }

    #[test]
    fn resolves_local_date_across_the_date_line() {
        // Kiritimati is UTC+14: 18:00 UTC on June 1st is 08:00 on June 2nd
        let res = resolve_send_hour(utc(2021, 6, 1, 18), &tz("Pacific/Kiritimati"), 8);
        assert!(res.fires);
        assert_eq!(res.local_date, day("2021-6-2"));
    }

    #[test]
    fn date_line_extremes_fire_roughly_26_hours_apart() {
        let east = utc(2021, 6, 1, 18); // UTC+14 -> 08:00 June 2nd
        let west = utc(2021, 6, 2, 20); // UTC-12 -> 08:00 June 2nd

        let res = resolve_send_hour(east, &tz("Pacific/Kiritimati"), 8);
        assert!(res.fires);
        assert_eq!(res.local_date, day("2021-6-2"));

        let res = resolve_send_hour(west, &tz("Etc/GMT+12"), 8);
        assert!(res.fires);
        assert_eq!(res.local_date, day("2021-6-2"));

        assert_eq!((west - east).num_hours(), 26);
    }

    #[test]
    fn spring_forward_skips_the_missing_hour() {
        // On 2021-03-14 New York clocks jump from 02:00 to 03:00, so a
        // preferred hour of 2 never occurs on that local date.
        let timezone = tz("America/New_York");
        let mut fired = 0;
        let mut instant = utc(2021, 3, 13, 0);
        while instant < utc(2021, 3, 16, 0) {
            let res = resolve_send_hour(instant, &timezone, 2);
            if res.fires && res.local_date == day("2021-3-14") {
                fired += 1;
            }
            instant = instant + chrono::Duration::hours(1);
        }
        assert_eq!(fired, 0);
    }

    #[test]
    fn spring_forward_still_fires_for_hours_outside_the_gap() {
        let timezone = tz("America/New_York");
        // 12:00 UTC on transition day is 08:00 EDT
        let res = resolve_send_hour(utc(2021, 3, 14, 12), &timezone, 8);
        assert!(res.fires);
        assert_eq!(res.local_date, day("2021-3-14"));
    }

    #[test]
    fn fall_back_maps_two_utc_hours_to_the_repeated_local_hour() {
        // On 2021-11-07 New York repeats the 01:00 wall-clock hour:
        // 05:00 UTC is 01:00 EDT and 06:00 UTC is 01:00 EST.
        let timezone = tz("America/New_York");
        let first = resolve_send_hour(utc(2021, 11, 7, 5), &timezone, 1);
        let second = resolve_send_hour(utc(2021, 11, 7, 6), &timezone, 1);

        assert!(first.fires);
        assert!(second.fires);
        assert_eq!(first.local_date, second.local_date);
        assert_eq!(first.local_date, day("2021-11-7"));
    }

    #[test]
    fn truncates_to_the_top_of_the_hour() {
        let instant = Utc
            .with_ymd_and_hms(2021, 6, 1, 13, 42, 17)
            .single()
            .expect("Valid UTC datetime");
        assert_eq!(truncate_to_hour(instant), utc(2021, 6, 1, 13));
        assert_eq!(truncate_to_hour(utc(2021, 6, 1, 13)), utc(2021, 6, 1, 13));
    }
}
