use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

// Month-name forms seen in hand-written frontmatter. %B also accepts the abbreviation.
const NAMED_MONTH_FORMATS: &[&str] = &["%B %d %Y", "%B %d, %Y", "%d %B %Y"];

/// Turns a frontmatter value into a UTC timestamp.
/// Strings are parsed, integers are milliseconds since the epoch, anything else is rejected.
pub fn coerce_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date(s),
        Value::Number(n) => {
            let millis = match n.as_i64() {
                Some(ms) => ms,
                None => n.as_f64().filter(|f| f.is_finite())?.trunc() as i64,
            };
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

pub fn parse_date(buf: &str) -> Option<DateTime<Utc>> {
    let buf = buf.trim();
    if buf.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(buf) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = parse_naive_date_time(buf) {
        return Some(dt.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(buf, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(buf) {
        return Some(dt.with_timezone(&Utc));
    }

    NAMED_MONTH_FORMATS.iter()
        .find_map(|fmt| NaiveDate::parse_from_str(buf, fmt).ok())
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Date and time without an offset, e.g. `2022-04-02 12:05:00.000` or `2022-04-02T12:05`.
/// Read as UTC by the caller.
fn parse_naive_date_time(buf: &str) -> Option<NaiveDateTime> {
    lazy_static! {
        static ref DATE_TIME_REGEX: Regex = Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})[T ](\d{1,2}):(\d{1,2})(?::(\d{1,2})(?:\.(\d{1,9}))?)?$"
        ).unwrap();
    }

    let caps = DATE_TIME_REGEX.captures(buf)?;
    // Missing groups (seconds) count as zero
    let num = |idx: usize| -> Option<u32> {
        caps.get(idx).map_or(Some(0), |m| m.as_str().parse::<u32>().ok())
    };

    let y: i32 = caps.get(1)?.as_str().parse().ok()?;
    let date = NaiveDate::from_ymd_opt(y, num(2)?, num(3)?)?;

    let nanos = match caps.get(7) {
        Some(frac) => format!("{:0<9}", frac.as_str()).parse::<u32>().ok()?,
        None => 0,
    };
    let time = NaiveTime::from_hms_nano_opt(num(4)?, num(5)?, num(6)?, nanos)?;

    Some(NaiveDateTime::new(date, time))
}
