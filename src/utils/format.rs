use chrono::{Datelike, NaiveDate};
use serde::{self, Deserialize, Deserializer, Serializer, de::Error};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// Serde adapter for required `YYYY-MM-DD` dates
pub mod date {
    use super::*;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_date(&s).map_err(Error::custom)
    }
}

/// Serde adapter for optional dates; an empty string reads as `None`
pub mod option_date {
    use super::*;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(value) => serializer.serialize_str(&value.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if s.trim().is_empty() {
            Ok(None)
        } else {
            parse_date(&s).map(Some).map_err(Error::custom)
        }
    }
}

/// Accept averages stored either as numbers or as fixed-point strings ("50.00")
pub fn deserialize_average<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Average {
        Number(f64),
        Text(String),
    }

    match Average::deserialize(deserializer)? {
        Average::Number(n) => Ok(n),
        Average::Text(s) => s.trim().parse::<f64>().map_err(Error::custom),
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| format!("invalid date '{}': expected YYYY-MM-DD ({})", raw.trim(), e))
}

/// Human-facing date, e.g. `Jan 15, 2023`
pub fn format_date(date: Option<&NaiveDate>) -> String {
    match date {
        Some(d) => d.format(DISPLAY_FORMAT).to_string(),
        None => "N/A".to_string(),
    }
}

/// Whole years between `birthday` and `today`
pub fn calculate_age(birthday: &NaiveDate, today: &NaiveDate) -> i32 {
    let mut age = today.year() - birthday.year();
    if (today.month(), today.day()) < (birthday.month(), birthday.day()) {
        age -= 1;
    }
    age
}

/// Coerce a raw term score the way a browser's `parseFloat(x) || 0` does:
/// the longest numeric prefix wins, anything else is 0.
pub fn parse_score(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let mut best = 0.0;

    for (idx, ch) in trimmed.char_indices() {
        let end = idx + ch.len_utf8();
        if let Ok(value) = trimmed[..end].parse::<f64>()
            && value.is_finite()
        {
            best = value;
        }
    }

    // -0.0 reads as 0
    if best == 0.0 { 0.0 } else { best }
}

/// Round to `places` decimals in a single step on the exact stored value.
/// Half-way cases move away from zero, as fixed-point display does.
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let places = places.clamp(0, 20) as usize;

    // every finite f64 has an exact expansion within 1074 decimals
    let exact = format!("{:.1074}", value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let round_up = fraction.as_bytes().get(places).is_some_and(|d| *d >= b'5');

    let mut digits: Vec<u8> = whole.bytes().chain(fraction.bytes().take(places)).collect();
    let mut whole_len = whole.len();
    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
            whole_len += 1;
        }
    }

    let (int_part, frac_part) = digits.split_at(whole_len);
    let text = format!(
        "{}.{}0",
        String::from_utf8_lossy(int_part),
        String::from_utf8_lossy(frac_part)
    );
    let magnitude = text.parse::<f64>().unwrap_or(value.abs());

    if magnitude == 0.0 {
        0.0
    } else {
        magnitude.copysign(value)
    }
}

/// Format a number with two fixed decimals, as averages are displayed
pub fn format_fixed(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a term score without a trailing `.0` for whole numbers
pub fn format_score(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
