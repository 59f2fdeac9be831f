//! Unix timestamp <-> date-time conversion.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use toolbox_core::{parse_tool_args, Tool, ToolError, ToolResult};

/// Values at or above this are read as milliseconds in `auto` mode
/// (10^11 seconds is roughly the year 5138).
const AUTO_MILLIS_THRESHOLD: u64 = 100_000_000_000;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("'{0}' is not a valid integer timestamp")]
    InvalidTimestamp(String),
    #[error("Timestamp {0} is out of the supported range")]
    OutOfRange(i64),
    #[error("Unrecognized date '{0}'. Use RFC 3339, YYYY-MM-DD HH:MM:SS or YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid UTC offset '{0}'. Use +08:00, -05:30 or Z")]
    InvalidOffset(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampUnit {
    #[default]
    Auto,
    Seconds,
    Milliseconds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampAction {
    #[default]
    ToDatetime,
    ToTimestamp,
    Now,
}

fn default_offset() -> String {
    "+00:00".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampArgs {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub action: TimestampAction,
    #[serde(default)]
    pub unit: TimestampUnit,
    #[serde(default = "default_offset")]
    pub offset: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampConversion {
    pub seconds: i64,
    pub milliseconds: i64,
    pub iso_utc: String,
    pub local: String,
    pub offset: String,
}

impl TimestampConversion {
    fn from_datetime(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        let local = instant.with_timezone(&offset);
        Self {
            seconds: instant.timestamp(),
            milliseconds: instant.timestamp_millis(),
            iso_utc: instant.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            local: local.format(DISPLAY_FORMAT).to_string(),
            offset: offset.to_string(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "Seconds: {}\nMilliseconds: {}\nISO 8601 (UTC): {}\nLocal ({}): {}",
            self.seconds, self.milliseconds, self.iso_utc, self.offset, self.local
        )
    }
}

/// Parse `+08:00`, `-0530`, `+8`, `Z` or `UTC`.
pub fn parse_offset(raw: &str) -> Result<FixedOffset, TimestampError> {
    let invalid = || TimestampError::InvalidOffset(raw.to_string());
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc")
    {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match trimmed.as_bytes()[0] {
        b'+' => (1, &trimmed[1..]),
        b'-' => (-1, &trimmed[1..]),
        _ => return Err(invalid()),
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 && rest.is_ascii() => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours = offset_part(hours).ok_or_else(invalid)?;
    let minutes = offset_part(minutes).ok_or_else(invalid)?;
    if hours > 14 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// One or two bare digits; signs are only allowed in front of the offset.
fn offset_part(part: &str) -> Option<i32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

pub fn to_datetime(
    value: &str,
    unit: TimestampUnit,
    offset: FixedOffset,
) -> Result<TimestampConversion, TimestampError> {
    let raw: i64 = value
        .trim()
        .parse()
        .map_err(|_| TimestampError::InvalidTimestamp(value.trim().to_string()))?;

    let millis = match unit {
        TimestampUnit::Seconds => raw.checked_mul(1000),
        TimestampUnit::Milliseconds => Some(raw),
        TimestampUnit::Auto if raw.unsigned_abs() >= AUTO_MILLIS_THRESHOLD => Some(raw),
        TimestampUnit::Auto => raw.checked_mul(1000),
    }
    .ok_or(TimestampError::OutOfRange(raw))?;

    let instant = Utc
        .timestamp_millis_opt(millis)
        .single()
        .ok_or(TimestampError::OutOfRange(raw))?;
    Ok(TimestampConversion::from_datetime(instant, offset))
}

/// Parse a date. Inputs without an explicit offset are read at `offset`.
pub fn to_timestamp(
    value: &str,
    offset: FixedOffset,
) -> Result<TimestampConversion, TimestampError> {
    let trimmed = value.trim();
    let invalid = || TimestampError::InvalidDate(trimmed.to_string());

    let instant = if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        parsed.with_timezone(&Utc)
    } else {
        let naive = NaiveDateTime::parse_from_str(trimmed, DISPLAY_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
            .or_else(|_| {
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .map(|date| date.and_hms_opt(0, 0, 0).unwrap_or_default())
            })
            .map_err(|_| invalid())?;
        offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(invalid)?
            .with_timezone(&Utc)
    };

    Ok(TimestampConversion::from_datetime(instant, offset))
}

pub fn now(offset: FixedOffset) -> TimestampConversion {
    TimestampConversion::from_datetime(Utc::now(), offset)
}

pub struct TimestampTool;

impl TimestampTool {
    pub fn new() -> Self {
        Self
    }

    pub fn run(args: &TimestampArgs) -> Result<TimestampConversion, TimestampError> {
        let offset = parse_offset(&args.offset)?;
        match args.action {
            TimestampAction::ToDatetime => to_datetime(&args.value, args.unit, offset),
            TimestampAction::ToTimestamp => to_timestamp(&args.value, offset),
            TimestampAction::Now => Ok(now(offset)),
        }
    }
}

impl Default for TimestampTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for TimestampTool {
    fn name(&self) -> &str {
        "timestamp"
    }

    fn description(&self) -> &str {
        "Convert Unix timestamps (seconds or milliseconds) to dates and back."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "value": {
                    "type": "string",
                    "description": "A Unix timestamp, or a date such as 2024-01-01 08:00:00"
                },
                "action": {
                    "type": "string",
                    "enum": ["to_datetime", "to_timestamp", "now"],
                    "default": "to_datetime"
                },
                "unit": {
                    "type": "string",
                    "enum": ["auto", "seconds", "milliseconds"],
                    "default": "auto"
                },
                "offset": {
                    "type": "string",
                    "default": "+00:00",
                    "description": "UTC offset used for display and for dates without an offset"
                }
            }
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: TimestampArgs = parse_tool_args(args)?;
        Ok(ToolResult::from_outcome(
            Self::run(&args).map(|conversion| conversion.render()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn seconds_to_datetime() {
        let conversion = to_datetime("1700000000", TimestampUnit::Auto, utc()).unwrap();
        assert_eq!(conversion.iso_utc, "2023-11-14T22:13:20.000Z");
        assert_eq!(conversion.local, "2023-11-14 22:13:20");
        assert_eq!(conversion.milliseconds, 1_700_000_000_000);
    }

    #[test]
    fn auto_detects_milliseconds() {
        let conversion = to_datetime("1700000000123", TimestampUnit::Auto, utc()).unwrap();
        assert_eq!(conversion.seconds, 1_700_000_000);
        assert_eq!(conversion.iso_utc, "2023-11-14T22:13:20.123Z");

        let forced = to_datetime("1700000000", TimestampUnit::Milliseconds, utc()).unwrap();
        assert_eq!(forced.seconds, 1_700_000);
    }

    #[test]
    fn local_rendering_uses_offset() {
        let beijing = parse_offset("+08:00").unwrap();
        let conversion = to_datetime("0", TimestampUnit::Seconds, beijing).unwrap();
        assert_eq!(conversion.local, "1970-01-01 08:00:00");
        assert_eq!(conversion.offset, "+08:00");
    }

    #[test]
    fn date_to_timestamp_at_offset() {
        let beijing = parse_offset("+0800").unwrap();
        let conversion = to_timestamp("1970-01-01 08:00:00", beijing).unwrap();
        assert_eq!(conversion.seconds, 0);

        let rfc = to_timestamp("2023-11-14T22:13:20Z", beijing).unwrap();
        assert_eq!(rfc.seconds, 1_700_000_000);

        let date_only = to_timestamp("2024-01-01", utc()).unwrap();
        assert_eq!(date_only.seconds, 1_704_067_200);
    }

    #[test]
    fn round_trip_through_local_rendering() {
        let offset = parse_offset("-05:30").unwrap();
        let forward = to_datetime("1234567890", TimestampUnit::Seconds, offset).unwrap();
        let back = to_timestamp(&forward.local, offset).unwrap();
        assert_eq!(back.seconds, 1_234_567_890);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            to_datetime("12ab", TimestampUnit::Auto, utc()),
            Err(TimestampError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            to_datetime(&i64::MAX.to_string(), TimestampUnit::Seconds, utc()),
            Err(TimestampError::OutOfRange(_))
        ));
        assert!(matches!(
            to_timestamp("yesterday", utc()),
            Err(TimestampError::InvalidDate(_))
        ));
        assert!(parse_offset("08:00").is_err());
        assert!(parse_offset("+25:00").is_err());
        assert!(parse_offset("+-5").is_err());
        assert!(parse_offset("-+5").is_err());
        assert!(parse_offset("+05:-30").is_err());
        assert!(parse_offset("+05:+30").is_err());
        assert!(parse_offset("+").is_err());
        assert_eq!(
            parse_offset("+8").unwrap(),
            FixedOffset::east_opt(8 * 3600).unwrap()
        );
        assert_eq!(parse_offset("Z").unwrap(), utc());
    }

    #[tokio::test]
    async fn execute_now_succeeds() {
        let result = TimestampTool::new()
            .execute(json!({"action": "now", "offset": "+08:00"}))
            .await
            .unwrap();
        assert!(result.success);
        assert!(result.result.contains("Local (+08:00)"));
    }
}
