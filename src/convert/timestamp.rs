//! Timestamp logical-type resolution.
//!
//! A `long` field annotated `timestamp-millis` or `timestamp-micros` accepts,
//! in order of preference:
//!
//! 1. an integer (or integer string with `string_to_number`), either already in
//!    the field's unit or, with `timestamp_to_millis`/`timestamp_to_micros`,
//!    in epoch seconds;
//! 2. a fractional number of epoch seconds, with the fraction truncated to
//!    the field's resolution (decimal strings are scaled exactly);
//! 3. a date string matching `date_time_format`;
//! 4. null or nothing at all, when `now_for_null_timestamp` is set.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::coerce::decimal_to_scaled;
use super::primitive::{invalid_string, out_of_range};
use super::{mismatch, Converter};
use crate::error::ValueError;
use crate::schema::{Field, LogicalType};
use crate::value::AvroValue;

/// Resolution of the field's logical type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeUnit {
    Millis,
    Micros,
}

impl TimeUnit {
    fn of(field: &Field) -> Self {
        match field.logical_type {
            Some(LogicalType::TimestampMicros) => TimeUnit::Micros,
            _ => TimeUnit::Millis,
        }
    }

    fn per_second(self) -> i64 {
        match self {
            TimeUnit::Millis => 1_000,
            TimeUnit::Micros => 1_000_000,
        }
    }

    /// Decimal places of a second this unit resolves.
    fn places(self) -> u32 {
        match self {
            TimeUnit::Millis => 3,
            TimeUnit::Micros => 6,
        }
    }

    fn name(self) -> &'static str {
        match self {
            TimeUnit::Millis => "timestamp-millis",
            TimeUnit::Micros => "timestamp-micros",
        }
    }

    fn value(self, ticks: i64) -> AvroValue {
        match self {
            TimeUnit::Millis => AvroValue::TimestampMillis(ticks),
            TimeUnit::Micros => AvroValue::TimestampMicros(ticks),
        }
    }

    fn seconds_to_value(self, seconds: i64) -> Option<AvroValue> {
        seconds.checked_mul(self.per_second()).map(|t| self.value(t))
    }

    /// Whole seconds plus the fraction truncated to this unit.
    fn fractional_seconds_to_value(self, seconds: f64) -> Option<AvroValue> {
        if !seconds.is_finite() {
            return None;
        }
        let whole = seconds.trunc();
        if !(i64::MIN as f64..i64::MAX as f64).contains(&whole) {
            return None;
        }
        let sub = (seconds.fract() * self.per_second() as f64) as i64;
        (whole as i64)
            .checked_mul(self.per_second())
            .and_then(|t| t.checked_add(sub))
            .map(|t| self.value(t))
    }

    fn datetime_to_value(self, dt: DateTime<Utc>) -> AvroValue {
        match self {
            TimeUnit::Millis => self.value(dt.timestamp_millis()),
            TimeUnit::Micros => self.value(dt.timestamp_micros()),
        }
    }
}

impl Converter<'_> {
    pub(crate) fn convert_timestamp_field(
        &self,
        field: &Field,
        object: &Map<String, Value>,
    ) -> Result<AvroValue, ValueError> {
        let unit = TimeUnit::of(field);

        let value = match object.get(&field.name) {
            Some(value) => Some(value),
            None => {
                if field.default.is_some() {
                    trace!(field = %field.name, "Using default value");
                }
                field.default.as_ref()
            }
        };

        match value {
            None | Some(Value::Null) => self.null_timestamp(field, unit, value.is_none()),
            Some(value) => self.convert_timestamp_value(field, unit, value),
        }
    }

    fn null_timestamp(
        &self,
        field: &Field,
        unit: TimeUnit,
        absent: bool,
    ) -> Result<AvroValue, ValueError> {
        if self.options.now_for_null_timestamp {
            debug!(field = %field.name, "Substituting current time for null timestamp");
            return Ok(unit.datetime_to_value(Utc::now()));
        }
        if absent {
            Err(ValueError::MissingValue {
                field: field.name.clone(),
            })
        } else {
            Err(ValueError::UnexpectedNull {
                field: field.name.clone(),
            })
        }
    }

    fn convert_timestamp_value(
        &self,
        field: &Field,
        unit: TimeUnit,
        value: &Value,
    ) -> Result<AvroValue, ValueError> {
        if let Ok(integer) = self.convert_long(field, value) {
            return if self.options.timestamp_from_seconds() {
                unit.seconds_to_value(integer)
                    .ok_or_else(|| out_of_range(field, value, unit.name()))
            } else {
                Ok(unit.value(integer))
            };
        }

        if let Value::String(s) = value {
            if self.options.string_to_number {
                if let Some(ticks) = decimal_to_scaled(s, unit.places()) {
                    return Ok(unit.value(ticks));
                }
            }
        }

        // Exponent notation and JSON numbers beyond `i64`.
        if let Ok(seconds) = self.convert_double(field, value) {
            return unit
                .fractional_seconds_to_value(seconds)
                .ok_or_else(|| out_of_range(field, value, unit.name()));
        }

        if let (Some(format), Value::String(s)) = (&self.options.date_time_format, value) {
            let dt = parse_date_time(s, format).ok_or_else(|| ValueError::InvalidDateTime {
                field: field.name.clone(),
                value: s.clone(),
                format: format.clone(),
            })?;
            return Ok(unit.datetime_to_value(dt));
        }

        Err(match value {
            Value::String(s) if self.options.string_to_number => {
                invalid_string(field, s, unit.name())
            }
            other => mismatch(field, "long", other),
        })
    }
}

/// Parse `s` with a strftime pattern or one of the `rfc3339`/`rfc2822` aliases.
///
/// Patterns without an offset are read as UTC; date-only patterns as UTC
/// midnight.
fn parse_date_time(s: &str, format: &str) -> Option<DateTime<Utc>> {
    if format.eq_ignore_ascii_case("rfc3339") {
        return DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
    }
    if format.eq_ignore_ascii_case("rfc2822") {
        return DateTime::parse_from_rfc2822(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
    }

    DateTime::parse_from_str(s, format)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(s, format).map(|dt| dt.and_utc()))
        .or_else(|_| {
            NaiveDate::parse_from_str(s, format).map(|d| d.and_time(NaiveTime::MIN).and_utc())
        })
        .ok()
}
