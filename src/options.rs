//! Coercion options.
//!
//! `CoercionOptions` controls how loosely-typed JSON inputs are accepted for
//! numeric, boolean and timestamp fields. One instance is owned by a
//! [`RecordParser`](crate::RecordParser) and shared read-only by every
//! conversion it performs.

/// Toggles for string and timestamp coercion. Everything is off by default.
///
/// # Example
/// ```
/// use avrocast::CoercionOptions;
///
/// let opts = CoercionOptions::new()
///     .with_string_to_number()
///     .with_date_time_format("rfc3339");
///
/// assert!(opts.string_to_number);
/// assert!(!opts.string_to_bool);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoercionOptions {
    /// Accept numeric strings for `int`, `long`, `float` and `double` fields.
    pub string_to_number: bool,

    /// Accept `"true"`/`"false"` strings (trimmed, any case) for `boolean` fields.
    pub string_to_bool: bool,

    /// Read integer timestamps as epoch seconds and rescale them.
    pub timestamp_to_millis: bool,

    /// Same as `timestamp_to_millis`; either flag makes integers epoch seconds.
    pub timestamp_to_micros: bool,

    /// Date-time pattern for timestamp strings that are not numbers.
    ///
    /// Either a chrono strftime pattern (`%Y-%m-%dT%H:%M:%S%#z`) or one of the
    /// aliases `rfc3339` and `rfc2822`. Patterns without an offset are read
    /// as UTC.
    pub date_time_format: Option<String>,

    /// Use the current time for a timestamp field that is null or absent.
    pub now_for_null_timestamp: bool,
}

impl CoercionOptions {
    /// Create options with every coercion disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable string to number coercion.
    pub fn with_string_to_number(mut self) -> Self {
        self.string_to_number = true;
        self
    }

    /// Enable string to boolean coercion.
    pub fn with_string_to_bool(mut self) -> Self {
        self.string_to_bool = true;
        self
    }

    /// Treat integer timestamps as epoch seconds (millisecond target).
    pub fn with_timestamp_to_millis(mut self) -> Self {
        self.timestamp_to_millis = true;
        self
    }

    /// Treat integer timestamps as epoch seconds (microsecond target).
    pub fn with_timestamp_to_micros(mut self) -> Self {
        self.timestamp_to_micros = true;
        self
    }

    /// Parse non-numeric timestamp strings with the given pattern.
    pub fn with_date_time_format(mut self, format: impl Into<String>) -> Self {
        self.date_time_format = Some(format.into());
        self
    }

    /// Substitute the current time for null or missing timestamps.
    pub fn with_now_for_null_timestamp(mut self) -> Self {
        self.now_for_null_timestamp = true;
        self
    }

    /// Whether integer timestamps are epoch seconds.
    pub(crate) fn timestamp_from_seconds(&self) -> bool {
        self.timestamp_to_millis || self.timestamp_to_micros
    }
}
