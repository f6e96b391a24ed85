use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Inclusive search window sent to `TransactionSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// The full calendar month before `today`, ending at 23:59:59 of its last day.
    pub fn previous_month(today: NaiveDate) -> Self {
        let first_of_month = today.with_day(1).unwrap_or(today);
        let last_of_previous = first_of_month - Duration::days(1);
        let first_of_previous = last_of_previous
            .with_day(1)
            .unwrap_or(last_of_previous);

        Self {
            start: first_of_previous.and_time(NaiveTime::MIN),
            end: last_of_previous.and_time(NaiveTime::MIN)
                + Duration::hours(23)
                + Duration::minutes(59)
                + Duration::seconds(59),
        }
    }

    /// Previous month relative to the local date.
    pub fn previous_month_from_now() -> Self {
        Self::previous_month(Local::now().date_naive())
    }

    pub fn start_param(&self) -> String {
        format_api_timestamp(&self.start)
    }

    pub fn end_param(&self) -> String {
        format_api_timestamp(&self.end)
    }
}

/// ISO-8601 with a literal UTC marker, e.g. `2024-02-01T00:00:00Z`.
pub fn format_api_timestamp(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
