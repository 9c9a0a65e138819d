/// All series dates are calendar dates without a time component.
pub type SeriesDate = chrono::NaiveDate;

/// All event timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
