use crate::error::{Error, Result};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

pub const FIELD_DELIMITER: char = '|';

const FIELD_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub timestamp: String,
    pub author: String,
    pub message: String,
}

impl CommitRecord {
    pub fn new(
        id: impl Into<String>,
        timestamp: impl Into<String>,
        author: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: timestamp.into(),
            author: author.into(),
            message: message.into(),
        }
    }

    pub fn to_log_line(&self) -> String {
        [
            self.id.as_str(),
            self.timestamp.as_str(),
            self.author.as_str(),
            self.message.as_str(),
        ]
        .join("|")
    }

    // Anything after the third delimiter belongs to the message.
    pub fn from_log_line(line: &str) -> Self {
        let mut parts = line.splitn(FIELD_COUNT, FIELD_DELIMITER);
        let mut next = || parts.next().unwrap_or_default().to_string();

        Self {
            id: next(),
            timestamp: next(),
            author: next(),
            message: next(),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.sequence().is_some() && !self.timestamp.is_empty() && !self.author.is_empty()
    }

    pub fn sequence(&self) -> Option<u128> {
        self.id.parse().ok()
    }
}

pub fn validate_field(field: &'static str, value: &str) -> Result<()> {
    if value.contains(FIELD_DELIMITER) {
        return Err(Error::InvalidField {
            field,
            reason: format!("must not contain '{}'", FIELD_DELIMITER),
        });
    }
    if value.contains(['\n', '\r']) {
        return Err(Error::InvalidField {
            field,
            reason: "must not contain line breaks".to_string(),
        });
    }
    Ok(())
}

pub fn next_commit_id(now: DateTime<Utc>, previous: Option<u128>) -> Result<u128> {
    let nanos = now
        .timestamp_nanos_opt()
        .ok_or_else(|| Error::Clock(format!("{} is outside the commit id range", now)))?;
    let nanos = u128::try_from(nanos)
        .map_err(|_| Error::Clock(format!("{} predates the Unix epoch", now)))?;

    match previous {
        Some(prev) if prev >= nanos => prev
            .checked_add(1)
            .ok_or_else(|| Error::Clock(format!("commit id {} cannot be advanced", prev))),
        _ => Ok(nanos),
    }
}

pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&Local)
        .format("%a %b %e %H:%M:%S %Y")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_log_line_round_trip() {
        let record = CommitRecord::new(
            "1700000000000000000",
            "Tue Nov 14 22:13:20 2023",
            "alice",
            "first commit",
        );
        let line = record.to_log_line();

        assert_eq!(
            line,
            "1700000000000000000|Tue Nov 14 22:13:20 2023|alice|first commit"
        );
        assert_eq!(CommitRecord::from_log_line(&line), record);
    }

    #[test]
    fn test_short_line_yields_empty_fields() {
        let record = CommitRecord::from_log_line("12345|Mon Jan  1 00:00:00 2024");

        assert_eq!(record.id, "12345");
        assert_eq!(record.timestamp, "Mon Jan  1 00:00:00 2024");
        assert!(record.author.is_empty());
        assert!(record.message.is_empty());
        assert!(!record.is_well_formed());

        let garbage = CommitRecord::from_log_line("garbage");
        assert_eq!(garbage.id, "garbage");
        assert!(!garbage.is_well_formed());
    }

    #[test]
    fn test_extra_delimiters_stay_in_message() {
        let record = CommitRecord::from_log_line("1|ts|bob|fix a|b parsing");
        assert_eq!(record.message, "fix a|b parsing");
        assert_eq!(record.to_log_line(), "1|ts|bob|fix a|b parsing");
    }

    #[test]
    fn test_validate_field() {
        assert!(validate_field("author", "alice").is_ok());
        assert!(validate_field("message", "").is_ok());
        assert!(matches!(
            validate_field("message", "a|b"),
            Err(Error::InvalidField { field: "message", .. })
        ));
        assert!(validate_field("author", "line\nbreak").is_err());
    }

    #[test]
    fn test_next_commit_id_is_monotonic() {
        let now = Utc.timestamp_opt(1_700_000_000, 5).unwrap();
        let first = next_commit_id(now, None).unwrap();
        assert_eq!(first, 1_700_000_000_000_000_005);

        let second = next_commit_id(now, Some(first)).unwrap();
        assert_eq!(second, first + 1);

        let later = Utc.timestamp_opt(1_700_000_001, 0).unwrap();
        assert_eq!(
            next_commit_id(later, Some(second)).unwrap(),
            1_700_000_001_000_000_000
        );
    }

    #[test]
    fn test_exhausted_commit_id_is_an_error() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert!(matches!(
            next_commit_id(now, Some(u128::MAX)),
            Err(Error::Clock(_))
        ));
    }

    #[test]
    fn test_pre_epoch_clock_is_rejected() {
        let before = Utc.timestamp_opt(-10, 0).unwrap();
        assert!(matches!(next_commit_id(before, None), Err(Error::Clock(_))));
    }

    #[test]
    fn test_format_timestamp_has_no_newline() {
        let stamp = format_timestamp(Utc::now());
        assert!(!stamp.contains('\n'));
        assert!(validate_field("timestamp", &stamp).is_ok());
    }
}
