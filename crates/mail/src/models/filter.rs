//! Filter value threaded from the view layer into email queries

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which mailbox facet a listing shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MailStatus {
    #[default]
    All,
    Inbox,
    Sent,
    Starred,
    Drafts,
    Trash,
}

impl MailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MailStatus::All => "all",
            MailStatus::Inbox => "inbox",
            MailStatus::Sent => "sent",
            MailStatus::Starred => "starred",
            MailStatus::Drafts => "drafts",
            MailStatus::Trash => "trash",
        }
    }
}

impl FromStr for MailStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(MailStatus::All),
            "inbox" => Ok(MailStatus::Inbox),
            "sent" => Ok(MailStatus::Sent),
            "starred" => Ok(MailStatus::Starred),
            "drafts" => Ok(MailStatus::Drafts),
            "trash" => Ok(MailStatus::Trash),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Sent-date range, relative to the moment the query runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SentWithin {
    #[default]
    #[serde(rename = "any_time")]
    AnyTime,
    #[serde(rename = "1_week_ago")]
    WeekAgo,
    #[serde(rename = "1_month_ago")]
    MonthAgo,
    #[serde(rename = "6_month_ago")]
    SixMonthsAgo,
    #[serde(rename = "1_year_ago")]
    YearAgo,
    #[serde(rename = "over_1_year")]
    OverAYear,
}

impl SentWithin {
    /// Wire name used by the stored filter and the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            SentWithin::AnyTime => "any_time",
            SentWithin::WeekAgo => "1_week_ago",
            SentWithin::MonthAgo => "1_month_ago",
            SentWithin::SixMonthsAgo => "6_month_ago",
            SentWithin::YearAgo => "1_year_ago",
            SentWithin::OverAYear => "over_1_year",
        }
    }
}

impl fmt::Display for SentWithin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentWithin {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any_time" => Ok(SentWithin::AnyTime),
            "1_week_ago" => Ok(SentWithin::WeekAgo),
            "1_month_ago" => Ok(SentWithin::MonthAgo),
            "6_month_ago" => Ok(SentWithin::SixMonthsAgo),
            "1_year_ago" => Ok(SentWithin::YearAgo),
            "over_1_year" => Ok(SentWithin::OverAYear),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Error for filter values that don't name a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter value: {0}")]
pub struct UnknownVariant(pub String);

/// Filter applied by `EmailService::query`
///
/// Empty or false fields apply no filtering. In particular `is_read = false`
/// means "any read state", not "unread only".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailFilter {
    pub status: MailStatus,
    pub txt: String,
    #[serde(rename = "isRead")]
    pub is_read: bool,
    pub sent_at: SentWithin,
    /// Carried for the view layer; records have no labels to match against
    pub labels: Vec<String>,
}

impl EmailFilter {
    pub fn with_txt(mut self, txt: impl Into<String>) -> Self {
        self.txt = txt.into();
        self
    }

    pub fn with_read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }

    pub fn with_sent_within(mut self, sent_at: SentWithin) -> Self {
        self.sent_at = sent_at;
        self
    }

    pub fn with_status(mut self, status: MailStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_shape() {
        let json = serde_json::to_value(EmailFilter::default()).unwrap();
        assert_eq!(json["status"], "all");
        assert_eq!(json["txt"], "");
        assert_eq!(json["isRead"], false);
        assert_eq!(json["sent_at"], "any_time");
        assert_eq!(json["labels"], serde_json::json!([]));
    }

    #[test]
    fn test_sent_within_wire_names() {
        for range in [
            SentWithin::AnyTime,
            SentWithin::WeekAgo,
            SentWithin::MonthAgo,
            SentWithin::SixMonthsAgo,
            SentWithin::YearAgo,
            SentWithin::OverAYear,
        ] {
            let json = serde_json::to_value(range).unwrap();
            assert_eq!(json, range.as_str());
            assert_eq!(range.as_str().parse::<SentWithin>().unwrap(), range);
        }
    }

    #[test]
    fn test_unknown_range_rejected() {
        let err = "2_weeks_ago".parse::<SentWithin>().unwrap_err();
        assert_eq!(err.to_string(), "unknown filter value: 2_weeks_ago");
    }

    #[test]
    fn test_partial_filter_deserializes_with_defaults() {
        let filter: EmailFilter = serde_json::from_str(r#"{"txt": "momo"}"#).unwrap();
        assert_eq!(filter.txt, "momo");
        assert_eq!(filter.sent_at, SentWithin::AnyTime);
        assert_eq!(filter.status, MailStatus::All);
        assert!(!filter.is_read);
    }
}
