//! Email filtering and navigation
//!
//! Pure functions over an already-loaded collection, so the filter rules can
//! be tested without a store or a clock.

use chrono::{DateTime, Duration, Months, Utc};

use crate::models::{Email, EmailFilter, EmailId, MailStatus, SentWithin};

/// Bound on an email's sent date derived from a `SentWithin` range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentBound {
    /// Sent strictly after the instant
    After(DateTime<Utc>),
    /// Sent strictly before the instant
    Before(DateTime<Utc>),
}

impl SentBound {
    /// Emails without a sent date never satisfy a bound
    pub fn admits(&self, sent_at: Option<DateTime<Utc>>) -> bool {
        match (self, sent_at) {
            (_, None) => false,
            (SentBound::After(cutoff), Some(sent)) => sent > *cutoff,
            (SentBound::Before(cutoff), Some(sent)) => sent < *cutoff,
        }
    }
}

fn months_before(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Translate a range into a bound relative to `now`; `AnyTime` has none
pub fn sent_bound(range: SentWithin, now: DateTime<Utc>) -> Option<SentBound> {
    match range {
        SentWithin::AnyTime => None,
        SentWithin::WeekAgo => Some(SentBound::After(now - Duration::days(7))),
        SentWithin::MonthAgo => Some(SentBound::After(months_before(now, 1))),
        SentWithin::SixMonthsAgo => Some(SentBound::After(months_before(now, 6))),
        SentWithin::YearAgo => Some(SentBound::After(months_before(now, 12))),
        SentWithin::OverAYear => Some(SentBound::Before(months_before(now, 12))),
    }
}

/// Case-insensitive substring match against subject, body, sender or recipient
///
/// `needle` must already be lowercase.
pub fn matches_text(email: &Email, needle: &str) -> bool {
    [&email.subject, &email.body, &email.from, &email.to]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Whether an email belongs to a mailbox facet
pub fn matches_status(email: &Email, status: MailStatus) -> bool {
    match status {
        MailStatus::All => true,
        MailStatus::Inbox => !email.is_removed() && !email.is_sent && !email.is_draft,
        MailStatus::Sent => !email.is_removed() && email.is_sent && !email.is_draft,
        MailStatus::Starred => !email.is_removed() && email.is_starred,
        MailStatus::Drafts => !email.is_removed() && email.is_draft,
        MailStatus::Trash => email.is_removed(),
    }
}

/// Apply a filter to a collection, keeping collection order
///
/// Stages run in a fixed order (text, read state, sent date, status) and
/// each is skipped when its filter field is empty or false.
pub fn filter_emails(mut emails: Vec<Email>, filter: &EmailFilter, now: DateTime<Utc>) -> Vec<Email> {
    if !filter.txt.is_empty() {
        let needle = filter.txt.to_lowercase();
        emails.retain(|email| matches_text(email, &needle));
    }

    if filter.is_read {
        emails.retain(|email| email.is_read == filter.is_read);
    }

    if let Some(bound) = sent_bound(filter.sent_at, now) {
        emails.retain(|email| bound.admits(email.sent_at));
    }

    if filter.status != MailStatus::All {
        emails.retain(|email| matches_status(email, filter.status));
    }

    emails
}

/// Ids of the emails after and before `id`, wrapping at both ends
///
/// An id that isn't in the collection gets the first email as next and the
/// last as previous. Returns `None` for an empty collection.
pub fn neighbors(emails: &[Email], id: &EmailId) -> Option<(Option<EmailId>, Option<EmailId>)> {
    let first = emails.first()?;
    let last = emails.last()?;
    let idx = emails.iter().position(|e| e.id.as_ref() == Some(id));

    let next = idx
        .and_then(|i| emails.get(i + 1))
        .unwrap_or(first);
    let prev = idx
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| emails.get(i))
        .unwrap_or(last);

    Some((next.id.clone(), prev.id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn make_email(id: &str, subject: &str, days_ago: Option<i64>) -> Email {
        Email::builder()
            .id(id)
            .subject(subject)
            .body(format!("Body of {}", subject))
            .from("momo@momo.com")
            .to("user@appsus.com")
            .sent_at(days_ago.map(|d| now() - Duration::days(d)))
            .build()
    }

    fn ids(emails: &[Email]) -> Vec<&str> {
        emails
            .iter()
            .map(|e| e.id.as_ref().map(EmailId::as_str).unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let emails = vec![
            make_email("e1", "One", Some(1)),
            make_email("e2", "Two", None),
        ];
        let result = filter_emails(emails.clone(), &EmailFilter::default(), now());
        assert_eq!(result, emails);
    }

    #[test]
    fn test_text_matches_any_field_case_insensitively() {
        let mut by_to = make_email("e3", "Hello", Some(1));
        by_to.to = "Puki@Example.com".to_string();
        let emails = vec![
            make_email("e1", "Weekly PUKI digest", Some(1)),
            make_email("e2", "Unrelated", Some(1)),
            by_to,
        ];

        let filter = EmailFilter::default().with_txt("puki");
        let result = filter_emails(emails, &filter, now());
        assert_eq!(ids(&result), vec!["e1", "e3"]);
    }

    #[test]
    fn test_text_is_literal_not_a_pattern() {
        let emails = vec![
            make_email("e1", "Price (USD)", Some(1)),
            make_email("e2", "Price USD", Some(1)),
        ];
        let filter = EmailFilter::default().with_txt("(usd)");
        assert_eq!(ids(&filter_emails(emails, &filter, now())), vec!["e1"]);
    }

    #[test]
    fn test_read_filter_only_when_true() {
        let mut read = make_email("e1", "Read", Some(1));
        read.is_read = true;
        let unread = make_email("e2", "Unread", Some(1));
        let emails = vec![read, unread];

        let all = filter_emails(emails.clone(), &EmailFilter::default().with_read(false), now());
        assert_eq!(all.len(), 2);

        let only_read = filter_emails(emails, &EmailFilter::default().with_read(true), now());
        assert_eq!(ids(&only_read), vec!["e1"]);
    }

    #[test]
    fn test_week_range() {
        let emails = vec![
            make_email("recent", "Recent", Some(2)),
            make_email("old", "Old", Some(8)),
            make_email("unsent", "Unsent", None),
        ];
        let filter = EmailFilter::default().with_sent_within(SentWithin::WeekAgo);
        assert_eq!(ids(&filter_emails(emails, &filter, now())), vec!["recent"]);
    }

    #[test]
    fn test_month_and_six_month_ranges() {
        let emails = vec![
            make_email("d10", "Ten days", Some(10)),
            make_email("d40", "Forty days", Some(40)),
            make_email("d200", "Two hundred days", Some(200)),
        ];

        let month = EmailFilter::default().with_sent_within(SentWithin::MonthAgo);
        assert_eq!(ids(&filter_emails(emails.clone(), &month, now())), vec!["d10"]);

        let six = EmailFilter::default().with_sent_within(SentWithin::SixMonthsAgo);
        assert_eq!(ids(&filter_emails(emails, &six, now())), vec!["d10", "d40"]);
    }

    #[test]
    fn test_year_and_over_year_partition() {
        let emails = vec![
            make_email("d100", "Recent", Some(100)),
            make_email("d400", "Old", Some(400)),
            make_email("unsent", "Unsent", None),
        ];

        let year = EmailFilter::default().with_sent_within(SentWithin::YearAgo);
        assert_eq!(ids(&filter_emails(emails.clone(), &year, now())), vec!["d100"]);

        let over = EmailFilter::default().with_sent_within(SentWithin::OverAYear);
        assert_eq!(ids(&filter_emails(emails, &over, now())), vec!["d400"]);
    }

    #[test]
    fn test_month_cutoff_is_calendar_month() {
        let march_31 = Utc.with_ymd_and_hms(2026, 3, 31, 0, 0, 0).unwrap();
        let bound = sent_bound(SentWithin::MonthAgo, march_31).unwrap();
        assert_eq!(
            bound,
            SentBound::After(Utc.with_ymd_and_hms(2026, 2, 28, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_status_facets() {
        let mut sent = make_email("sent", "Sent", Some(1));
        sent.is_sent = true;
        let mut draft = make_email("draft", "Draft", None);
        draft.is_draft = true;
        let mut starred = make_email("starred", "Starred", Some(1));
        starred.is_starred = true;
        let mut trashed = make_email("trashed", "Trashed", Some(1));
        trashed.removed_at = Some(now());
        trashed.is_starred = true;
        let emails = vec![sent, draft, starred, trashed];

        let run = |status| {
            let filter = EmailFilter::default().with_status(status);
            filter_emails(emails.clone(), &filter, now())
                .iter()
                .map(|e| e.id.clone().unwrap().0)
                .collect::<Vec<_>>()
        };

        assert_eq!(run(MailStatus::Inbox), vec!["starred"]);
        assert_eq!(run(MailStatus::Sent), vec!["sent"]);
        assert_eq!(run(MailStatus::Drafts), vec!["draft"]);
        assert_eq!(run(MailStatus::Starred), vec!["starred"]);
        assert_eq!(run(MailStatus::Trash), vec!["trashed"]);
        assert_eq!(run(MailStatus::All).len(), 4);
    }

    #[test]
    fn test_neighbors_wrap() {
        let emails = vec![
            make_email("e1", "One", None),
            make_email("e2", "Two", None),
            make_email("e3", "Three", None),
        ];

        let (next, prev) = neighbors(&emails, &EmailId::new("e1")).unwrap();
        assert_eq!(next, Some(EmailId::new("e2")));
        assert_eq!(prev, Some(EmailId::new("e3")));

        let (next, prev) = neighbors(&emails, &EmailId::new("e3")).unwrap();
        assert_eq!(next, Some(EmailId::new("e1")));
        assert_eq!(prev, Some(EmailId::new("e2")));
    }

    #[test]
    fn test_neighbors_single_and_empty() {
        let single = vec![make_email("e1", "Only", None)];
        let (next, prev) = neighbors(&single, &EmailId::new("e1")).unwrap();
        assert_eq!(next, Some(EmailId::new("e1")));
        assert_eq!(prev, Some(EmailId::new("e1")));

        assert!(neighbors(&[], &EmailId::new("e1")).is_none());
    }

    #[test]
    fn test_neighbors_unknown_id() {
        let emails = vec![make_email("e1", "One", None), make_email("e2", "Two", None)];
        let (next, prev) = neighbors(&emails, &EmailId::new("zz")).unwrap();
        assert_eq!(next, Some(EmailId::new("e1")));
        assert_eq!(prev, Some(EmailId::new("e2")));
    }
}
