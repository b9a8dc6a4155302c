//! Plain-text rendering of emails for the terminal

use chrono::{DateTime, Local, Utc};
use mail::{Email, EmailId, NavigableEmail};

const SUBJECT_WIDTH: usize = 40;

fn flag(on: bool, symbol: char) -> char {
    if on { symbol } else { ' ' }
}

fn format_date(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn id_str(id: Option<&EmailId>) -> &str {
    id.map(EmailId::as_str).unwrap_or("-")
}

/// One-line summary: id, flags, date, sender, subject
pub fn row(email: &Email) -> String {
    format!(
        "{:<10} {}{}{}{} {:<16} {:<24} {}",
        id_str(email.id.as_ref()),
        flag(!email.is_read, '•'),
        flag(email.is_starred, '★'),
        flag(email.is_marked, '!'),
        flag(email.is_removed(), '🗑'),
        format_date(email.sent_at),
        truncate(&email.from, 24),
        truncate(&email.subject, SUBJECT_WIDTH),
    )
}

/// A table of emails, one row each, followed by a count
pub fn table(emails: &[Email]) -> String {
    let mut out: String = emails.iter().map(|email| row(email) + "\n").collect();
    out.push_str(&format!("{} email(s)\n", emails.len()));
    out
}

/// Full view of a single email with navigation links
pub fn detail(nav: &NavigableEmail) -> String {
    let email = &nav.email;
    format!(
        "From:    {}\nTo:      {}\nDate:    {}\nSubject: {}\n\n{}\n\nprev: {}  next: {}\n",
        email.from,
        email.to,
        format_date(email.sent_at),
        email.subject,
        email.body,
        id_str(nav.prev_email_id.as_ref()),
        id_str(nav.next_email_id.as_ref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_email() -> Email {
        Email::builder()
            .id("e101")
            .subject("Miss you!")
            .body("Would love to catch up sometimes")
            .from("momo@momo.com")
            .to("user@appsus.com")
            .starred(true)
            .build()
    }

    #[test]
    fn test_row_contains_fields_and_flags() {
        let line = row(&make_email());
        assert!(line.starts_with("e101"));
        assert!(line.contains('★'));
        assert!(line.contains('•'));
        assert!(line.contains("momo@momo.com"));
        assert!(line.contains("Miss you!"));
        assert!(line.contains(" - "));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_table_counts() {
        let emails = vec![make_email(), make_email()];
        let out = table(&emails);
        assert_eq!(out.lines().count(), 3);
        assert!(out.ends_with("2 email(s)\n"));
    }

    #[test]
    fn test_detail_shows_navigation() {
        let nav = NavigableEmail {
            email: make_email(),
            next_email_id: Some(EmailId::new("e102")),
            prev_email_id: None,
        };
        let out = detail(&nav);
        assert!(out.contains("Subject: Miss you!"));
        assert!(out.contains("prev: -  next: e102"));
    }

    #[test]
    fn test_table_empty() {
        assert_eq!(table(&[]), "0 email(s)\n");
    }

    #[test]
    fn test_detail_layout() {
        let nav = NavigableEmail {
            email: make_email(),
            next_email_id: None,
            prev_email_id: Some(EmailId::new("e110")),
        };
        let out = detail(&nav);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "From:    momo@momo.com");
        assert_eq!(lines[1], "To:      user@appsus.com");
        assert!(lines[2].starts_with("Date:    "));
        assert_eq!(lines[3], "Subject: Miss you!");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Would love to catch up sometimes");
        assert_eq!(lines[6], "");
        assert_eq!(lines[7], "prev: e110  next: -");
        assert!(out.ends_with('\n'));
    }
}
