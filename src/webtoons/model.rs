use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// How far along the reader is with a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum ReadStatus {
    Reading,
    Completed,
    OnHold,
    Dropped,
    PlanToRead,
}

/// Publication state of the webtoon itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum WebtoonStatus {
    Ongoing,
    Completed,
    Hiatus,
    Cancelled,
}

impl ReadStatus {
    /// Parses form input, case-insensitively and ignoring space/`-`/`_`
    /// separators ("plan to read" == "PlanToRead").
    pub fn parse(value: &str) -> Option<Self> {
        match normalize(value).as_str() {
            "reading" => Some(ReadStatus::Reading),
            "completed" => Some(ReadStatus::Completed),
            "onhold" => Some(ReadStatus::OnHold),
            "dropped" => Some(ReadStatus::Dropped),
            "plantoread" => Some(ReadStatus::PlanToRead),
            _ => None,
        }
    }
}

impl WebtoonStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match normalize(value).as_str() {
            "ongoing" => Some(WebtoonStatus::Ongoing),
            "completed" => Some(WebtoonStatus::Completed),
            "hiatus" => Some(WebtoonStatus::Hiatus),
            "cancelled" => Some(WebtoonStatus::Cancelled),
            _ => None,
        }
    }
}

fn normalize(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .to_lowercase()
}

/// One tracked webtoon, durable row or ephemeral session entry alike.
///
/// `user_id` is `Some` for rows owned by a registered user and `None` for
/// entries living only in an anonymous session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WebtoonEntry {
    pub id: i64,
    pub title: String,
    pub chapter: i64,
    pub read_status: ReadStatus,
    pub webtoon_status: WebtoonStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub date_added: OffsetDateTime,
    pub user_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(ReadStatus::parse("reading"), Some(ReadStatus::Reading));
        assert_eq!(ReadStatus::parse("READING"), Some(ReadStatus::Reading));
        assert_eq!(WebtoonStatus::parse("ongoing"), Some(WebtoonStatus::Ongoing));
    }

    #[test]
    fn parse_tolerates_separators() {
        assert_eq!(ReadStatus::parse("on hold"), Some(ReadStatus::OnHold));
        assert_eq!(ReadStatus::parse("plan-to-read"), Some(ReadStatus::PlanToRead));
        assert_eq!(ReadStatus::parse("plan_to_read"), Some(ReadStatus::PlanToRead));
    }

    #[test]
    fn parse_rejects_unknown_and_empty() {
        assert_eq!(ReadStatus::parse("skimming"), None);
        assert_eq!(ReadStatus::parse(""), None);
        assert_eq!(WebtoonStatus::parse("rebooted"), None);
    }

    #[test]
    fn entry_round_trips_through_json() {
        let entry = WebtoonEntry {
            id: 1,
            title: "Tower of God".into(),
            chapter: 10,
            read_status: ReadStatus::Reading,
            webtoon_status: WebtoonStatus::Ongoing,
            date_added: OffsetDateTime::now_utc(),
            user_id: None,
        };

        let json = serde_json::to_string(&entry).unwrap();
        let back: WebtoonEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
