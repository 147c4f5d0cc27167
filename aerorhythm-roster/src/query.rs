use aerorhythm_core::{types, validation};
use chrono::{DateTime, Utc};
use sea_orm::QuerySelect;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: u64 = 100;

const UNBOUNDED_LIMIT: u64 = i64::MAX as u64;

/// Offset pagination. Every `list` applies it after a total ordering, so pages never overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Page {
    pub skip: u64,
    pub limit: Option<u64>,
}

impl Page {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: Some(limit),
        }
    }

    pub fn all() -> Self {
        Self {
            skip: 0,
            limit: None,
        }
    }

    pub(crate) fn apply<S: QuerySelect>(self, select: S) -> S {
        // SQLite and MySQL reject an OFFSET without a LIMIT
        match (self.skip, self.limit) {
            (0, None) => select,
            (skip, None) => select.offset(skip).limit(UNBOUNDED_LIMIT),
            (skip, Some(limit)) => select.offset(skip).limit(limit),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_LIMIT)
    }
}

/// Time range used by list filters and by roster generation. Either bound may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Window {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Window {
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> types::Result<()> {
        if let (Some(start), Some(end)) = (&self.start, &self.end) {
            validation::require_ordered("Window", "start", start, "end", end)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerorhythm_persistence::crew;
    use chrono::TimeZone;
    use sea_orm::{DbBackend, EntityTrait, QueryTrait};

    #[test]
    fn inverted_window_is_invalid() {
        let start = Utc.with_ymd_and_hms(2025, 7, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();

        assert!(Window::between(start, end).validate().is_err());
        assert!(Window::between(end, start).validate().is_ok());
        assert!(Window::unbounded().validate().is_ok());
    }

    fn page_sql(page: Page) -> String {
        page.apply(crew::Entity::find())
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn unbounded_page_never_emits_a_bare_offset() {
        let sql = page_sql(Page::all());
        assert!(!sql.contains("OFFSET"));
        assert!(!sql.contains("LIMIT"));

        let sql = page_sql(Page {
            skip: 2,
            limit: None,
        });
        assert!(sql.contains(&format!("LIMIT {} OFFSET 2", i64::MAX)));

        let sql = page_sql(Page::new(4, 2));
        assert!(sql.contains("LIMIT 2 OFFSET 4"));
    }

    #[test]
    fn default_page_is_bounded() {
        assert_eq!(Page::default().limit, Some(DEFAULT_PAGE_LIMIT));
        assert_eq!(Page::all().limit, None);
    }
}
