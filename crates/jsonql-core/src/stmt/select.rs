use super::Condition;

/// Read rows of one entity, optionally with related entities joined in.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Entity to read, as named in the request
    pub entity: String,

    /// Fields to project. Empty means every plain column. A field naming a
    /// relationship projects the related entity's columns.
    pub fields: Vec<String>,

    /// Row filter. `None` selects every row.
    pub filter: Option<Condition>,

    pub sort: Vec<Sort>,

    pub page: Page,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub field: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Pagination as sent by the client. Values are normalized by
/// [`Page::limit`] and [`Page::offset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub size: Option<i64>,
    pub number: Option<i64>,
}

impl Select {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            fields: vec![],
            filter: None,
            sort: vec![],
            page: Page::default(),
        }
    }
}

impl Direction {
    /// Parses a direction, case-insensitively. Anything that is not `desc`
    /// sorts ascending.
    pub fn parse(src: &str) -> Direction {
        if src.eq_ignore_ascii_case("desc") {
            Direction::Desc
        } else {
            Direction::Asc
        }
    }
}

impl Page {
    pub const DEFAULT_SIZE: i64 = 10;

    pub fn new(size: i64, number: i64) -> Self {
        Self {
            size: Some(size),
            number: Some(number),
        }
    }

    /// Rows per page. Absent or non-positive sizes fall back to 10.
    pub fn limit(&self) -> i64 {
        match self.size {
            Some(size) if size > 0 => size,
            _ => Self::DEFAULT_SIZE,
        }
    }

    /// One-based page number. Absent or non-positive numbers fall back to 1.
    pub fn number(&self) -> i64 {
        match self.number {
            Some(number) if number > 0 => number,
            _ => 1,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.number() - 1).saturating_mul(self.limit())
    }
}
