// linkshelf/src/domain/repositories/query.rs
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Read of the whole bookmark collection, ordered by one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub order_by: String,
    pub direction: SortDirection,
}

impl ListQuery {
    pub fn new(order_by: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            order_by: order_by.into(),
            direction,
        }
    }

    /// Newest first
    pub fn newest_first() -> Self {
        Self::new("created_at", SortDirection::Descending)
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::newest_first()
    }
}

impl fmt::Display for ListQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.order_by, self.direction.as_str())
    }
}
