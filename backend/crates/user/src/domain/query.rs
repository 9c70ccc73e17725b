//! List query and stats value types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Sortable columns. Only these ever reach SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Email,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const fn column(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "email" => Ok(SortField::Email),
            "created_at" => Ok(SortField::CreatedAt),
            "updated_at" => Ok(SortField::UpdatedAt),
            _ => Err("must be one of name, email, created_at, updated_at".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub const fn sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err("must be one of asc, desc".to_string()),
        }
    }
}

/// Validated list parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1..=MAX_LIMIT
    pub limit: i64,
    /// 1-based
    pub page: i64,
    pub sort_by: SortField,
    pub order: SortOrder,
    pub include_deleted: bool,
    /// Substring matched against name or email, case-insensitively
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: 1,
            sort_by: SortField::default(),
            order: SortOrder::default(),
            include_deleted: false,
            search: None,
        }
    }
}

impl ListQuery {
    pub fn offset(&self) -> i64 {
        self.limit.saturating_mul(self.page.saturating_sub(1))
    }

    /// `%term%` with LIKE metacharacters escaped (`ESCAPE '\'`)
    pub fn search_pattern(&self) -> Option<String> {
        let term = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let mut escaped = String::with_capacity(term.len() + 2);
        escaped.push('%');
        for c in term.chars() {
            if matches!(c, '\\' | '%' | '_') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped.push('%');
        Some(escaped)
    }

    /// In-process equivalent of the SQL search predicate
    pub fn matches(&self, name: &str, email: &str) -> bool {
        match self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                name.to_lowercase().contains(&term) || email.to_lowercase().contains(&term)
            }
        }
    }
}

/// User counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: i64,
    pub total_non_deleted_users: i64,
    pub total_deleted_users: i64,
}

impl UserStats {
    pub fn from_counts(total: i64, non_deleted: i64) -> Self {
        Self {
            total_users: total,
            total_non_deleted_users: non_deleted,
            total_deleted_users: total - non_deleted,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
