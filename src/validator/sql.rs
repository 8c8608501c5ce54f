//! Lexical guard for dropdown queries.
//!
//! This is a superficial check only: the text must start with `SELECT` and
//! must not contain a forbidden keyword anywhere, matched as a plain
//! substring of the uppercased query. A column named `update_count` is
//! therefore rejected too. Real protection belongs to whatever executes the
//! query.

use crate::schema::FORBIDDEN_SQL_KEYWORDS;

#[derive(Debug, Clone)]
pub(crate) struct SqlGuard {
    keywords: Vec<String>,
}

impl SqlGuard {
    pub(crate) fn new(extra: &[String]) -> Self {
        let mut keywords: Vec<String> = FORBIDDEN_SQL_KEYWORDS
            .iter()
            .map(|k| k.to_string())
            .collect();
        for keyword in extra {
            let keyword = keyword.trim().to_uppercase();
            if !keyword.is_empty() && !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }
        Self { keywords }
    }

    pub(crate) fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Whether the query reads as a `SELECT` statement.
    pub(crate) fn is_select(query: &str) -> bool {
        query.trim().to_uppercase().starts_with("SELECT")
    }

    /// Forbidden keywords found in the query, in list order.
    pub(crate) fn forbidden_in<'a>(&'a self, query: &str) -> Vec<&'a str> {
        let upper = query.trim().to_uppercase();
        self.keywords
            .iter()
            .filter(|k| upper.contains(k.as_str()))
            .map(String::as_str)
            .collect()
    }
}

impl Default for SqlGuard {
    fn default() -> Self {
        Self::new(&[])
    }
}
