use crate::domain::task::{Priority, Task};
use crate::error::TedaError;
use std::fmt;
use std::str::FromStr;

/// Priority filter selected in the toolbar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl FromStr for PriorityFilter {
    type Err = TedaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(PriorityFilter::All),
            other => other
                .parse::<Priority>()
                .map(PriorityFilter::Only)
                .map_err(|_| TedaError::InvalidPriorityFilter(s.to_string())),
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(p) => write!(f, "{p}"),
        }
    }
}

/// Search text plus priority filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub search: String,
    pub priority: PriorityFilter,
}

impl Filters {
    pub fn new(search: impl Into<String>, priority: PriorityFilter) -> Self {
        Self {
            search: search.into(),
            priority,
        }
    }

    /// A task is visible when it matches the search (or search is empty)
    /// and the priority filter (or the filter is `all`).
    pub fn matches(&self, task: &Task) -> bool {
        let search_ok = self.search.is_empty() || task.matches_search(&self.search);
        let priority_ok = match self.priority {
            PriorityFilter::All => true,
            PriorityFilter::Only(p) => task.priority == p,
        };
        search_ok && priority_ok
    }
}
