use crate::domain::lead::{Lead, LeadId};
use crate::error::{LeadsError, Result};
use chrono::NaiveDateTime;
use std::fmt;
use tracing::warn;

/// Closed date interval used to filter leads by creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Creates a range, rejecting an end before the start
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start > end {
            return Err(LeadsError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Inclusive containment check.
    ///
    /// A degenerate range (start == end) matches the whole calendar day
    /// of `start`, so picking one day on both pickers selects that day.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        if self.start == self.end {
            at.date() == self.start.date()
        } else {
            self.start <= at && at <= self.end
        }
    }
}

/// A lead dropped from date filtering because its creation time is unreadable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseWarning {
    pub lead_id: LeadId,
    pub raw: Option<String>,
}

impl fmt::Display for DateParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => write!(f, "invalid date format for lead {}: {:?}", self.lead_id, raw),
            None => write!(f, "missing creation time for lead {}", self.lead_id),
        }
    }
}

/// Board filter state: optional date bounds and a free-text query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub search: String,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// The active date range; the date filter applies only when both bounds are set
    pub fn date_range(&self) -> Option<DateRange> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        }
    }

    /// The query, or `None` when it is blank
    fn search_query(&self) -> Option<&str> {
        if self.search.trim().is_empty() {
            None
        } else {
            Some(&self.search)
        }
    }
}

/// Case-insensitive substring match over all searchable fields of a lead
pub fn matches_search(lead: &Lead, query: &str) -> bool {
    lead.search_text().contains(&query.to_lowercase())
}

/// Applies the date and search predicates, preserving input order.
///
/// Never fails on individual records: leads whose creation time cannot be
/// read are excluded from date-filtered results and reported as warnings.
pub fn apply_filters(leads: &[Lead], criteria: &FilterCriteria) -> (Vec<Lead>, Vec<DateParseWarning>) {
    let mut warnings = Vec::new();
    let range = criteria.date_range();
    let query = criteria.search_query();

    let kept = leads
        .iter()
        .filter(|lead| match range {
            None => true,
            Some(range) => match lead.created_at() {
                Some(at) => range.contains(at),
                None => {
                    let warning = DateParseWarning {
                        lead_id: lead.id.clone(),
                        raw: lead.created_time.clone(),
                    };
                    warn!(lead_id = %lead.id, raw = ?lead.created_time, "invalid date format for lead");
                    warnings.push(warning);
                    false
                }
            },
        })
        .filter(|lead| query.map_or(true, |query| matches_search(lead, query)))
        .cloned()
        .collect();

    (kept, warnings)
}
