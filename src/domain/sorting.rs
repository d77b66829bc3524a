use crate::domain::lead::Lead;
use chrono::NaiveDateTime;
use std::cmp::Ordering;

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Sorts leads in-place by creation time.
///
/// The sort is stable: leads with equal timestamps keep their relative
/// order. Leads whose creation time cannot be parsed go last in either
/// direction.
///
/// # Examples
/// ```
/// use leads_board_core::domain::lead::{Lead, LeadStatus};
/// use leads_board_core::domain::sorting::{sort_leads, SortOrder};
///
/// let mut leads = vec![
///     Lead::new(1, "2024-07-01T09:00:00", LeadStatus::New),
///     Lead::new(2, "2024-07-03T09:00:00", LeadStatus::New),
/// ];
///
/// sort_leads(&mut leads, SortOrder::Descending);
/// assert_eq!(leads[0].id.to_string(), "2");
/// ```
pub fn sort_leads(leads: &mut [Lead], order: SortOrder) {
    leads.sort_by(|a, b| compare_created(a.created_at(), b.created_at(), order));
}

/// Compare optional timestamps with `None` always sorting to the end
fn compare_created(
    a: Option<NaiveDateTime>,
    b: Option<NaiveDateTime>,
    order: SortOrder,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Ascending => a.cmp(&b),
            SortOrder::Descending => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lead::{LeadId, LeadStatus};

    fn ids(leads: &[Lead]) -> Vec<LeadId> {
        leads.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_sort_descending() {
        let mut leads = vec![
            Lead::new(1, "2024-07-01T09:00:00", LeadStatus::New),
            Lead::new(2, "2024-07-03T09:00:00", LeadStatus::New),
            Lead::new(3, "2024-07-02T09:00:00", LeadStatus::New),
        ];

        sort_leads(&mut leads, SortOrder::Descending);

        assert_eq!(
            ids(&leads),
            vec![LeadId::Number(2), LeadId::Number(3), LeadId::Number(1)]
        );
    }

    #[test]
    fn test_sort_ascending() {
        let mut leads = vec![
            Lead::new(1, "2024-07-03T09:00:00", LeadStatus::New),
            Lead::new(2, "2024-07-01T09:00:00", LeadStatus::New),
        ];

        sort_leads(&mut leads, SortOrder::Ascending);

        assert_eq!(ids(&leads), vec![LeadId::Number(2), LeadId::Number(1)]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut leads = vec![
            Lead::new(1, "2024-07-01T09:00:00", LeadStatus::New),
            Lead::new(2, "2024-07-05T09:00:00", LeadStatus::New),
            Lead::new(3, "2024-07-01T09:00:00", LeadStatus::New),
            Lead::new(4, "2024-07-01T09:00:00", LeadStatus::New),
        ];

        sort_leads(&mut leads, SortOrder::Descending);

        assert_eq!(
            ids(&leads),
            vec![
                LeadId::Number(2),
                LeadId::Number(1),
                LeadId::Number(3),
                LeadId::Number(4)
            ]
        );
    }

    #[test]
    fn test_unparseable_times_sort_last() {
        let mut leads = vec![
            Lead::new(1, "bad", LeadStatus::New),
            Lead::new(2, "2024-07-01T09:00:00", LeadStatus::New),
            Lead::new(3, "also bad", LeadStatus::New),
        ];

        sort_leads(&mut leads, SortOrder::Descending);
        assert_eq!(ids(&leads), vec![LeadId::Number(2), LeadId::Number(1), LeadId::Number(3)]);

        sort_leads(&mut leads, SortOrder::Ascending);
        assert_eq!(ids(&leads), vec![LeadId::Number(2), LeadId::Number(1), LeadId::Number(3)]);
    }
}
