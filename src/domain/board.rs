use crate::domain::filter::{apply_filters, DateParseWarning, FilterCriteria};
use crate::domain::lead::{Lead, LeadId, LeadStatus};
use crate::domain::sorting::{sort_leads, SortOrder};
use crate::error::{LeadsError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a board column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    pub title: String,
    pub status: LeadStatus,
}

impl Column {
    pub fn new(title: impl Into<String>, status: LeadStatus) -> Self {
        Self {
            key: status.column_key().to_string(),
            title: title.into(),
            status,
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Leads".to_string(),
            columns: vec![
                Column::new("Leads", LeadStatus::New),
                Column::new("Discussion", LeadStatus::Discussion),
                Column::new("Decision Maker", LeadStatus::DecisionMaker),
                Column::new("Contract Discussion", LeadStatus::ContractDiscussion),
            ],
        }
    }
}

impl BoardConfig {
    /// Gets the column configuration for a status
    pub fn get_column_for_status(&self, status: LeadStatus) -> Option<&Column> {
        self.columns.iter().find(|col| col.status == status)
    }
}

/// Request to persist a lead's new status on the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChangeCommand {
    pub lead_id: LeadId,
    pub new_status: LeadStatus,
}

/// Leads grouped into one ordered bucket per status.
///
/// Always holds all four statuses; a status without leads has an empty bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketCollection {
    buckets: [Vec<Lead>; 4],
}

impl BucketCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leads in the bucket for `status`, in display order
    pub fn get(&self, status: LeadStatus) -> &[Lead] {
        &self.buckets[status.index()]
    }

    /// Iterates buckets in column order
    pub fn iter(&self) -> impl Iterator<Item = (LeadStatus, &[Lead])> + '_ {
        LeadStatus::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }

    /// Number of leads across all buckets
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Finds the bucket and position of a lead
    pub fn position_of(&self, id: &LeadId) -> Option<(LeadStatus, usize)> {
        self.iter().find_map(|(status, leads)| {
            leads
                .iter()
                .position(|lead| &lead.id == id)
                .map(|index| (status, index))
        })
    }

    /// Moves a lead between buckets in place.
    ///
    /// A move within one bucket is ignored. The source index must exist;
    /// the target index is clamped to the target bucket's length. The moved
    /// lead's status is rewritten to the target status.
    pub fn apply_move(
        &mut self,
        from: LeadStatus,
        from_index: usize,
        to: LeadStatus,
        to_index: usize,
    ) -> Result<Option<StatusChangeCommand>> {
        if from == to {
            return Ok(None);
        }

        let source = &mut self.buckets[from.index()];
        if from_index >= source.len() {
            return Err(LeadsError::IndexOutOfRange {
                status: from,
                index: from_index,
                len: source.len(),
            });
        }

        let mut lead = source.remove(from_index);
        lead.set_status(to);
        let command = StatusChangeCommand {
            lead_id: lead.id.clone(),
            new_status: to,
        };

        let target = &mut self.buckets[to.index()];
        let to_index = to_index.min(target.len());
        target.insert(to_index, lead);

        Ok(Some(command))
    }
}

/// Rebuilds the board from the raw lead list.
///
/// Filters by date range and search text, sorts newest first and
/// partitions by status. Leads with an unknown status are dropped.
pub fn recompute(raw: &[Lead], criteria: &FilterCriteria) -> BucketCollection {
    recompute_with_warnings(raw, criteria).0
}

/// [`recompute`], also returning the leads skipped for unreadable dates
pub fn recompute_with_warnings(
    raw: &[Lead],
    criteria: &FilterCriteria,
) -> (BucketCollection, Vec<DateParseWarning>) {
    let (mut leads, warnings) = apply_filters(raw, criteria);
    sort_leads(&mut leads, SortOrder::Descending);

    let mut buckets = BucketCollection::new();
    for lead in leads {
        if let Some(status) = lead.status() {
            buckets.buckets[status.index()].push(lead);
        }
    }

    (buckets, warnings)
}

/// Applies a drag-and-drop move to a copy of `buckets`.
///
/// Returns the updated collection and the status change to dispatch, or
/// the input unchanged with no command when source and target match.
pub fn move_lead(
    buckets: &BucketCollection,
    from: LeadStatus,
    from_index: usize,
    to: LeadStatus,
    to_index: usize,
) -> Result<(BucketCollection, Option<StatusChangeCommand>)> {
    let mut next = buckets.clone();
    let command = next.apply_move(from, from_index, to, to_index)?;
    Ok((next, command))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn lead(id: i64, created: &str, status: LeadStatus) -> Lead {
        Lead::new(id, created, status)
    }

    fn ids(leads: &[Lead]) -> Vec<LeadId> {
        leads.iter().map(|l| l.id.clone()).collect()
    }

    fn sample() -> Vec<Lead> {
        vec![
            lead(1, "2024-07-01T09:00:00", LeadStatus::New).with_city("Dubai"),
            lead(2, "2024-07-05T09:00:00", LeadStatus::New),
            lead(3, "2024-07-03T09:00:00", LeadStatus::Discussion),
            lead(4, "2024-07-04T09:00:00", LeadStatus::DecisionMaker),
            lead(5, "2024-07-02T09:00:00", LeadStatus::ContractDiscussion),
        ]
    }

    #[test]
    fn test_default_board_config() {
        let config = BoardConfig::default();

        assert_eq!(config.columns.len(), 4);
        assert_eq!(
            config.get_column_for_status(LeadStatus::DecisionMaker).map(|c| c.key.as_str()),
            Some("decisionMakers")
        );
        assert_eq!(
            config.get_column_for_status(LeadStatus::ContractDiscussion).map(|c| c.title.as_str()),
            Some("Contract Discussion")
        );
    }

    #[test]
    fn test_recompute_partitions_and_sorts() {
        let buckets = recompute(&sample(), &FilterCriteria::new());

        assert_eq!(ids(buckets.get(LeadStatus::New)), vec![LeadId::Number(2), LeadId::Number(1)]);
        assert_eq!(ids(buckets.get(LeadStatus::Discussion)), vec![LeadId::Number(3)]);
        assert_eq!(ids(buckets.get(LeadStatus::DecisionMaker)), vec![LeadId::Number(4)]);
        assert_eq!(ids(buckets.get(LeadStatus::ContractDiscussion)), vec![LeadId::Number(5)]);
        assert_eq!(buckets.total(), 5);
    }

    #[test]
    fn test_recompute_always_has_four_buckets() {
        let buckets = recompute(&[], &FilterCriteria::new());

        assert_eq!(buckets.iter().count(), 4);
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_recompute_drops_unknown_status() {
        let mut stray = lead(9, "2024-07-06T09:00:00", LeadStatus::New);
        stray.status_code = Some(7);
        let mut missing = lead(10, "2024-07-06T09:00:00", LeadStatus::New);
        missing.status_code = None;

        let mut raw = sample();
        raw.push(stray);
        raw.push(missing);

        let buckets = recompute(&raw, &FilterCriteria::new());
        assert_eq!(buckets.total(), 5);
        assert_eq!(buckets.position_of(&LeadId::Number(9)), None);
    }

    #[test]
    fn test_recompute_has_no_duplicates_and_bounded_count() {
        let raw = sample();
        let buckets = recompute(&raw, &FilterCriteria::new().with_search("2024-07"));

        let mut seen: Vec<LeadId> = buckets.iter().flat_map(|(_, l)| ids(l)).collect();
        let count = seen.len();
        seen.sort_by_key(|id| id.to_string());
        seen.dedup();

        assert_eq!(seen.len(), count);
        assert!(count <= raw.len());
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let raw = sample();
        let criteria = FilterCriteria::new().with_search("2024");

        assert_eq!(recompute(&raw, &criteria), recompute(&raw, &criteria));
    }

    #[test]
    fn test_recompute_does_not_touch_source() {
        let raw = sample();
        let before = raw.clone();
        let _ = recompute(&raw, &FilterCriteria::new().with_search("dubai"));
        assert_eq!(raw, before);
    }

    #[test]
    fn test_recompute_reports_date_warnings() {
        let mut raw = sample();
        raw.push(lead(11, "31/07/2024", LeadStatus::New));
        let start = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 7, 31).unwrap().and_hms_opt(0, 0, 0).unwrap();

        let (buckets, warnings) =
            recompute_with_warnings(&raw, &FilterCriteria::new().with_range(start, end));

        assert_eq!(buckets.total(), 5);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].lead_id, LeadId::Number(11));
    }

    #[test]
    fn test_recompute_search_by_city() {
        let buckets = recompute(&sample(), &FilterCriteria::new().with_search("dub"));

        assert_eq!(buckets.total(), 1);
        assert_eq!(ids(buckets.get(LeadStatus::New)), vec![LeadId::Number(1)]);
    }

    #[test]
    fn test_move_between_buckets() {
        let raw = vec![
            lead(1, "2024-07-05T09:00:00", LeadStatus::New),
            lead(2, "2024-07-04T09:00:00", LeadStatus::New),
        ];
        let buckets = recompute(&raw, &FilterCriteria::new());

        let (moved, command) =
            move_lead(&buckets, LeadStatus::New, 0, LeadStatus::Discussion, 0).unwrap();

        assert_eq!(ids(moved.get(LeadStatus::New)), vec![LeadId::Number(2)]);
        assert_eq!(ids(moved.get(LeadStatus::Discussion)), vec![LeadId::Number(1)]);
        assert_eq!(
            command,
            Some(StatusChangeCommand {
                lead_id: LeadId::Number(1),
                new_status: LeadStatus::Discussion,
            })
        );
        assert_eq!(
            moved.get(LeadStatus::Discussion)[0].status(),
            Some(LeadStatus::Discussion)
        );
        // input untouched
        assert_eq!(buckets.get(LeadStatus::New).len(), 2);
    }

    #[test]
    fn test_move_preserves_platform() {
        let raw = vec![lead(1, "2024-07-05T09:00:00", LeadStatus::New).with_platform("ig")];
        let buckets = recompute(&raw, &FilterCriteria::new());

        let (moved, _) =
            move_lead(&buckets, LeadStatus::New, 0, LeadStatus::ContractDiscussion, 0).unwrap();

        let relocated = &moved.get(LeadStatus::ContractDiscussion)[0];
        assert_eq!(relocated.platform.as_deref(), Some("ig"));
    }

    #[test]
    fn test_move_within_same_bucket_is_noop() {
        let buckets = recompute(&sample(), &FilterCriteria::new());

        let (moved, command) = move_lead(&buckets, LeadStatus::New, 0, LeadStatus::New, 1).unwrap();

        assert_eq!(moved, buckets);
        assert_eq!(command, None);
    }

    #[test]
    fn test_move_clamps_target_index() {
        let buckets = recompute(&sample(), &FilterCriteria::new());

        let (moved, _) =
            move_lead(&buckets, LeadStatus::New, 1, LeadStatus::Discussion, 99).unwrap();

        assert_eq!(
            ids(moved.get(LeadStatus::Discussion)),
            vec![LeadId::Number(3), LeadId::Number(1)]
        );
    }

    #[test]
    fn test_move_out_of_range_fails_without_mutation() {
        let mut buckets = recompute(&sample(), &FilterCriteria::new());
        let before = buckets.clone();

        let result = buckets.apply_move(LeadStatus::Discussion, 5, LeadStatus::New, 0);

        assert!(matches!(
            result,
            Err(LeadsError::IndexOutOfRange {
                status: LeadStatus::Discussion,
                index: 5,
                len: 1
            })
        ));
        assert_eq!(buckets, before);
    }
}
