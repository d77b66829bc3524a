pub mod board;
pub mod filter;
pub mod lead;
pub mod preset;
pub mod sorting;

pub use board::{
    move_lead, recompute, recompute_with_warnings, BoardConfig, BucketCollection, Column,
    StatusChangeCommand,
};
pub use filter::{apply_filters, matches_search, DateParseWarning, DateRange, FilterCriteria};
pub use lead::{parse_created_time, Lead, LeadId, LeadStatus, Platform};
pub use preset::{preset_range, preset_range_now, PresetRange};
pub use sorting::{sort_leads, SortOrder};
