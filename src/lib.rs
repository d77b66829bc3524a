//! # Leads Board Core
//!
//! Core logic for a sales leads kanban board.
//!
//! This crate turns the flat lead list served by the backend into the four
//! status columns of the board, keeps them consistent under date-range and
//! text filtering, and applies drag-and-drop status transitions, without
//! any dependency on a specific UI.

pub mod backend;
pub mod domain;
pub mod error;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use backend::{BackendConfig, Credentials, HttpBackend, LeadBackend, MemoryBackend};
pub use domain::{
    board::{move_lead, recompute, BoardConfig, BucketCollection, Column, StatusChangeCommand},
    filter::{DateParseWarning, DateRange, FilterCriteria},
    lead::{Lead, LeadId, LeadStatus, Platform},
    preset::{preset_range, PresetRange},
};
pub use error::{LeadsError, Result};
pub use session::{BoardSession, BoardState, Dispatched, FilterChange, Message};
pub use store::{LeadStore, RequestPhase, StoreEvent};
