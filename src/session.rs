//! Board session: the state owned by one mounted leads board.
//!
//! All changes flow through [`BoardState::reduce`], which is synchronous and
//! free of I/O. [`BoardSession`] wraps the state with a backend, runs the
//! initial fetch on mount and dispatches status updates produced by moves
//! as detached tasks.

use crate::backend::LeadBackend;
use crate::domain::{
    preset_range, recompute_with_warnings, BoardConfig, BucketCollection, Column, DateRange,
    FilterCriteria, Lead, LeadStatus, StatusChangeCommand,
};
use crate::error::Result;
use crate::store::{LeadStore, StoreEvent};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// A change to the board's filter criteria
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    /// A duration option such as `last30`; `custom` clears both bounds
    Preset(String),
    CustomStart(Option<NaiveDateTime>),
    CustomEnd(Option<NaiveDateTime>),
    Search(String),
    Clear,
}

/// Input to the board reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Fetch(StoreEvent),
    FilterChanged(FilterChange),
    MoveRequested {
        from: LeadStatus,
        from_index: usize,
        to: LeadStatus,
        to_index: usize,
    },
}

/// Everything the board renders from
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    config: BoardConfig,
    store: LeadStore,
    criteria: FilterCriteria,
    duration: Option<String>,
    buckets: BucketCollection,
}

impl BoardState {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Configured columns paired with their current leads, in column order.
    ///
    /// A status without a configured column is not rendered.
    pub fn columns(&self) -> impl Iterator<Item = (&Column, &[Lead])> + '_ {
        self.buckets.iter().filter_map(move |(status, leads)| {
            self.config
                .get_column_for_status(status)
                .map(|column| (column, leads))
        })
    }

    pub fn store(&self) -> &LeadStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The last selected duration option, if any
    pub fn duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }

    pub fn buckets(&self) -> &BucketCollection {
        &self.buckets
    }

    /// Applies one message. `today` anchors duration presets.
    ///
    /// Returns the status change a move produced; the local buckets are
    /// already updated when it is returned.
    pub fn reduce(
        &mut self,
        message: Message,
        today: NaiveDate,
    ) -> Result<Option<StatusChangeCommand>> {
        match message {
            Message::Fetch(event) => {
                let reload = matches!(event, StoreEvent::Loaded(_));
                self.store.reduce(event);
                if reload {
                    self.refresh_buckets();
                }
                Ok(None)
            }
            Message::FilterChanged(change) => {
                self.apply_filter_change(change, today)?;
                self.refresh_buckets();
                Ok(None)
            }
            Message::MoveRequested {
                from,
                from_index,
                to,
                to_index,
            } => self.buckets.apply_move(from, from_index, to, to_index),
        }
    }

    fn apply_filter_change(&mut self, change: FilterChange, today: NaiveDate) -> Result<()> {
        match change {
            FilterChange::Preset(option) => {
                let (start, end) = preset_range(&option, today);
                self.criteria.start = start;
                self.criteria.end = end;
                self.duration = Some(option);
            }
            FilterChange::CustomStart(start) => {
                if let (Some(start), Some(end)) = (start, self.criteria.end) {
                    DateRange::new(start, end)?;
                }
                self.criteria.start = start;
            }
            FilterChange::CustomEnd(end) => {
                if let (Some(start), Some(end)) = (self.criteria.start, end) {
                    DateRange::new(start, end)?;
                }
                self.criteria.end = end;
            }
            FilterChange::Search(text) => self.criteria.search = text,
            FilterChange::Clear => {
                self.criteria = FilterCriteria::default();
                self.duration = None;
            }
        }
        Ok(())
    }

    fn refresh_buckets(&mut self) {
        let (buckets, warnings) = recompute_with_warnings(self.store.leads(), &self.criteria);
        if !warnings.is_empty() {
            debug!(skipped = warnings.len(), "leads skipped by date filter");
        }
        self.buckets = buckets;
    }
}

/// Outcome of [`BoardSession::dispatch`]
#[derive(Debug, Default)]
pub struct Dispatched {
    /// Status change produced by a move; already applied to the buckets
    pub command: Option<StatusChangeCommand>,
    /// Background update task, absent when there is no command or no runtime
    pub task: Option<JoinHandle<()>>,
}

/// A mounted board bound to a backend
pub struct BoardSession {
    backend: Arc<dyn LeadBackend>,
    state: BoardState,
    anchor: Option<NaiveDate>,
}

impl BoardSession {
    /// Creates the session without fetching
    pub fn new(backend: Arc<dyn LeadBackend>, config: BoardConfig) -> Self {
        Self {
            backend,
            state: BoardState::new(config),
            anchor: None,
        }
    }

    /// Creates the session and runs the initial fetch.
    ///
    /// A failed fetch leaves the session usable with the error recorded in
    /// the store.
    pub async fn mount(backend: Arc<dyn LeadBackend>, config: BoardConfig) -> Self {
        let mut session = Self::new(backend, config);
        // failure is recorded in the store
        let _ = session.refresh().await;
        session
    }

    /// Pins the date used by duration presets
    pub fn with_anchor(mut self, today: NaiveDate) -> Self {
        self.anchor = Some(today);
        self
    }

    /// Tears the session down, discarding all board state
    pub fn unmount(self) {
        debug!(leads = self.state.store().leads().len(), "board unmounted");
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn buckets(&self) -> &BucketCollection {
        self.state.buckets()
    }

    fn today(&self) -> NaiveDate {
        self.anchor.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Re-fetches the lead list and rebuilds the buckets
    pub async fn refresh(&mut self) -> Result<()> {
        self.state.store.fetch(self.backend.as_ref()).await?;
        self.state.refresh_buckets();
        Ok(())
    }

    /// Applies a message and dispatches any resulting status update.
    ///
    /// The update runs as a detached task; its failure is logged and the
    /// local move is kept. Outside a tokio runtime nothing is spawned and the
    /// command is handed back for the caller to send.
    pub fn dispatch(&mut self, message: Message) -> Result<Dispatched> {
        let today = self.today();
        let Some(command) = self.state.reduce(message, today)? else {
            return Ok(Dispatched::default());
        };

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(lead_id = %command.lead_id, error = %e, "no runtime to dispatch status update");
                return Ok(Dispatched {
                    command: Some(command),
                    task: None,
                });
            }
        };

        let backend = Arc::clone(&self.backend);
        let update = command.clone();
        let task = handle.spawn(async move {
            if let Err(e) = backend.update_lead_status(&update).await {
                error!(
                    lead_id = %update.lead_id,
                    status = %update.new_status,
                    error = %e,
                    "error updating lead status"
                );
            }
        });

        Ok(Dispatched {
            command: Some(command),
            task: Some(task),
        })
    }
}
