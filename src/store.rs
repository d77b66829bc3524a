//! Request-state container for the lead list.

use crate::backend::LeadBackend;
use crate::domain::Lead;
use crate::error::Result;
use tracing::{debug, warn};

/// Phase of the most recent fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Transitions of the lead list request
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Started,
    Loaded(Vec<Lead>),
    Failed(String),
}

/// Raw lead list plus loading and error state
#[derive(Debug, Clone, PartialEq)]
pub struct LeadStore {
    loading: bool,
    leads: Vec<Lead>,
    error: Option<String>,
    phase: RequestPhase,
}

impl Default for LeadStore {
    fn default() -> Self {
        Self {
            loading: false,
            leads: Vec::new(),
            error: None,
            phase: RequestPhase::Idle,
        }
    }
}

impl LeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Leads in server response order
    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    /// Applies a request transition.
    ///
    /// A successful load replaces the list wholesale and clears the error;
    /// a failure keeps whatever list was there before.
    pub fn reduce(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Started => {
                self.loading = true;
                self.phase = RequestPhase::Loading;
            }
            StoreEvent::Loaded(leads) => {
                self.loading = false;
                self.leads = leads;
                self.error = None;
                self.phase = RequestPhase::Success;
            }
            StoreEvent::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
                self.phase = RequestPhase::Error;
            }
        }
    }

    /// Fetches the lead list once and records the outcome.
    ///
    /// The error is stored and also returned so callers can react to it.
    pub async fn fetch(&mut self, backend: &dyn LeadBackend) -> Result<()> {
        self.reduce(StoreEvent::Started);
        debug!("fetching lead list");

        match backend.fetch_leads().await {
            Ok(leads) => {
                debug!(count = leads.len(), "lead list loaded");
                self.reduce(StoreEvent::Loaded(leads));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch lead list");
                self.reduce(StoreEvent::Failed(e.to_string()));
                Err(e)
            }
        }
    }
}
