use crate::{
    domain::{Lead, StatusChangeCommand},
    error::Result,
};
use async_trait::async_trait;

pub mod config;
pub mod http;
pub mod memory;

pub use config::{BackendConfig, Credentials};
pub use http::HttpBackend;
pub use memory::MemoryBackend;

/// Remote service holding the lead records
#[async_trait]
pub trait LeadBackend: Send + Sync {
    /// Retrieves the full lead list, in server order
    async fn fetch_leads(&self) -> Result<Vec<Lead>>;

    /// Persists a lead's new status
    async fn update_lead_status(&self, command: &StatusChangeCommand) -> Result<()>;
}
