use crate::{
    backend::LeadBackend,
    domain::{Lead, StatusChangeCommand},
    error::{LeadsError, Result},
};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// In-process backend holding leads in memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    leads: Mutex<Vec<Lead>>,
    updates: Mutex<Vec<StatusChangeCommand>>,
    fetch_failure: Mutex<Option<String>>,
    update_failure: Mutex<Option<String>>,
}

impl MemoryBackend {
    pub fn new(leads: Vec<Lead>) -> Self {
        Self {
            leads: Mutex::new(leads),
            ..Self::default()
        }
    }

    /// Makes subsequent fetches fail with `message` (or succeed again with `None`)
    pub async fn set_fetch_failure(&self, message: Option<String>) {
        *self.fetch_failure.lock().await = message;
    }

    /// Makes subsequent status updates fail with `message`
    pub async fn set_update_failure(&self, message: Option<String>) {
        *self.update_failure.lock().await = message;
    }

    pub async fn replace_leads(&self, leads: Vec<Lead>) {
        *self.leads.lock().await = leads;
    }

    /// Status updates received so far, in arrival order
    pub async fn updates(&self) -> Vec<StatusChangeCommand> {
        self.updates.lock().await.clone()
    }

    pub async fn leads(&self) -> Vec<Lead> {
        self.leads.lock().await.clone()
    }
}

#[async_trait]
impl LeadBackend for MemoryBackend {
    async fn fetch_leads(&self) -> Result<Vec<Lead>> {
        if let Some(message) = self.fetch_failure.lock().await.clone() {
            return Err(LeadsError::Fetch(message));
        }
        Ok(self.leads.lock().await.clone())
    }

    async fn update_lead_status(&self, command: &StatusChangeCommand) -> Result<()> {
        self.updates.lock().await.push(command.clone());

        if let Some(message) = self.update_failure.lock().await.clone() {
            return Err(LeadsError::StatusUpdate(message));
        }

        let mut leads = self.leads.lock().await;
        if let Some(lead) = leads.iter_mut().find(|l| l.id == command.lead_id) {
            lead.set_status(command.new_status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LeadId, LeadStatus};

    #[tokio::test]
    async fn test_fetch_returns_leads_in_order() {
        let backend = MemoryBackend::new(vec![
            Lead::new(2, "2024-07-01T00:00:00", LeadStatus::New),
            Lead::new(1, "2024-07-02T00:00:00", LeadStatus::New),
        ]);

        let leads = backend.fetch_leads().await.unwrap();
        assert_eq!(leads[0].id, LeadId::Number(2));
        assert_eq!(leads[1].id, LeadId::Number(1));
    }

    #[tokio::test]
    async fn test_fetch_failure() {
        let backend = MemoryBackend::new(Vec::new());
        backend.set_fetch_failure(Some("offline".to_string())).await;

        let err = backend.fetch_leads().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch leads: offline");
    }

    #[tokio::test]
    async fn test_update_rewrites_stored_status() {
        let backend = MemoryBackend::new(vec![Lead::new(1, "2024-07-01T00:00:00", LeadStatus::New)]);
        let command = StatusChangeCommand {
            lead_id: LeadId::Number(1),
            new_status: LeadStatus::DecisionMaker,
        };

        backend.update_lead_status(&command).await.unwrap();

        assert_eq!(backend.updates().await, vec![command]);
        assert_eq!(backend.leads().await[0].status(), Some(LeadStatus::DecisionMaker));
    }

    #[tokio::test]
    async fn test_update_failure_is_recorded() {
        let backend = MemoryBackend::new(vec![Lead::new(1, "2024-07-01T00:00:00", LeadStatus::New)]);
        backend.set_update_failure(Some("500".to_string())).await;
        let command = StatusChangeCommand {
            lead_id: LeadId::Number(1),
            new_status: LeadStatus::Discussion,
        };

        assert!(matches!(
            backend.update_lead_status(&command).await,
            Err(LeadsError::StatusUpdate(_))
        ));
        assert_eq!(backend.updates().await.len(), 1);
        assert_eq!(backend.leads().await[0].status(), Some(LeadStatus::New));
    }
}
