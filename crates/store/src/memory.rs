use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use fencequote_core::domain::job::{Job, JobId};
use fencequote_core::domain::pricing_config::{PricingConfig, PricingConfigId};
use fencequote_core::domain::quote::{Quote, QuoteId};
use fencequote_core::domain::OrgId;
use fencequote_core::engine::{JobStore, PricingConfigStore, QuoteStore};
use fencequote_core::errors::StoreError;

#[derive(Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<Uuid, Job>>,
}

impl InMemoryJobStore {
    pub async fn upsert(&self, job: Job) {
        let mut jobs = self.jobs.write().await;
        jobs.insert(job.id.0, job);
    }
}

#[async_trait::async_trait]
impl JobStore for InMemoryJobStore {
    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, StoreError> {
        let jobs = self.jobs.read().await;
        Ok(jobs.get(&id.0).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryPricingConfigStore {
    configs: RwLock<HashMap<Uuid, PricingConfig>>,
}

impl InMemoryPricingConfigStore {
    pub async fn upsert(&self, config: PricingConfig) {
        let mut configs = self.configs.write().await;
        configs.insert(config.id.0, config);
    }
}

#[async_trait::async_trait]
impl PricingConfigStore for InMemoryPricingConfigStore {
    async fn find_by_id(&self, id: &PricingConfigId) -> Result<Option<PricingConfig>, StoreError> {
        let configs = self.configs.read().await;
        Ok(configs.get(&id.0).cloned())
    }

    async fn find_default_for_organization(
        &self,
        organization_id: &OrgId,
    ) -> Result<Option<PricingConfig>, StoreError> {
        let configs = self.configs.read().await;
        Ok(configs
            .values()
            .find(|config| &config.organization_id == organization_id && config.is_default)
            .cloned())
    }
}

/// Enforces the quote-number uniqueness constraint the engine's numbering
/// contract relies on: a second insert with an already-used number for the
/// same organization fails with `Conflict`, and the caller retries.
#[derive(Default)]
pub struct InMemoryQuoteStore {
    quotes: RwLock<HashMap<Uuid, Quote>>,
}

#[async_trait::async_trait]
impl QuoteStore for InMemoryQuoteStore {
    async fn find_by_id(&self, id: &QuoteId) -> Result<Option<Quote>, StoreError> {
        let quotes = self.quotes.read().await;
        Ok(quotes.get(&id.0).cloned())
    }

    async fn count_for_number_prefix(
        &self,
        organization_id: &OrgId,
        prefix: &str,
    ) -> Result<u64, StoreError> {
        let quotes = self.quotes.read().await;
        Ok(quotes
            .values()
            .filter(|quote| {
                &quote.organization_id == organization_id
                    && quote.quote_number.starts_with(prefix)
            })
            .count() as u64)
    }

    async fn insert_generated(&self, quote: &Quote) -> Result<(), StoreError> {
        let mut quotes = self.quotes.write().await;
        let duplicate = quotes.values().any(|existing| {
            existing.organization_id == quote.organization_id
                && existing.quote_number == quote.quote_number
        });
        if duplicate {
            return Err(StoreError::Conflict(format!(
                "quote number `{}` already exists",
                quote.quote_number
            )));
        }
        quotes.insert(quote.id.0, quote.clone());
        Ok(())
    }

    async fn apply_recalculation(&self, quote: &Quote) -> Result<(), StoreError> {
        let mut quotes = self.quotes.write().await;
        if !quotes.contains_key(&quote.id.0) {
            return Err(StoreError::Conflict(format!(
                "quote `{}` does not exist",
                quote.quote_number
            )));
        }
        quotes.insert(quote.id.0, quote.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use fencequote_core::engine::{JobStore, QuoteStore};
    use fencequote_core::errors::StoreError;

    use crate::fixtures::{fence_job, standard_catalog};
    use crate::memory::{InMemoryJobStore, InMemoryQuoteStore};

    #[tokio::test]
    async fn job_store_round_trip() {
        let catalog = standard_catalog();
        let job = fence_job(&catalog, Decimal::from(60));
        let store = InMemoryJobStore::default();

        store.upsert(job.clone()).await;
        let found = store.find_by_id(&job.id).await.expect("find job");

        assert_eq!(found, Some(job));
    }

    #[tokio::test]
    async fn duplicate_quote_number_is_a_conflict() {
        let catalog = standard_catalog();
        let job = fence_job(&catalog, Decimal::from(60));
        let store = InMemoryQuoteStore::default();

        let quote = crate::fixtures::draft_quote(&job, "Q-20260805-0001");
        store.insert_generated(&quote).await.expect("first insert");

        let mut rival = crate::fixtures::draft_quote(&job, "Q-20260805-0001");
        rival.id = fencequote_core::domain::quote::QuoteId(uuid::Uuid::new_v4());
        let error = store.insert_generated(&rival).await.expect_err("second insert conflicts");

        assert!(matches!(error, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn number_prefix_count_is_scoped_to_the_organization() {
        let catalog_a = standard_catalog();
        let catalog_b = standard_catalog();
        let job_a = fence_job(&catalog_a, Decimal::from(60));
        let job_b = fence_job(&catalog_b, Decimal::from(60));
        let store = InMemoryQuoteStore::default();

        store
            .insert_generated(&crate::fixtures::draft_quote(&job_a, "Q-20260805-0001"))
            .await
            .expect("insert for org a");
        store
            .insert_generated(&crate::fixtures::draft_quote(&job_b, "Q-20260805-0001"))
            .await
            .expect("insert for org b");

        let count_a = store
            .count_for_number_prefix(&job_a.organization_id, "Q-20260805")
            .await
            .expect("count org a");
        assert_eq!(count_a, 1);
    }
}
