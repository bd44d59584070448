use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::bom::{aggregate_bom, materials_total};
use crate::domain::job::{Job, JobId};
use crate::domain::pricing_config::{PricingConfig, PricingConfigId};
use crate::domain::quote::{Quote, QuoteId, QuoteStatus};
use crate::domain::OrgId;
use crate::errors::{EngineError, StoreError};
use crate::numbering::{date_prefix, next_quote_number};
use crate::pricing::costs::{compute_breakdown, labor_cost, CostBreakdown};
use crate::versioning::snapshot_version;

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, StoreError>;
}

#[async_trait]
pub trait PricingConfigStore: Send + Sync {
    async fn find_by_id(&self, id: &PricingConfigId) -> Result<Option<PricingConfig>, StoreError>;
    async fn find_default_for_organization(
        &self,
        organization_id: &OrgId,
    ) -> Result<Option<PricingConfig>, StoreError>;
}

/// Persistence seam for quotes. `insert_generated` and `apply_recalculation`
/// each receive the full aggregate (breakdown + BOM + versions) in one call
/// so the implementation can commit it transactionally: the engine promises
/// no partial success.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    async fn find_by_id(&self, id: &QuoteId) -> Result<Option<Quote>, StoreError>;
    async fn count_for_number_prefix(
        &self,
        organization_id: &OrgId,
        prefix: &str,
    ) -> Result<u64, StoreError>;
    async fn insert_generated(&self, quote: &Quote) -> Result<(), StoreError>;
    async fn apply_recalculation(&self, quote: &Quote) -> Result<(), StoreError>;
}

#[async_trait]
impl<T> JobStore for std::sync::Arc<T>
where
    T: JobStore + ?Sized,
{
    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, StoreError> {
        (**self).find_by_id(id).await
    }
}

#[async_trait]
impl<T> PricingConfigStore for std::sync::Arc<T>
where
    T: PricingConfigStore + ?Sized,
{
    async fn find_by_id(&self, id: &PricingConfigId) -> Result<Option<PricingConfig>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_default_for_organization(
        &self,
        organization_id: &OrgId,
    ) -> Result<Option<PricingConfig>, StoreError> {
        (**self).find_default_for_organization(organization_id).await
    }
}

#[async_trait]
impl<T> QuoteStore for std::sync::Arc<T>
where
    T: QuoteStore + ?Sized,
{
    async fn find_by_id(&self, id: &QuoteId) -> Result<Option<Quote>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn count_for_number_prefix(
        &self,
        organization_id: &OrgId,
        prefix: &str,
    ) -> Result<u64, StoreError> {
        (**self).count_for_number_prefix(organization_id, prefix).await
    }

    async fn insert_generated(&self, quote: &Quote) -> Result<(), StoreError> {
        (**self).insert_generated(quote).await
    }

    async fn apply_recalculation(&self, quote: &Quote) -> Result<(), StoreError> {
        (**self).apply_recalculation(quote).await
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateQuoteRequest {
    pub job_id: JobId,
    pub pricing_config_id: Option<PricingConfigId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecalculateQuoteRequest {
    pub quote_id: QuoteId,
    pub change_summary: Option<String>,
}

/// Stateless orchestrator over the stores: aggregation, costing, numbering,
/// and versioning composed into the two quote operations. Safe to share
/// across tasks; every invocation reads its inputs fresh.
pub struct QuoteEngine<J, P, Q> {
    jobs: J,
    pricing_configs: P,
    quotes: Q,
}

impl<J, P, Q> QuoteEngine<J, P, Q>
where
    J: JobStore,
    P: PricingConfigStore,
    Q: QuoteStore,
{
    pub fn new(jobs: J, pricing_configs: P, quotes: Q) -> Self {
        Self { jobs, pricing_configs, quotes }
    }

    pub async fn generate_quote(
        &self,
        request: GenerateQuoteRequest,
    ) -> Result<Quote, EngineError> {
        let job = self
            .jobs
            .find_by_id(&request.job_id)
            .await?
            .ok_or(EngineError::JobNotFound(request.job_id))?;

        let config = match &request.pricing_config_id {
            Some(id) => self.pricing_configs.find_by_id(id).await?,
            None => {
                self.pricing_configs.find_default_for_organization(&job.organization_id).await?
            }
        }
        .ok_or(EngineError::PricingConfigNotFound)?;

        let bom_lines = aggregate_bom(&job, &config);
        let labor = labor_cost(job.total_linear_feet, &config);
        let breakdown = compute_breakdown(materials_total(&bom_lines), labor, &config);

        let now = Utc::now();
        let existing = self
            .quotes
            .count_for_number_prefix(&job.organization_id, &date_prefix(now))
            .await?;

        let mut quote = Quote {
            id: QuoteId(Uuid::new_v4()),
            job_id: job.id,
            organization_id: job.organization_id,
            pricing_config_id: Some(config.id),
            quote_number: next_quote_number(now, existing),
            current_version: 1,
            status: QuoteStatus::Draft,
            materials_cost: breakdown.materials_cost,
            labor_cost: breakdown.labor_cost,
            subtotal: breakdown.subtotal,
            contingency_amount: breakdown.contingency_amount,
            profit_amount: breakdown.profit_amount,
            tax_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            total_amount: breakdown.total_amount,
            grand_total: breakdown.total_amount,
            bom_lines,
            versions: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let version = snapshot_version(&quote, &quote.bom_lines, &config, None);
        quote.versions.push(version);

        self.quotes.insert_generated(&quote).await?;
        info!(
            quote_number = %quote.quote_number,
            total = %quote.total_amount,
            "generated quote"
        );
        Ok(quote)
    }

    /// Re-prices an existing quote against the job and pricing config as
    /// they stand now. Known limitation: the reads carry no optimistic
    /// concurrency check, so a recalculation racing a job edit may reflect
    /// a mixed state; acceptable for a single-operator workflow.
    pub async fn recalculate_quote(
        &self,
        request: RecalculateQuoteRequest,
    ) -> Result<Quote, EngineError> {
        let mut quote = self
            .quotes
            .find_by_id(&request.quote_id)
            .await?
            .ok_or(EngineError::QuoteNotFound(request.quote_id))?;

        let config_id = quote.pricing_config_id.ok_or(EngineError::IncompleteQuote {
            quote_id: quote.id,
            missing: "pricing configuration",
        })?;
        let job = self.jobs.find_by_id(&quote.job_id).await?.ok_or(
            EngineError::IncompleteQuote { quote_id: quote.id, missing: "job" },
        )?;
        let config = self.pricing_configs.find_by_id(&config_id).await?.ok_or(
            EngineError::IncompleteQuote {
                quote_id: quote.id,
                missing: "pricing configuration",
            },
        )?;

        // Superseded rows are discarded outright; only version snapshots
        // keep the old BOM.
        quote.bom_lines = aggregate_bom(&job, &config);
        let labor = labor_cost(job.total_linear_feet, &config);
        let breakdown = compute_breakdown(materials_total(&quote.bom_lines), labor, &config);
        apply_breakdown(&mut quote, &breakdown);
        quote.grand_total = quote.total_amount + quote.tax_amount;
        quote.current_version += 1;
        quote.transition_to(QuoteStatus::Revised)?;
        quote.updated_at = Utc::now();

        let version =
            snapshot_version(&quote, &quote.bom_lines, &config, request.change_summary);
        quote.versions.push(version);

        self.quotes.apply_recalculation(&quote).await?;
        info!(
            quote_number = %quote.quote_number,
            version = quote.current_version,
            total = %quote.total_amount,
            "recalculated quote"
        );
        Ok(quote)
    }

    pub async fn generate_quote_with_audit<S>(
        &self,
        request: GenerateQuoteRequest,
        sink: &S,
        audit: &AuditContext,
    ) -> Result<Quote, EngineError>
    where
        S: AuditSink,
    {
        let job_id = request.job_id;
        let result = self.generate_quote(request).await;
        match &result {
            Ok(quote) => sink.emit(
                AuditEvent::new(
                    Some(quote.id),
                    Some(job_id),
                    audit.correlation_id.clone(),
                    "quote.generated",
                    AuditCategory::Generation,
                    audit.actor.clone(),
                    AuditOutcome::Success,
                )
                .with_metadata("quote_number", quote.quote_number.clone())
                .with_metadata("total_amount", quote.total_amount.to_string()),
            ),
            Err(error) => sink.emit(
                AuditEvent::new(
                    audit.quote_id,
                    Some(job_id),
                    audit.correlation_id.clone(),
                    "quote.generated",
                    AuditCategory::Generation,
                    audit.actor.clone(),
                    AuditOutcome::Failed,
                )
                .with_metadata("error", error.to_string()),
            ),
        }
        result
    }

    pub async fn recalculate_quote_with_audit<S>(
        &self,
        request: RecalculateQuoteRequest,
        sink: &S,
        audit: &AuditContext,
    ) -> Result<Quote, EngineError>
    where
        S: AuditSink,
    {
        let quote_id = request.quote_id;
        let result = self.recalculate_quote(request).await;
        match &result {
            Ok(quote) => sink.emit(
                AuditEvent::new(
                    Some(quote.id),
                    audit.job_id,
                    audit.correlation_id.clone(),
                    "quote.recalculated",
                    AuditCategory::Recalculation,
                    audit.actor.clone(),
                    AuditOutcome::Success,
                )
                .with_metadata("version", quote.current_version.to_string())
                .with_metadata("total_amount", quote.total_amount.to_string()),
            ),
            Err(error) => sink.emit(
                AuditEvent::new(
                    Some(quote_id),
                    audit.job_id,
                    audit.correlation_id.clone(),
                    "quote.recalculated",
                    AuditCategory::Recalculation,
                    audit.actor.clone(),
                    AuditOutcome::Failed,
                )
                .with_metadata("error", error.to_string()),
            ),
        }
        result
    }
}

fn apply_breakdown(quote: &mut Quote, breakdown: &CostBreakdown) {
    quote.materials_cost = breakdown.materials_cost;
    quote.labor_cost = breakdown.labor_cost;
    quote.subtotal = breakdown.subtotal;
    quote.contingency_amount = breakdown.contingency_amount;
    quote.profit_amount = breakdown.profit_amount;
    quote.total_amount = breakdown.total_amount;
}
