//! Pickup Flow
//!
//! schedule -> settle -> reward as one SQLite transaction. A failure at any
//! step drops the transaction, which rolls every write back.

use std::sync::Arc;

use sqlx::SqlitePool;

use super::scheduler::validate_pickup;
use crate::db::repository::{RepoError, ledger, pickup, token};
use crate::ledger::build_entry;
use crate::matching::CollectorDirectory;
use crate::rewards::tokens_for;
use shared::error::{AppError, AppResult};
use shared::models::{Collector, PickupCreate, PickupReceipt, SettlementInput};

#[derive(Clone, Debug)]
pub struct PickupFlow {
    pool: SqlitePool,
    collectors: Arc<CollectorDirectory>,
}

impl PickupFlow {
    pub fn new(pool: SqlitePool, collectors: Arc<CollectorDirectory>) -> Self {
        Self { pool, collectors }
    }

    /// Collector named in the submission, or the cheapest one for its material
    fn resolve_collector(&self, data: &PickupCreate) -> AppResult<&Collector> {
        match data.collector.as_deref() {
            Some(name) => {
                let collector = self
                    .collectors
                    .find(name)
                    .ok_or_else(|| AppError::collector_not_found(name))?;
                if !collector.accepts(&data.material) {
                    return Err(AppError::validation(format!(
                        "Collector {name} does not accept {}",
                        data.material
                    ))
                    .with_detail("collector", name)
                    .with_detail("material", data.material.clone()));
                }
                Ok(collector)
            }
            None => self
                .collectors
                .cheapest(&data.material)
                .ok_or_else(|| AppError::no_eligible_collector(data.material.clone())),
        }
    }

    /// Record, settle and reward one pickup atomically
    pub async fn complete(&self, data: &PickupCreate) -> AppResult<PickupReceipt> {
        validate_pickup(data)?;
        let collector = self.resolve_collector(data)?;
        let created_at = shared::util::now_timestamp();

        let entry = build_entry(
            &SettlementInput {
                household: data.household.clone(),
                collector: collector.name.clone(),
                material: data.material.clone(),
                weight: data.weight,
                price_per_kg: collector.price_per_kg,
            },
            &created_at,
        )?;
        let tokens = tokens_for(data.weight);

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;

        let mut request = pickup::insert(&mut *tx, data, &created_at).await?;
        let entry = ledger::upsert(&mut *tx, &entry).await?;
        let balance = token::add(&mut *tx, &data.household, tokens)
            .await?
            .ok_or_else(|| AppError::balance_overflow(data.household.clone()))?;
        pickup::set_tx_id(&mut *tx, request.id, &entry.tx_id).await?;

        tx.commit().await.map_err(RepoError::from)?;
        request.tx_id = Some(entry.tx_id.clone());

        tracing::info!(
            id = request.id,
            tx_id = %entry.tx_id,
            collector = %entry.collector,
            total = entry.total,
            tokens,
            "Pickup completed"
        );
        Ok(PickupReceipt {
            request,
            entry,
            tokens,
            balance,
        })
    }
}
