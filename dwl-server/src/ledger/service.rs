//! Settlement Service

use sqlx::SqlitePool;

use super::hash::CanonicalPayload;
use crate::db::repository::ledger;
use crate::utils::validation::{MAX_NAME_LEN, validate_price, validate_required_text, validate_weight};
use shared::error::{AppError, AppResult};
use shared::models::{LedgerEntry, SettlementInput};

/// Build a ledger entry for `input` stamped with `created_at`
///
/// Pure: no clock, no I/O. `total = weight * price_per_kg` and `tx_id`
/// covers every field except `verified`.
pub fn build_entry(input: &SettlementInput, created_at: &str) -> AppResult<LedgerEntry> {
    validate_required_text(&input.household, "household", MAX_NAME_LEN)?;
    validate_required_text(&input.collector, "collector", MAX_NAME_LEN)?;
    validate_required_text(&input.material, "material", MAX_NAME_LEN)?;
    validate_weight(input.weight)?;
    validate_price(input.price_per_kg)?;

    let total = input.weight * input.price_per_kg;
    let tx_id = CanonicalPayload {
        collector: &input.collector,
        created_at,
        household: &input.household,
        material: &input.material,
        price_per_kg: input.price_per_kg,
        total,
        weight: input.weight,
    }
    .tx_id()
    .map_err(|e| AppError::internal(format!("Failed to serialize ledger payload: {e}")))?;

    Ok(LedgerEntry {
        tx_id,
        created_at: created_at.to_string(),
        household: input.household.clone(),
        collector: input.collector.clone(),
        material: input.material.clone(),
        weight: input.weight,
        price_per_kg: input.price_per_kg,
        total,
        verified: false,
    })
}

/// Settles collected pickups into the ledger
#[derive(Clone, Debug)]
pub struct SettlementService {
    pool: SqlitePool,
}

impl SettlementService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Settle at the current instant
    pub async fn settle(&self, input: &SettlementInput) -> AppResult<LedgerEntry> {
        self.settle_at(input, &shared::util::now_timestamp()).await
    }

    /// Settle with a caller-pinned timestamp
    ///
    /// Identical input and timestamp land on the same `tx_id`, so repeating the
    /// call overwrites instead of duplicating.
    pub async fn settle_at(&self, input: &SettlementInput, created_at: &str) -> AppResult<LedgerEntry> {
        let entry = build_entry(input, created_at)?;
        let stored = ledger::upsert(&self.pool, &entry).await?;

        tracing::info!(
            tx_id = %stored.tx_id,
            household = %stored.household,
            collector = %stored.collector,
            total = stored.total,
            "Transaction settled"
        );
        Ok(stored)
    }

    /// All entries, newest first
    pub async fn list(&self) -> AppResult<Vec<LedgerEntry>> {
        Ok(ledger::find_all(&self.pool).await?)
    }

    pub async fn find(&self, tx_id: &str) -> AppResult<LedgerEntry> {
        ledger::find_by_tx_id(&self.pool, tx_id)
            .await?
            .ok_or_else(|| AppError::ledger_entry_not_found(tx_id))
    }

    /// Flag an entry as checked by an operator
    pub async fn mark_verified(&self, tx_id: &str) -> AppResult<LedgerEntry> {
        let entry = ledger::set_verified(&self.pool, tx_id, true)
            .await?
            .ok_or_else(|| AppError::ledger_entry_not_found(tx_id))?;
        tracing::info!(tx_id = %tx_id, "Ledger entry verified");
        Ok(entry)
    }
}
