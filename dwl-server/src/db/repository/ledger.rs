//! Ledger Entry Repository

use super::RepoResult;
use shared::models::{LedgerEntry, MaterialTotal};
use sqlx::{SqliteExecutor, SqlitePool};

/// Insert or replace by `tx_id`
///
/// Re-settling identical content lands on the same key; every column is
/// overwritten, `verified` included.
pub async fn upsert<'e, E>(executor: E, entry: &LedgerEntry) -> RepoResult<LedgerEntry>
where
    E: SqliteExecutor<'e>,
{
    let stored = sqlx::query_as::<_, LedgerEntry>(
        "INSERT INTO ledger_entry (tx_id, created_at, household, collector, material, weight, price_per_kg, total, verified) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) ON CONFLICT(tx_id) DO UPDATE SET created_at = excluded.created_at, household = excluded.household, collector = excluded.collector, material = excluded.material, weight = excluded.weight, price_per_kg = excluded.price_per_kg, total = excluded.total, verified = excluded.verified RETURNING tx_id, created_at, household, collector, material, weight, price_per_kg, total, verified",
    )
    .bind(&entry.tx_id)
    .bind(&entry.created_at)
    .bind(&entry.household)
    .bind(&entry.collector)
    .bind(&entry.material)
    .bind(entry.weight)
    .bind(entry.price_per_kg)
    .bind(entry.total)
    .bind(entry.verified)
    .fetch_one(executor)
    .await?;
    Ok(stored)
}

pub async fn find_by_tx_id(pool: &SqlitePool, tx_id: &str) -> RepoResult<Option<LedgerEntry>> {
    let entry = sqlx::query_as::<_, LedgerEntry>(
        "SELECT tx_id, created_at, household, collector, material, weight, price_per_kg, total, verified FROM ledger_entry WHERE tx_id = ?",
    )
    .bind(tx_id)
    .fetch_optional(pool)
    .await?;
    Ok(entry)
}

/// All entries, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<LedgerEntry>> {
    let entries = sqlx::query_as::<_, LedgerEntry>(
        "SELECT tx_id, created_at, household, collector, material, weight, price_per_kg, total, verified FROM ledger_entry ORDER BY created_at DESC, rowid DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

pub async fn set_verified(
    pool: &SqlitePool,
    tx_id: &str,
    verified: bool,
) -> RepoResult<Option<LedgerEntry>> {
    let entry = sqlx::query_as::<_, LedgerEntry>(
        "UPDATE ledger_entry SET verified = ? WHERE tx_id = ? RETURNING tx_id, created_at, household, collector, material, weight, price_per_kg, total, verified",
    )
    .bind(verified)
    .bind(tx_id)
    .fetch_optional(pool)
    .await?;
    Ok(entry)
}

/// Weight and income per material for one household
pub async fn totals_by_material(
    pool: &SqlitePool,
    household: &str,
) -> RepoResult<Vec<MaterialTotal>> {
    let totals = sqlx::query_as::<_, MaterialTotal>(
        "SELECT material, COALESCE(SUM(weight), 0.0) AS weight, COALESCE(SUM(total), 0.0) AS income FROM ledger_entry WHERE household = ? GROUP BY material ORDER BY material",
    )
    .bind(household)
    .fetch_all(pool)
    .await?;
    Ok(totals)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ledger_entry")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
