//! Token Balance Repository

use super::{RepoError, RepoResult};
use shared::models::TokenBalance;
use sqlx::{SqliteExecutor, SqlitePool};

/// Add `tokens` to the household balance, creating it on first award
///
/// A single upsert statement, so concurrent awards never lose an increment.
/// Returns the balance after the addition, or `None` (nothing written) when
/// the sum would exceed `i64::MAX`.
pub async fn add<'e, E>(executor: E, household: &str, tokens: i64) -> RepoResult<Option<i64>>
where
    E: SqliteExecutor<'e>,
{
    if tokens < 0 {
        return Err(RepoError::Validation(format!("token award must not be negative, got {tokens}")));
    }
    let balance: Option<i64> = sqlx::query_scalar(
        "INSERT INTO token_balance (household, balance, updated_at) VALUES (?, ?, ?) ON CONFLICT(household) DO UPDATE SET balance = balance + excluded.balance, updated_at = excluded.updated_at WHERE token_balance.balance <= ? - excluded.balance RETURNING balance",
    )
    .bind(household)
    .bind(tokens)
    .bind(shared::util::now_millis())
    .bind(i64::MAX)
    .fetch_optional(executor)
    .await?;
    Ok(balance)
}

pub async fn find_balance(pool: &SqlitePool, household: &str) -> RepoResult<Option<i64>> {
    let balance: Option<i64> =
        sqlx::query_scalar("SELECT balance FROM token_balance WHERE household = ?")
            .bind(household)
            .fetch_optional(pool)
            .await?;
    Ok(balance)
}

/// All balances, highest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<TokenBalance>> {
    let balances = sqlx::query_as::<_, TokenBalance>(
        "SELECT household, balance FROM token_balance ORDER BY balance DESC, household",
    )
    .fetch_all(pool)
    .await?;
    Ok(balances)
}
