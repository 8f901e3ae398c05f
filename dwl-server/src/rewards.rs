//! Reward Service
//!
//! Households earn `floor(weight * 10)` tokens per settled pickup. Balances only
//! grow; there is no redemption.

use sqlx::SqlitePool;

use crate::db::repository::{ledger, token};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text, validate_weight};
use shared::error::{AppError, AppResult};
use shared::models::{HouseholdSummary, TokenAward, TokenAwardResult, TokenBalance};

/// Tokens granted per kg
pub const TOKENS_PER_KG: f64 = 10.0;

/// Tokens for a pickup of `weight` kg (caller validates the weight)
pub fn tokens_for(weight: f64) -> i64 {
    (weight * TOKENS_PER_KG).floor() as i64
}

#[derive(Clone, Debug)]
pub struct RewardService {
    pool: SqlitePool,
}

impl RewardService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Credit tokens for `award.weight`; returns the tokens granted by this call
    pub async fn award(&self, award: &TokenAward) -> AppResult<TokenAwardResult> {
        validate_required_text(&award.household, "household", MAX_NAME_LEN)?;
        validate_weight(award.weight)?;

        let tokens = tokens_for(award.weight);
        let balance = token::add(&self.pool, &award.household, tokens)
            .await?
            .ok_or_else(|| AppError::balance_overflow(award.household.clone()))?;

        tracing::info!(
            household = %award.household,
            material = %award.material,
            tokens,
            balance,
            "Tokens awarded"
        );
        Ok(TokenAwardResult {
            household: award.household.clone(),
            tokens,
            balance,
        })
    }

    /// Current balance; households never awarded hold zero
    pub async fn balance(&self, household: &str) -> AppResult<i64> {
        Ok(token::find_balance(&self.pool, household).await?.unwrap_or(0))
    }

    pub async fn balances(&self) -> AppResult<Vec<TokenBalance>> {
        Ok(token::find_all(&self.pool).await?)
    }

    /// Dashboard figures for one household, derived from the ledger
    pub async fn summary(&self, household: &str) -> AppResult<HouseholdSummary> {
        let totals = ledger::totals_by_material(&self.pool, household).await?;
        let tokens = self.balance(household).await?;
        Ok(HouseholdSummary::from_totals(household, &totals, tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;
    use crate::ledger::SettlementService;
    use shared::error::ErrorCode;
    use crate::utils::validation::MAX_WEIGHT_KG;
    use shared::models::SettlementInput;

    fn award(household: &str, weight: f64) -> TokenAward {
        TokenAward {
            household: household.into(),
            material: "Kertas".into(),
            weight,
        }
    }

    #[test]
    fn test_tokens_for() {
        assert_eq!(tokens_for(3.2), 32);
        assert_eq!(tokens_for(1.0), 10);
        assert_eq!(tokens_for(0.09), 0);
        assert_eq!(tokens_for(0.0), 0);
        assert_eq!(tokens_for(2.0), 20);
    }

    #[tokio::test]
    async fn test_award_accumulates() {
        let service = RewardService::new(test_support::pool().await);

        let first = service.award(&award("H1", 3.2)).await.unwrap();
        assert_eq!(first.tokens, 32);
        assert_eq!(first.balance, 32);

        let second = service.award(&award("H1", 1.0)).await.unwrap();
        assert_eq!(second.tokens, 10);
        assert_eq!(service.balance("H1").await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_unknown_household_has_zero() {
        let service = RewardService::new(test_support::pool().await);
        assert_eq!(service.balance("nobody").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_award_rejects_bad_weight() {
        let service = RewardService::new(test_support::pool().await);
        let err = service.award(&award("H1", -1.0)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidWeight);
        assert!(service.award(&award("H1", f64::NAN)).await.is_err());
        assert_eq!(service.balance("H1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_award_weight_bounds() {
        let service = RewardService::new(test_support::pool().await);

        let max = service.award(&award("H1", MAX_WEIGHT_KG)).await.unwrap();
        assert_eq!(max.tokens, 1_000_000);

        for weight in [MAX_WEIGHT_KG + 0.5, 1e18, f64::MAX] {
            let err = service.award(&award("H1", weight)).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidWeight);
        }

        // balance untouched by the rejected awards and still readable
        assert_eq!(service.balance("H1").await.unwrap(), 1_000_000);
        assert_eq!(service.award(&award("H1", 1.0)).await.unwrap().balance, 1_000_010);
    }

    #[tokio::test]
    async fn test_award_overflowing_balance_is_refused() {
        let pool = test_support::pool().await;
        token::add(&pool, "H1", i64::MAX - 5).await.unwrap();
        let service = RewardService::new(pool);

        let err = service.award(&award("H1", 1.0)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BalanceOverflow);
        assert_eq!(service.balance("H1").await.unwrap(), i64::MAX - 5);

        // a small award that still fits goes through
        assert_eq!(service.award(&award("H1", 0.5)).await.unwrap().balance, i64::MAX);
    }

    #[tokio::test]
    async fn test_concurrent_awards_do_not_lose_updates() {
        let service = RewardService::new(test_support::pool().await);
        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.award(&award("H7", 1.0)).await })
            })
            .collect();
        for t in tasks {
            t.await.unwrap().unwrap();
        }
        assert_eq!(service.balance("H7").await.unwrap(), 200);
    }

    #[tokio::test]
    async fn test_summary() {
        let pool = test_support::pool().await;
        let settlement = SettlementService::new(pool.clone());
        let service = RewardService::new(pool);

        for (material, weight, price) in [("Kertas", 2.0, 3000.0), ("Kertas", 1.0, 3000.0), ("Logam", 0.5, 3000.0)] {
            settlement
                .settle(&SettlementInput {
                    household: "H1".into(),
                    collector: "Bank Sampah C".into(),
                    material: material.into(),
                    weight,
                    price_per_kg: price,
                })
                .await
                .unwrap();
        }
        service.award(&award("H1", 3.5)).await.unwrap();

        let summary = service.summary("H1").await.unwrap();
        assert_eq!(summary.total_kg, 3.5);
        assert_eq!(summary.income, 10500.0);
        assert_eq!(summary.by_material.get("Kertas"), Some(&3.0));
        assert_eq!(summary.tokens, 35);
    }
}
