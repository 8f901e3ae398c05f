//! Pickup Request Repository

use super::RepoResult;
use shared::models::{PickupCreate, PickupRequest, PickupStatus, RequestStats};
use sqlx::{SqliteExecutor, SqlitePool};

/// Outcome of the `OPEN -> ASSIGNED` compare-and-set
#[derive(Debug, Clone, PartialEq)]
pub enum AssignOutcome {
    /// This call won the transition
    Assigned(PickupRequest),
    /// Another call assigned the request first (current row attached)
    AlreadyAssigned(PickupRequest),
    NotFound,
}

pub async fn insert<'e, E>(
    executor: E,
    data: &PickupCreate,
    created_at: &str,
) -> RepoResult<PickupRequest>
where
    E: SqliteExecutor<'e>,
{
    let request = sqlx::query_as::<_, PickupRequest>(
        "INSERT INTO pickup_request (created_at, household, address, material, model_material, weight, notes, photo_ref, status) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'OPEN') RETURNING id, created_at, household, address, material, model_material, weight, notes, photo_ref, status, collector AS assigned_collector, tx_id",
    )
    .bind(created_at)
    .bind(&data.household)
    .bind(&data.address)
    .bind(&data.material)
    .bind(&data.model_material)
    .bind(data.weight)
    .bind(&data.notes)
    .bind(&data.photo_ref)
    .fetch_one(executor)
    .await?;
    Ok(request)
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<PickupRequest>>
where
    E: SqliteExecutor<'e>,
{
    let request = sqlx::query_as::<_, PickupRequest>(
        "SELECT id, created_at, household, address, material, model_material, weight, notes, photo_ref, status, collector AS assigned_collector, tx_id FROM pickup_request WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(request)
}

pub async fn find_by_status(
    pool: &SqlitePool,
    status: PickupStatus,
) -> RepoResult<Vec<PickupRequest>> {
    let requests = sqlx::query_as::<_, PickupRequest>(
        "SELECT id, created_at, household, address, material, model_material, weight, notes, photo_ref, status, collector AS assigned_collector, tx_id FROM pickup_request WHERE status = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(status.as_str())
    .fetch_all(pool)
    .await?;
    Ok(requests)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<PickupRequest>> {
    let requests = sqlx::query_as::<_, PickupRequest>(
        "SELECT id, created_at, household, address, material, model_material, weight, notes, photo_ref, status, collector AS assigned_collector, tx_id FROM pickup_request ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(requests)
}

/// Compare-and-set `OPEN -> ASSIGNED`
///
/// The `status = 'OPEN'` guard makes concurrent accepts race inside SQLite:
/// exactly one UPDATE matches, every other caller sees `AlreadyAssigned`.
pub async fn assign(pool: &SqlitePool, id: i64, collector: &str) -> RepoResult<AssignOutcome> {
    let updated = sqlx::query_as::<_, PickupRequest>(
        "UPDATE pickup_request SET status = 'ASSIGNED', collector = ? WHERE id = ? AND status = 'OPEN' RETURNING id, created_at, household, address, material, model_material, weight, notes, photo_ref, status, collector AS assigned_collector, tx_id",
    )
    .bind(collector)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if let Some(request) = updated {
        return Ok(AssignOutcome::Assigned(request));
    }

    Ok(match find_by_id(pool, id).await? {
        Some(current) => AssignOutcome::AlreadyAssigned(current),
        None => AssignOutcome::NotFound,
    })
}

/// Link the ledger entry produced for this request
pub async fn set_tx_id<'e, E>(executor: E, id: i64, tx_id: &str) -> RepoResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query("UPDATE pickup_request SET tx_id = ? WHERE id = ?")
        .bind(tx_id)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn stats(pool: &SqlitePool) -> RepoResult<RequestStats> {
    let stats = sqlx::query_as::<_, RequestStats>(
        "SELECT COUNT(*) AS total, COALESCE(SUM(CASE WHEN status = 'OPEN' THEN 1 ELSE 0 END), 0) AS open, COALESCE(SUM(CASE WHEN status = 'ASSIGNED' THEN 1 ELSE 0 END), 0) AS assigned FROM pickup_request",
    )
    .fetch_one(pool)
    .await?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    fn payload(household: &str, material: &str, weight: f64) -> PickupCreate {
        PickupCreate {
            household: household.into(),
            address: "Jl. Cihampelas 12".into(),
            material: material.into(),
            weight,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_starts_open_without_collector() {
        let pool = test_support::pool().await;
        let req = insert(&pool, &payload("H1", "Kertas", 3.0), "2024-05-01T10:00:00.000000")
            .await
            .unwrap();

        assert_eq!(req.status, PickupStatus::Open);
        assert!(req.assigned_collector.is_none());
        assert!(req.tx_id.is_none());
        assert_eq!(req.weight, 3.0);
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let pool = test_support::pool().await;
        let a = insert(&pool, &payload("H1", "Kertas", 1.0), "2024-05-01T10:00:00.000000")
            .await
            .unwrap();
        let b = insert(&pool, &payload("H2", "Kaca", 1.0), "2024-05-01T10:00:00.000000")
            .await
            .unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_assign_compare_and_set() {
        let pool = test_support::pool().await;
        let req = insert(&pool, &payload("H1", "Logam", 4.0), "2024-05-01T10:00:00.000000")
            .await
            .unwrap();

        let first = assign(&pool, req.id, "Pengepul A").await.unwrap();
        let AssignOutcome::Assigned(assigned) = first else {
            panic!("expected first assign to win, got {first:?}");
        };
        assert_eq!(assigned.status, PickupStatus::Assigned);
        assert_eq!(assigned.assigned_collector.as_deref(), Some("Pengepul A"));

        let second = assign(&pool, req.id, "Bank Sampah C").await.unwrap();
        let AssignOutcome::AlreadyAssigned(current) = second else {
            panic!("expected conflict, got {second:?}");
        };
        assert_eq!(current.assigned_collector.as_deref(), Some("Pengepul A"));
    }

    #[tokio::test]
    async fn test_assign_unknown_id() {
        let pool = test_support::pool().await;
        assert_eq!(
            assign(&pool, 404, "Pengepul A").await.unwrap(),
            AssignOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_status_cannot_leave_assigned() {
        let pool = test_support::pool().await;
        let req = insert(&pool, &payload("H1", "Kertas", 1.0), "2024-05-01T10:00:00.000000")
            .await
            .unwrap();
        assign(&pool, req.id, "Pengepul A").await.unwrap();

        let result = sqlx::query("UPDATE pickup_request SET status = 'OPEN', collector = NULL WHERE id = ?")
            .bind(req.id)
            .execute(&pool)
            .await;
        assert!(result.is_err());

        let current = find_by_id(&pool, req.id).await.unwrap().unwrap();
        assert_eq!(current.status, PickupStatus::Assigned);
    }

    #[tokio::test]
    async fn test_collector_requires_assigned_status() {
        let pool = test_support::pool().await;
        let req = insert(&pool, &payload("H1", "Kertas", 1.0), "2024-05-01T10:00:00.000000")
            .await
            .unwrap();

        let result = sqlx::query("UPDATE pickup_request SET collector = 'Pengepul A' WHERE id = ?")
            .bind(req.id)
            .execute(&pool)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_find_by_status_and_stats() {
        let pool = test_support::pool().await;
        let a = insert(&pool, &payload("H1", "Kertas", 1.0), "2024-05-01T10:00:00.000000")
            .await
            .unwrap();
        insert(&pool, &payload("H2", "Kaca", 2.0), "2024-05-01T11:00:00.000000")
            .await
            .unwrap();
        insert(&pool, &payload("H3", "Logam", 3.0), "2024-05-01T12:00:00.000000")
            .await
            .unwrap();
        assign(&pool, a.id, "Bank Sampah C").await.unwrap();

        let open = find_by_status(&pool, PickupStatus::Open).await.unwrap();
        assert_eq!(open.len(), 2);
        assert!(open.iter().all(|r| r.status == PickupStatus::Open));
        // newest first
        assert_eq!(open[0].household, "H3");

        let all = find_all(&pool).await.unwrap();
        assert_eq!(all.len(), 3);

        let stats = stats(&pool).await.unwrap();
        assert_eq!(
            stats,
            RequestStats {
                total: 3,
                open: 2,
                assigned: 1
            }
        );
    }

    #[tokio::test]
    async fn test_stats_empty_store() {
        let pool = test_support::pool().await;
        assert_eq!(stats(&pool).await.unwrap(), RequestStats::default());
    }

    #[tokio::test]
    async fn test_set_tx_id() {
        let pool = test_support::pool().await;
        let req = insert(&pool, &payload("H1", "Kertas", 1.0), "2024-05-01T10:00:00.000000")
            .await
            .unwrap();
        assert!(set_tx_id(&pool, req.id, "abc123").await.unwrap());
        assert!(!set_tx_id(&pool, 999, "abc123").await.unwrap());

        let current = find_by_id(&pool, req.id).await.unwrap().unwrap();
        assert_eq!(current.tx_id.as_deref(), Some("abc123"));
    }
}
