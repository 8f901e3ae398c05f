//! Scheduler
//!
//! Records pickup requests and moves them `OPEN -> ASSIGNED`. Creating a
//! request and assigning a collector are separate calls; creation never
//! assigns, whatever collector the household picked.

use sqlx::SqlitePool;

use crate::db::repository::pickup::{self, AssignOutcome};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_PHOTO_REF_LEN, validate_optional_text,
    validate_required_text, validate_weight,
};
use shared::error::{AppError, AppResult};
use shared::models::{PickupCreate, PickupHandle, PickupRequest, PickupStatus, RequestStats};

/// Validate a pickup payload before it reaches the store
pub fn validate_pickup(data: &PickupCreate) -> AppResult<()> {
    validate_required_text(&data.household, "household", MAX_NAME_LEN)?;
    validate_required_text(&data.address, "address", MAX_ADDRESS_LEN)?;
    validate_required_text(&data.material, "material", MAX_NAME_LEN)?;
    validate_weight(data.weight)?;
    validate_optional_text(&data.collector, "collector", MAX_NAME_LEN)?;
    validate_optional_text(&data.model_material, "model_material", MAX_NAME_LEN)?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
    validate_optional_text(&data.photo_ref, "photo_ref", MAX_PHOTO_REF_LEN)?;
    Ok(())
}

#[derive(Clone, Debug)]
pub struct Scheduler {
    pool: SqlitePool,
}

impl Scheduler {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an `OPEN` request
    pub async fn create_request(&self, data: &PickupCreate) -> AppResult<PickupRequest> {
        validate_pickup(data)?;
        let created_at = shared::util::now_timestamp();
        let request = pickup::insert(&self.pool, data, &created_at).await?;

        tracing::info!(
            id = request.id,
            household = %request.household,
            material = %request.material,
            weight = request.weight,
            "Pickup request created"
        );
        Ok(request)
    }

    /// Record the request and hand back a tracking handle
    ///
    /// The chosen collector is echoed in the handle only; the request stays
    /// `OPEN` until [`Scheduler::assign_collector`] succeeds.
    pub async fn create_pickup(&self, data: &PickupCreate) -> AppResult<PickupHandle> {
        let request = self.create_request(data).await?;
        Ok(PickupHandle {
            pickup_id: uuid::Uuid::new_v4().to_string(),
            request_id: request.id,
            status: PickupHandle::SCHEDULED.to_string(),
            collector: data.collector.clone(),
        })
    }

    /// Compare-and-set `OPEN -> ASSIGNED`
    ///
    /// Of any number of concurrent callers exactly one wins; the rest get
    /// `PickupAlreadyAssigned`. The collector is a free-text name and need not
    /// appear in the collector list.
    pub async fn assign_collector(&self, id: i64, collector: &str) -> AppResult<PickupRequest> {
        validate_required_text(collector, "collector", MAX_NAME_LEN)?;

        match pickup::assign(&self.pool, id, collector).await? {
            AssignOutcome::Assigned(request) => {
                tracing::info!(id, collector = %collector, "Pickup request assigned");
                Ok(request)
            }
            AssignOutcome::AlreadyAssigned(current) => {
                tracing::warn!(
                    id,
                    collector = %collector,
                    holder = ?current.assigned_collector,
                    "Assign lost: request already assigned"
                );
                Err(AppError::pickup_already_assigned(id))
            }
            AssignOutcome::NotFound => Err(AppError::pickup_not_found(id)),
        }
    }

    /// Requests with `status`, or all requests; newest first
    pub async fn list_requests(&self, status: Option<PickupStatus>) -> AppResult<Vec<PickupRequest>> {
        let requests = match status {
            Some(status) => pickup::find_by_status(&self.pool, status).await?,
            None => pickup::find_all(&self.pool).await?,
        };
        Ok(requests)
    }

    pub async fn find_request(&self, id: i64) -> AppResult<PickupRequest> {
        pickup::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::pickup_not_found(id))
    }

    pub async fn stats(&self) -> AppResult<RequestStats> {
        Ok(pickup::stats(&self.pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;
    use shared::error::ErrorCode;

    async fn scheduler() -> Scheduler {
        Scheduler::new(test_support::pool().await)
    }

    fn create(household: &str, material: &str, weight: f64) -> PickupCreate {
        PickupCreate {
            household: household.into(),
            address: "Jl. Dago 1".into(),
            material: material.into(),
            weight,
            collector: Some("Pengepul B".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_pickup_returns_handle_and_leaves_open() {
        let s = scheduler().await;
        let handle = s.create_pickup(&create("H1", "Plastik PET", 2.0)).await.unwrap();

        assert_eq!(handle.status, "SCHEDULED");
        assert_eq!(handle.collector.as_deref(), Some("Pengepul B"));
        assert!(uuid::Uuid::parse_str(&handle.pickup_id).is_ok());

        let request = s.find_request(handle.request_id).await.unwrap();
        assert_eq!(request.status, PickupStatus::Open);
        assert!(request.assigned_collector.is_none());
    }

    #[tokio::test]
    async fn test_handles_are_unique() {
        let s = scheduler().await;
        let a = s.create_pickup(&create("H1", "Kertas", 1.0)).await.unwrap();
        let b = s.create_pickup(&create("H1", "Kertas", 1.0)).await.unwrap();
        assert_ne!(a.pickup_id, b.pickup_id);
        assert_ne!(a.request_id, b.request_id);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid() {
        let s = scheduler().await;
        assert_eq!(
            s.create_request(&create("H1", "Kertas", -2.0)).await.unwrap_err().code,
            ErrorCode::InvalidWeight
        );
        assert_eq!(
            s.create_request(&create("", "Kertas", 2.0)).await.unwrap_err().code,
            ErrorCode::ValidationFailed
        );
        assert!(s.list_requests(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_weight_is_accepted() {
        let s = scheduler().await;
        let req = s.create_request(&create("H1", "Kertas", 0.0)).await.unwrap();
        assert_eq!(req.weight, 0.0);
    }

    #[tokio::test]
    async fn test_assign_collector() {
        let s = scheduler().await;
        let req = s.create_request(&create("H1", "Plastik PET", 2.0)).await.unwrap();

        let assigned = s.assign_collector(req.id, "Pengepul B").await.unwrap();
        assert_eq!(assigned.status, PickupStatus::Assigned);
        assert_eq!(assigned.assigned_collector.as_deref(), Some("Pengepul B"));

        let err = s.assign_collector(req.id, "Pengepul A").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PickupAlreadyAssigned);

        let err = s.assign_collector(9999, "Pengepul A").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PickupNotFound);

        let other = s.create_request(&create("H2", "Kertas", 1.0)).await.unwrap();
        let err = s.assign_collector(other.id, "  ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(s.find_request(other.id).await.unwrap().status, PickupStatus::Open);
    }

    #[tokio::test]
    async fn test_assign_collector_outside_directory() {
        let s = scheduler().await;
        let req = s.create_request(&create("H1", "Kertas", 1.0)).await.unwrap();

        let assigned = s.assign_collector(req.id, "Pengepul X").await.unwrap();
        assert_eq!(assigned.status, PickupStatus::Assigned);
        assert_eq!(assigned.assigned_collector.as_deref(), Some("Pengepul X"));
    }

    #[tokio::test]
    async fn test_concurrent_assign_has_one_winner() {
        let s = scheduler().await;
        let id = s.create_request(&create("H1", "Plastik PET", 2.0)).await.unwrap().id;

        let tasks: Vec<_> = ["Pengepul A", "Pengepul B", "Bank Sampah C", "Pengepul A"]
            .into_iter()
            .map(|name| {
                let s = s.clone();
                tokio::spawn(async move { s.assign_collector(id, name).await })
            })
            .collect();

        let mut winners = 0;
        let mut conflicts = 0;
        for t in tasks {
            match t.await.unwrap() {
                Ok(_) => winners += 1,
                Err(e) if e.code == ErrorCode::PickupAlreadyAssigned => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(winners, 1);
        assert_eq!(conflicts, 3);
    }

    #[tokio::test]
    async fn test_list_and_stats() {
        let s = scheduler().await;
        let a = s.create_request(&create("H1", "Kertas", 1.0)).await.unwrap();
        s.create_request(&create("H2", "Kaca", 1.0)).await.unwrap();
        s.assign_collector(a.id, "Bank Sampah C").await.unwrap();

        assert_eq!(s.list_requests(Some(PickupStatus::Open)).await.unwrap().len(), 1);
        assert_eq!(s.list_requests(Some(PickupStatus::Assigned)).await.unwrap().len(), 1);
        assert_eq!(s.list_requests(None).await.unwrap().len(), 2);

        let stats = s.stats().await.unwrap();
        assert_eq!((stats.total, stats.open, stats.assigned), (2, 1, 1));
    }
}
