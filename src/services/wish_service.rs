//! Wish service.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{Page, PageRequest, Wish, WishData, WishSortKey};
use crate::repositories::WishRepository;

#[derive(Clone)]
pub struct WishService {
    repo: Arc<dyn WishRepository>,
}

impl WishService {
    pub fn new(repo: Arc<dyn WishRepository>) -> Self {
        Self { repo }
    }

    /// Saves a wish. See [`WishRepository::save`] for the id semantics.
    pub async fn save(&self, id: Option<i64>, data: WishData) -> AppResult<Wish> {
        tracing::debug!("Request to save Wish : {:?} {:?}", id, data);
        self.repo.save(id, data).await
    }

    pub async fn find_all(&self, request: &PageRequest<WishSortKey>) -> AppResult<Page<Wish>> {
        tracing::debug!("Request to get all Wishes : {:?}", request);
        self.repo.find_all(request).await
    }

    pub async fn find_one(&self, id: i64) -> AppResult<Option<Wish>> {
        tracing::debug!("Request to get Wish : {}", id);
        self.repo.find_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        tracing::debug!("Request to delete Wish : {}", id);
        let removed = self.repo.delete(id).await?;
        if !removed {
            tracing::debug!(id, "Wish to delete was already absent");
        }
        Ok(())
    }
}
