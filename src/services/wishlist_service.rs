//! Wishlist service.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{Page, PageRequest, Wishlist, WishlistData, WishlistSortKey};
use crate::repositories::WishlistRepository;

#[derive(Clone)]
pub struct WishlistService {
    repo: Arc<dyn WishlistRepository>,
}

impl WishlistService {
    pub fn new(repo: Arc<dyn WishlistRepository>) -> Self {
        Self { repo }
    }

    /// Saves a wishlist. See [`WishlistRepository::save`] for the id semantics.
    pub async fn save(&self, id: Option<i64>, data: WishlistData) -> AppResult<Wishlist> {
        tracing::debug!("Request to save Wishlist : {:?} {:?}", id, data);
        self.repo.save(id, data).await
    }

    pub async fn find_all(
        &self,
        request: &PageRequest<WishlistSortKey>,
    ) -> AppResult<Page<Wishlist>> {
        tracing::debug!("Request to get all Wishlists : {:?}", request);
        self.repo.find_all(request).await
    }

    pub async fn find_one(&self, id: i64) -> AppResult<Option<Wishlist>> {
        tracing::debug!("Request to get Wishlist : {}", id);
        self.repo.find_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        tracing::debug!("Request to delete Wishlist : {}", id);
        let removed = self.repo.delete(id).await?;
        if !removed {
            tracing::debug!(id, "Wishlist to delete was already absent");
        }
        Ok(())
    }

    /// Wishlists owned by the caller identified by `login`.
    pub async fn find_by_current_user(&self, login: &str) -> AppResult<Vec<Wishlist>> {
        tracing::debug!("Request to get Wishlists of current user : {}", login);
        self.repo.find_by_current_user(login).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::Sort;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRepository {
        calls: Mutex<Vec<String>>,
    }

    fn owned(id: i64, user_id: i64) -> Wishlist {
        WishlistData {
            name: format!("list {}", id),
            creation_date: None,
            hidden: false,
            user_id: Some(user_id),
        }
        .into_wishlist(id)
    }

    #[async_trait]
    impl WishlistRepository for RecordingRepository {
        async fn save(&self, id: Option<i64>, data: WishlistData) -> AppResult<Wishlist> {
            self.calls.lock().unwrap().push(format!("save {:?}", id));
            Ok(data.into_wishlist(id.unwrap_or(1)))
        }

        async fn find_by_id(&self, id: i64) -> AppResult<Option<Wishlist>> {
            self.calls.lock().unwrap().push(format!("find {}", id));
            Ok(Some(owned(id, 1)))
        }

        async fn find_all(
            &self,
            request: &PageRequest<WishlistSortKey>,
        ) -> AppResult<Page<Wishlist>> {
            self.calls.lock().unwrap().push("find_all".to_string());
            Ok(Page::new(vec![owned(2, 1)], 1, request))
        }

        async fn delete(&self, id: i64) -> AppResult<bool> {
            self.calls.lock().unwrap().push(format!("delete {}", id));
            Err(AppError::Database {
                operation: "delete wishlist".to_string(),
                source: anyhow::anyhow!("violates foreign key constraint"),
            })
        }

        async fn find_by_current_user(&self, login: &str) -> AppResult<Vec<Wishlist>> {
            self.calls.lock().unwrap().push(format!("mine {}", login));
            Ok(match login {
                "alice" => vec![owned(3, 1), owned(4, 1)],
                _ => vec![],
            })
        }
    }

    #[tokio::test]
    async fn test_service_delegates_to_repository() {
        let repo = Arc::new(RecordingRepository::default());
        let service = WishlistService::new(repo.clone());

        let data = WishlistData {
            name: "birthday".to_string(),
            creation_date: None,
            hidden: true,
            user_id: None,
        };
        let saved = service.save(None, data).await.unwrap();
        assert_eq!(saved.id, 1);
        assert_eq!(saved.name, "birthday");
        assert_eq!(service.find_one(8).await.unwrap().map(|w| w.id), Some(8));

        let request = PageRequest {
            page: 0,
            size: 20,
            sort: Sort::default(),
        };
        assert_eq!(service.find_all(&request).await.unwrap().total_elements, 1);

        let calls = repo.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["save None", "find 8", "find_all"]);
    }

    #[tokio::test]
    async fn test_find_by_current_user_passes_login_through() {
        let repo = Arc::new(RecordingRepository::default());
        let service = WishlistService::new(repo.clone());

        let ids: Vec<i64> = service
            .find_by_current_user("alice")
            .await
            .unwrap()
            .iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec![3, 4]);
        assert!(service.find_by_current_user("bob").await.unwrap().is_empty());

        let calls = repo.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["mine alice", "mine bob"]);
    }

    #[tokio::test]
    async fn test_repository_errors_propagate_unchanged() {
        let service = WishlistService::new(Arc::new(RecordingRepository::default()));
        let err = service.delete(5).await.unwrap_err();
        assert!(
            matches!(err, AppError::Database { ref operation, .. } if operation == "delete wishlist")
        );
    }
}
