//! Wishlist request and response DTOs.

use jiff::civil::Date;
use jiff_diesel::ToDiesel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::IdRef;
use crate::error::{AppError, AppResult};
use crate::models::{Wishlist, WishlistData};

/// Body of `POST` and `PUT /api/wishlists`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistPayload {
    pub id: Option<i64>,

    #[validate(
        required(message = "must not be null"),
        length(min = 1, message = "must not be empty")
    )]
    #[schema(example = "Birthday")]
    pub name: Option<String>,

    #[schema(value_type = Option<String>, format = Date, example = "2024-12-24")]
    pub creation_date: Option<Date>,

    /// `false` when omitted or null
    pub hidden: Option<bool>,

    pub user: Option<IdRef>,
}

impl PartialEq for WishlistPayload {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

impl WishlistPayload {
    pub fn into_parts(self) -> AppResult<(Option<i64>, WishlistData)> {
        let name = self.name.ok_or_else(|| AppError::Validation {
            field: "name".to_string(),
            reason: "must not be null".to_string(),
        })?;

        Ok((
            self.id,
            WishlistData {
                name,
                creation_date: self.creation_date.map(|d| d.to_diesel()),
                hidden: self.hidden.unwrap_or(false),
                user_id: self.user.map(|u| u.id),
            },
        ))
    }
}

/// Persisted wishlist as returned by the API. Wishes are not embedded.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistResponse {
    pub id: i64,
    pub name: String,
    #[schema(value_type = Option<String>, format = Date)]
    pub creation_date: Option<Date>,
    pub hidden: bool,
    pub user: Option<IdRef>,
}

impl PartialEq for WishlistResponse {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl From<Wishlist> for WishlistResponse {
    fn from(wishlist: Wishlist) -> Self {
        Self {
            id: wishlist.id,
            name: wishlist.name,
            creation_date: wishlist.creation_date.map(|d| d.to_jiff()),
            hidden: wishlist.hidden,
            user: wishlist.user_id.map(IdRef::new),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hidden_defaults_to_false() {
        let payload: WishlistPayload = serde_json::from_value(json!({"name": "Books"})).unwrap();
        let (id, data) = payload.into_parts().unwrap();
        assert_eq!(id, None);
        assert!(!data.hidden);
        assert!(data.creation_date.is_none());
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let payload: WishlistPayload = serde_json::from_value(json!({"name": ""})).unwrap();
        assert!(payload.validate().is_err());

        let payload: WishlistPayload = serde_json::from_value(json!({"hidden": true})).unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_date_round_trips_through_row() {
        let payload: WishlistPayload = serde_json::from_value(json!({
            "id": 3,
            "name": "Holidays",
            "creationDate": "2024-12-24",
            "hidden": true,
            "user": {"id": 9}
        }))
        .unwrap();
        let (id, data) = payload.into_parts().unwrap();
        let body = serde_json::to_value(WishlistResponse::from(data.into_wishlist(id.unwrap())))
            .unwrap();

        assert_eq!(
            body,
            json!({
                "id": 3,
                "name": "Holidays",
                "creationDate": "2024-12-24",
                "hidden": true,
                "user": {"id": 9}
            })
        );
    }

    #[test]
    fn test_payload_equality_requires_ids() {
        let a: WishlistPayload = serde_json::from_value(json!({"id": 1, "name": "a"})).unwrap();
        let b: WishlistPayload = serde_json::from_value(json!({"id": 1, "name": "b"})).unwrap();
        let c: WishlistPayload = serde_json::from_value(json!({"name": "a"})).unwrap();
        assert_eq!(a, b);
        assert_ne!(c, c.clone());
    }
}
