//! Wish request and response DTOs.

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::IdRef;
use crate::error::{AppError, AppResult};
use crate::models::{Wish, WishData};

/// Digits allowed left of the decimal point by `NUMERIC(10, 2)`.
const PRICE_INTEGER_DIGITS: i64 = 8;
const PRICE_SCALE: i64 = 2;

/// Body of `POST` and `PUT /api/wishes`.
///
/// Two payloads are equal only when both carry the same id.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishPayload {
    /// Must be absent on create
    pub id: Option<i64>,

    #[validate(required(message = "must not be null"))]
    #[schema(example = 1001)]
    pub product_id: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_price")]
    #[validate(
        required(message = "must not be null"),
        custom(function = "validate_price")
    )]
    #[schema(value_type = Option<String>, example = "19.99")]
    pub price: Option<BigDecimal>,

    pub wishlist: Option<IdRef>,
}

impl PartialEq for WishPayload {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

/// Accepts a price as a JSON string or number.
///
/// Fractional numbers arrive as `f64`; their shortest decimal form is parsed
/// so `19.99` stays `19.99` instead of its binary expansion.
fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PriceValue {
        Int(i64),
        Float(f64),
        Str(String),
    }

    let text = match Option::<PriceValue>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(PriceValue::Int(i)) => return Ok(Some(BigDecimal::from(i))),
        Some(PriceValue::Float(f)) => f.to_string(),
        Some(PriceValue::Str(s)) => s,
    };
    text.trim()
        .parse::<BigDecimal>()
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid price '{}': {}", text, e)))
}

fn validate_price(price: &BigDecimal) -> Result<(), ValidationError> {
    if *price < BigDecimal::zero() {
        return Err(ValidationError::new("price")
            .with_message("must be greater than or equal to 0".into()));
    }

    let normalized = price.normalized();
    let (_, scale) = normalized.as_bigint_and_exponent();
    let integer_digits = normalized.digits() as i64 - scale;
    if scale > PRICE_SCALE || integer_digits > PRICE_INTEGER_DIGITS {
        return Err(ValidationError::new("digits").with_message(
            "numeric value out of bounds (<8 digits>.<2 digits> expected)".into(),
        ));
    }
    Ok(())
}

impl WishPayload {
    /// Splits a validated payload into its id and column values.
    pub fn into_parts(self) -> AppResult<(Option<i64>, WishData)> {
        let product_id = self.product_id.ok_or_else(|| AppError::Validation {
            field: "product_id".to_string(),
            reason: "must not be null".to_string(),
        })?;
        let price = self.price.ok_or_else(|| AppError::Validation {
            field: "price".to_string(),
            reason: "must not be null".to_string(),
        })?;

        Ok((
            self.id,
            WishData {
                product_id,
                price,
                wishlist_id: self.wishlist.map(|w| w.id),
            },
        ))
    }
}

/// Persisted wish as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishResponse {
    pub id: i64,
    pub product_id: i64,
    #[schema(value_type = String, example = "19.99")]
    pub price: BigDecimal,
    pub wishlist: Option<IdRef>,
}

impl PartialEq for WishResponse {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl From<Wish> for WishResponse {
    fn from(wish: Wish) -> Self {
        Self {
            id: wish.id,
            product_id: wish.product_id,
            price: wish.price,
            wishlist: wish.wishlist_id.map(IdRef::new),
        }
    }
}
