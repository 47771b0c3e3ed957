use bigdecimal::BigDecimal;
use diesel::prelude::*;

/// Persisted wish row.
///
/// Rows always carry an id and compare by it.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::wishes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Wish {
    pub id: i64,
    pub product_id: i64,
    pub price: BigDecimal,
    pub wishlist_id: Option<i64>,
}

impl PartialEq for Wish {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Wish {}

/// Column values written on insert and update.
///
/// `treat_none_as_null` makes an update clear `wishlist_id` when the payload
/// drops the reference.
#[derive(Debug, Insertable, AsChangeset, Clone, PartialEq)]
#[diesel(table_name = crate::schema::wishes)]
#[diesel(treat_none_as_null = true)]
pub struct WishData {
    pub product_id: i64,
    pub price: BigDecimal,
    pub wishlist_id: Option<i64>,
}

impl WishData {
    pub fn into_wish(self, id: i64) -> Wish {
        Wish {
            id,
            product_id: self.product_id,
            price: self.price,
            wishlist_id: self.wishlist_id,
        }
    }
}
