use diesel::prelude::*;
use jiff_diesel::Date;

/// Persisted wishlist row.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::wishlists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Wishlist {
    pub id: i64,
    pub name: String,
    pub creation_date: Option<Date>,
    pub hidden: bool,
    pub user_id: Option<i64>,
}

impl PartialEq for Wishlist {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Wishlist {}

/// Column values written on insert and update.
#[derive(Debug, Insertable, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::wishlists)]
#[diesel(treat_none_as_null = true)]
pub struct WishlistData {
    pub name: String,
    pub creation_date: Option<Date>,
    pub hidden: bool,
    pub user_id: Option<i64>,
}

impl WishlistData {
    pub fn into_wishlist(self, id: i64) -> Wishlist {
        Wishlist {
            id,
            name: self.name,
            creation_date: self.creation_date,
            hidden: self.hidden,
            user_id: self.user_id,
        }
    }
}
