mod page;
mod wish;
mod wishlist;

pub use page::{Page, PageRequest, Sort, SortDirection, SortKey, WishSortKey, WishlistSortKey};
pub use wish::{Wish, WishData};
pub use wishlist::{Wishlist, WishlistData};
