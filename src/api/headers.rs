//! Alert and pagination response headers.
//!
//! Alert headers carry a translation key for the front-end
//! (`wishstoreApp.wish.created`) and its parameter. Pagination headers carry
//! the total row count and RFC 5988 `Link` relations.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::models::Page;

pub const APPLICATION_NAME: &str = "wishstoreApp";

pub const ALERT_HEADER: HeaderName = HeaderName::from_static("x-wishstoreapp-alert");
pub const ERROR_HEADER: HeaderName = HeaderName::from_static("x-wishstoreapp-error");
pub const PARAMS_HEADER: HeaderName = HeaderName::from_static("x-wishstoreapp-params");
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(_) => tracing::warn!(header = %name, value, "Skipping non-visible header value"),
    }
}

pub fn alert(message: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, ALERT_HEADER, message);
    insert(&mut headers, PARAMS_HEADER, param);
    headers
}

pub fn entity_created(entity: &str, id: i64) -> HeaderMap {
    alert(&format!("{APPLICATION_NAME}.{entity}.created"), &id.to_string())
}

pub fn entity_updated(entity: &str, id: i64) -> HeaderMap {
    alert(&format!("{APPLICATION_NAME}.{entity}.updated"), &id.to_string())
}

pub fn entity_deleted(entity: &str, id: i64) -> HeaderMap {
    alert(&format!("{APPLICATION_NAME}.{entity}.deleted"), &id.to_string())
}

/// Headers of a rejected request: `error.<key>` plus the entity name.
pub fn failure_alert(entity: &str, error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, ERROR_HEADER, &format!("error.{error_key}"));
    insert(&mut headers, PARAMS_HEADER, entity);
    headers
}

/// `X-Total-Count` and `Link` for one page of `base_url`.
pub fn pagination<T>(page: &Page<T>, base_url: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(
        &mut headers,
        TOTAL_COUNT_HEADER,
        &page.total_elements.to_string(),
    );
    insert(
        &mut headers,
        axum::http::header::LINK,
        &link_header(base_url, page.page, page.size, page.total_pages()),
    );
    headers
}

fn page_uri(base_url: &str, page: u32, size: u32) -> String {
    format!("<{base_url}?page={page}&size={size}>")
}

fn link_header(base_url: &str, page: u32, size: u32, total_pages: u32) -> String {
    let mut links = Vec::with_capacity(4);
    if u64::from(page) + 1 < u64::from(total_pages) {
        links.push(format!("{}; rel=\"next\"", page_uri(base_url, page + 1, size)));
    }
    if page > 0 {
        links.push(format!("{}; rel=\"prev\"", page_uri(base_url, page - 1, size)));
    }
    let last = total_pages.saturating_sub(1);
    links.push(format!("{}; rel=\"last\"", page_uri(base_url, last, size)));
    links.push(format!("{}; rel=\"first\"", page_uri(base_url, 0, size)));
    links.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PageRequest, Sort, WishSortKey};
    use proptest::prelude::*;

    fn page(index: u32, size: u32, total: i64) -> Page<()> {
        let request = PageRequest {
            page: index,
            size,
            sort: Sort::<WishSortKey>::default(),
        };
        Page::new(vec![], total, &request)
    }

    fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
        headers.get(name).unwrap().to_str().unwrap()
    }

    #[test]
    fn test_entity_alerts() {
        let headers = entity_created("wish", 12);
        assert_eq!(header(&headers, "X-wishstoreApp-alert"), "wishstoreApp.wish.created");
        assert_eq!(header(&headers, "X-wishstoreApp-params"), "12");

        let headers = entity_deleted("wishlist", 3);
        assert_eq!(header(&headers, "X-wishstoreApp-alert"), "wishstoreApp.wishlist.deleted");
    }

    #[test]
    fn test_failure_alert() {
        let headers = failure_alert("wish", "idexists");
        assert_eq!(header(&headers, "X-wishstoreApp-error"), "error.idexists");
        assert_eq!(header(&headers, "X-wishstoreApp-params"), "wish");
    }

    #[test]
    fn test_middle_page_links() {
        let headers = pagination(&page(1, 10, 35), "/api/wishes");
        assert_eq!(header(&headers, "X-Total-Count"), "35");
        assert_eq!(
            header(&headers, "Link"),
            "</api/wishes?page=2&size=10>; rel=\"next\",\
             </api/wishes?page=0&size=10>; rel=\"prev\",\
             </api/wishes?page=3&size=10>; rel=\"last\",\
             </api/wishes?page=0&size=10>; rel=\"first\""
        );
    }

    #[test]
    fn test_empty_listing_links() {
        let headers = pagination(&page(0, 20, 0), "/api/wishlists");
        assert_eq!(header(&headers, "X-Total-Count"), "0");
        assert_eq!(
            header(&headers, "Link"),
            "</api/wishlists?page=0&size=20>; rel=\"last\",\
             </api/wishlists?page=0&size=20>; rel=\"first\""
        );
    }

    proptest! {
        #[test]
        fn prop_links_match_page_position(index in 0u32..50, size in 1u32..=100, total in 0i64..10_000) {
            let p = page(index, size, total);
            let link = header(&pagination(&p, "/api/wishes"), "Link").to_string();
            let total_pages = p.total_pages();

            prop_assert_eq!(link.contains("rel=\"next\""), index + 1 < total_pages);
            prop_assert_eq!(link.contains("rel=\"prev\""), index > 0);
            let last = format!("page={}&size={}>; rel=\"last\"", total_pages.saturating_sub(1), size);
            prop_assert!(link.contains(&last));
            let first = format!("</api/wishes?page=0&size={}>; rel=\"first\"", size);
            prop_assert!(link.ends_with(&first));
        }
    }
}
