//! Paging and sorting primitives shared by the repositories and the API layer.

use std::fmt;
use std::str::FromStr;

/// Column a listing may be ordered by.
pub trait SortKey: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// Parses the wire name of a sortable field (`productId`, `creationDate`, ...).
    fn parse_field(field: &str) -> Option<Self>;

    /// Wire name of the field.
    fn as_str(&self) -> &'static str;

    /// Wire names of every sortable field, for error messages.
    fn allowed() -> &'static [&'static str];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WishSortKey {
    #[default]
    Id,
    ProductId,
    Price,
}

impl SortKey for WishSortKey {
    fn parse_field(field: &str) -> Option<Self> {
        match field {
            "id" => Some(WishSortKey::Id),
            "productId" => Some(WishSortKey::ProductId),
            "price" => Some(WishSortKey::Price),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            WishSortKey::Id => "id",
            WishSortKey::ProductId => "productId",
            WishSortKey::Price => "price",
        }
    }

    fn allowed() -> &'static [&'static str] {
        &["id", "productId", "price"]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WishlistSortKey {
    #[default]
    Id,
    Name,
    CreationDate,
    Hidden,
}

impl SortKey for WishlistSortKey {
    fn parse_field(field: &str) -> Option<Self> {
        match field {
            "id" => Some(WishlistSortKey::Id),
            "name" => Some(WishlistSortKey::Name),
            "creationDate" => Some(WishlistSortKey::CreationDate),
            "hidden" => Some(WishlistSortKey::Hidden),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            WishlistSortKey::Id => "id",
            WishlistSortKey::Name => "name",
            WishlistSortKey::CreationDate => "creationDate",
            WishlistSortKey::Hidden => "hidden",
        }
    }

    fn allowed() -> &'static [&'static str] {
        &["id", "name", "creationDate", "hidden"]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!(
                "Invalid sort direction '{}'. Expected 'asc' or 'desc'",
                s
            )),
        }
    }
}

/// Ordering requested for a listing. Ties are always broken by ascending id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sort<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: SortKey> FromStr for Sort<K> {
    type Err = String;

    /// Parses `field` or `field,asc|desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(',') {
            Some((field, direction)) => (field.trim(), direction.trim().parse()?),
            None => (s.trim(), SortDirection::Asc),
        };

        let key = K::parse_field(field).ok_or_else(|| {
            format!(
                "Unknown sort field '{}'. Allowed fields: {}",
                field,
                K::allowed().join(", ")
            )
        })?;

        Ok(Sort { key, direction })
    }
}

impl<K: SortKey> fmt::Display for Sort<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{},{}", self.key.as_str(), direction)
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<K> {
    pub page: u32,
    pub size: u32,
    pub sort: Sort<K>,
}

impl<K> PageRequest<K> {
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// One page of a listing plus the total row count.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new<K>(content: Vec<T>, total_elements: i64, request: &PageRequest<K>) -> Self {
        Self {
            content,
            total_elements,
            page: request.page,
            size: request.size,
        }
    }

    pub fn total_pages(&self) -> u32 {
        if self.size == 0 || self.total_elements <= 0 {
            return 0;
        }
        let size = i64::from(self.size);
        u32::try_from((self.total_elements + size - 1) / size).unwrap_or(u32::MAX)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page: self.page,
            size: self.size,
        }
    }
}
