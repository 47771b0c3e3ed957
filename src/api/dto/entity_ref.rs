use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reference to another entity by id, `{"id": 3}` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IdRef {
    #[schema(example = 1)]
    pub id: i64,
}

impl IdRef {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}
