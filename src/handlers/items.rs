use axum::Router;

use crate::db::{Item, Repository};
use crate::handlers::resource::{Resource, resource_router};

impl Resource for Item {
    const PATH: &'static str = "/items";
}

/// `/items` and `/items/{id}`.
pub fn items_router(repo: Repository<Item>) -> Router {
    resource_router(repo)
}
