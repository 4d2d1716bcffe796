use axum::Router;
use tower_http::trace::TraceLayer;

use crate::db::{Database, Item, Repository, Store};
use crate::handlers::{items_router, toko_router};

/// Storage handles passed into the handlers at startup.
#[derive(Clone)]
pub struct ApiState {
    pub items: Repository<Item>,
    pub stores: Repository<Store>,
}

impl ApiState {
    pub fn new(db: &Database) -> Self {
        Self {
            items: db.items(),
            stores: db.stores(),
        }
    }
}

pub fn api_router(state: ApiState) -> Router {
    Router::new()
        .merge(items_router(state.items))
        .merge(toko_router(state.stores))
        .layer(TraceLayer::new_for_http())
}
