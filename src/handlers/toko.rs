use axum::Router;

use crate::db::{Repository, Store};
use crate::handlers::resource::{Resource, resource_router};

impl Resource for Store {
    const PATH: &'static str = "/toko";
}

/// `/toko` and `/toko/{id}`, carrying `nama` / `alamat` bodies.
pub fn toko_router(repo: Repository<Store>) -> Router {
    resource_router(repo)
}
