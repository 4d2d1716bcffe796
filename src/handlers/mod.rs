pub mod items;
pub mod resource;
pub mod toko;

pub use items::items_router;
pub use resource::{Resource, resource_router};
pub use toko::toko_router;
