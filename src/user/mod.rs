mod body;
mod memory;
mod model;
mod postgres;
mod routes;
mod store;

pub use body::RequiredJson;
pub use memory::MemoryStore;
pub use model::*;
pub use postgres::PgUserStore;
pub use routes::{init_routes, not_found};
#[cfg(test)]
pub use store::MockUserStore;
pub use store::{StoreError, UserStore};
