#[macro_use]
extern crate diesel;
#[macro_use]
extern crate log;

mod api_error;
mod config;
mod db;
mod response;
mod schema;
mod user;

use actix_web::{web, App, HttpServer};
use config::{Backend, Settings};
use dotenv::dotenv;
use listenfd::ListenFd;
use std::io;
use std::sync::Arc;
use user::{MemoryStore, PgUserStore, UserStore};

fn build_store(backend: &Backend) -> io::Result<Arc<dyn UserStore>> {
    match backend {
        Backend::Memory => {
            info!("Using in-memory user store");
            Ok(Arc::new(MemoryStore::seeded()))
        }
        Backend::Postgres(database) => {
            info!("Using postgres user store");
            let pool = db::init(database)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
            Ok(Arc::new(PgUserStore::new(pool)))
        }
    }
}

#[actix_rt::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let settings = Settings::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let store = web::Data::from(build_store(&settings.backend)?);

    let mut listenfd = ListenFd::from_env();

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .service(web::scope("/api/v1").configure(user::init_routes))
            .default_service(web::route().to(user::not_found))
    });

    server = match listenfd.take_tcp_listener(0)? {
        Some(listener) => server.listen(listener)?,
        None => server.bind((settings.host.as_str(), settings.port))?,
    };

    for addr in server.addrs() {
        info!("Starting server on {} 🚀", addr);
    }

    server.run().await
}
