use crate::api_error::ApiError;
use crate::response::Envelope;
use crate::user::{RequiredJson, UserChanges, UserMessage, UserStore};
use actix_web::{delete, get, post, put, web, HttpResponse};

#[get("/users")]
async fn find_all(store: web::Data<dyn UserStore>) -> Result<HttpResponse, ApiError> {
    let store = store.into_inner();
    let users = web::block(move || store.list()).await??;

    debug!("Listed {} users", users.len());

    Ok(HttpResponse::Ok().json(Envelope::data(users)))
}

#[get("/users/{id}")]
async fn find(
    store: web::Data<dyn UserStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let store = store.into_inner();
    let id = id.into_inner();

    debug!("Looking up user {}", id);

    let user = web::block(move || store.get(&id)).await??;

    Ok(HttpResponse::Ok().json(Envelope::data(user)))
}

#[post("/users")]
async fn create(
    store: web::Data<dyn UserStore>,
    user: RequiredJson<UserMessage>,
) -> Result<HttpResponse, ApiError> {
    let store = store.into_inner();
    let user = web::block(move || store.create(user.into_inner())).await??;

    info!("Created user {}", user.id);

    Ok(HttpResponse::Created().json(Envelope::data(user)))
}

#[put("/users/{id}")]
async fn update(
    store: web::Data<dyn UserStore>,
    id: web::Path<String>,
    changes: RequiredJson<UserChanges>,
) -> Result<HttpResponse, ApiError> {
    let store = store.into_inner();
    let id = id.into_inner();
    let user = web::block(move || store.update(&id, changes.into_inner())).await??;

    info!("Updated user {}", user.id);

    Ok(HttpResponse::Ok().json(Envelope::data(user)))
}

#[delete("/users/{id}")]
async fn delete(
    store: web::Data<dyn UserStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let store = store.into_inner();
    let id = id.into_inner();
    let deleted = id.clone();

    web::block(move || store.delete(&id)).await??;

    info!("Deleted user {}", deleted);

    Ok(HttpResponse::Ok().json(Envelope::message("Successfully deleted the user")))
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(Envelope::error("Route not found"))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(find_all);
    cfg.service(find);
    cfg.service(create);
    cfg.service(update);
    cfg.service(delete);
}
