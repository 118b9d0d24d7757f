mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::server::handlers::{driver, places, quotes, routes, users};
use crate::{
    api::API,
    auth::AdminToken,
    error::{unexpected_error, Error},
};

type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router(api: DynAPI, admin_token: AdminToken) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/users", get(users::find_by_phone_number))
        .route("/driver", get(driver::find))
        .route("/driver/status", patch(driver::update_status))
        .route("/driver/tariffs", patch(driver::update_tariffs))
        .route("/driver/phone_number", patch(driver::update_phone_number))
        .route("/routes", post(routes::create))
        .route("/routes/pickup", get(routes::pickup))
        .route("/quotes", post(quotes::create))
        .route("/places/suggestions", get(places::find_suggestions))
        .route("/places/details/:place_id", get(places::find))
        .route("/geocode", get(places::describe))
        .layer(Extension(api))
        .layer(Extension(admin_token))
}

pub async fn serve<T: API + Sync + Send + 'static>(
    api: T,
    addr: SocketAddr,
    admin_token: AdminToken,
) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;

    let app = router(api, admin_token);

    let server = axum::Server::try_bind(&addr).map_err(|err| {
        tracing::error!("failed to bind {}: {}", addr, err);
        unexpected_error()
    })?;

    tracing::info!("listening on {}", addr);

    server.serve(app.into_make_service()).await.map_err(|err| {
        tracing::error!("server error: {}", err);
        unexpected_error()
    })
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Backend running" }))
}
