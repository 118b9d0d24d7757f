use std::sync::Arc;

use brotaxi::auth::AdminToken;
use brotaxi::config::Settings;
use brotaxi::db;
use brotaxi::engine::Engine;
use brotaxi::error::Error;
use brotaxi::external::GoogleMaps;
use brotaxi::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env()?;

    let pool = db::connect(&settings.database_url, settings.database_max_connections).await?;
    let maps = GoogleMaps::new(settings.google_maps)?;

    let engine = Engine::new(pool, Arc::new(maps), settings.taxi_location).await?;

    if settings.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN is not set, driver settings are read-only");
    }

    serve(
        engine,
        settings.listen_addr,
        AdminToken::new(settings.admin_token),
    )
    .await
}
