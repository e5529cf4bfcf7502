//! # PickChef Binary
//!
//! The entry point that assembles the application based on compile-time features.

mod settings;

use actix_web::{App, HttpServer};
use pc_api::{configure_routes, handlers, middleware};
use pc_core::traits::RecipeRepo;

// Feature-gated imports
#[cfg(feature = "db-sqlite")]
use pc_db_sqlite::SqliteRecipeRepo;

#[cfg(not(feature = "db-sqlite"))]
compile_error!("pickchef needs a storage backend; enable the `db-sqlite` feature");

use settings::Settings;

/// Opens the configured store. Tables are created here, before the server
/// accepts any request.
#[cfg(feature = "db-sqlite")]
async fn open_repo(settings: &Settings) -> anyhow::Result<impl RecipeRepo> {
    SqliteRecipeRepo::new(&settings.database_url, settings.max_connections).await
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::load()?;

    // 1. Initialize Database Implementation
    let repo = open_repo(&settings).await?;
    log::info!("storage ready at {}", settings.database_url);

    // 2. Wrap in AppState (dynamic dispatch over the repo)
    let state = handlers::state(repo);

    let (host, port) = settings.bind_addr();
    let origins = settings.allowed_origins.clone();
    log::info!("🚀 PickChef starting on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::cors_policy(&origins))
            .wrap(middleware::standard_middleware())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
