#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;

pub mod app;
pub mod database;
pub mod schema;

mod auth;
mod routes;

use std::{io, sync::Arc};

use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use env_logger::Env;
use log::{error, info};

use app::{settings::Settings, AppState};
use database::{
    db_utils::{psql_connect_to_db, run_migrations},
    store::PgStore,
};

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env().map_err(|err| startup_error("Invalid configuration", err))?;
    let postgres_pool =
        psql_connect_to_db(&settings).map_err(|err| startup_error("Database connection failed", err))?;
    if settings.run_migrations {
        run_migrations(&postgres_pool).map_err(|err| startup_error("Migrations failed", err))?;
    }

    let app_state = AppState::new(Arc::new(PgStore::new(postgres_pool)));

    info!("Server running on {}:{}", settings.host, settings.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(Data::new(app_state.clone()))
            .configure(routes::configure)
    })
    .bind(settings.bind_address())?
    .run()
    .await
}
