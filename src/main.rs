use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};

use todoforge::auth::{TokenService, UserDirectory, AUTH_HEADER};
use todoforge::config::Config;
use todoforge::routes;
use todoforge::store::{CredentialStore, MemoryStore, PgStore};
use todoforge::tasks::TaskRepository;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let store: Arc<dyn CredentialStore> = match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url, config.database_max_connections)
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            store
                .migrate()
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            log::info!("using PostgreSQL credential store");
            Arc::new(store)
        }
        None => {
            log::warn!("DATABASE_URL not set, data will be kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let directory = web::Data::new(UserDirectory::new(
        store.clone(),
        TokenService::new(&config.jwt_secret),
        config.bcrypt_cost,
    ));
    let tasks = web::Data::new(TaskRepository::new(store));

    log::info!("Starting server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(directory.clone())
            .app_data(tasks.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .expose_headers([AUTH_HEADER])
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
