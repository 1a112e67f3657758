mod clients;
mod config;
mod errors;
mod generation;
mod services;
mod state;
#[cfg(test)]
mod test_support;

use crate::config::AppConfig;
use crate::state::AppState;
use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;
use log::{error, info};
use std::io;
use std::thread;
use std::time::Duration;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::from_filename(".env.local").ok();
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        error!("configuration error: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;
    let state = AppState::from_config(&config).map_err(|e| {
        error!("could not initialise external clients: {}", e);
        io::Error::other(e)
    })?;

    let url = config.bind_url();
    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url);
        });
    }

    info!("Server running at {}", url);

    let json_limit = config.json_limit;
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure(json_limit))
            .default_service(web::route().to(services::pages::assets::serve_embedded))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
