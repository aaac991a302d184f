use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware, web};

use belpanel::auth::rate_limit::RateLimiter;
use belpanel::config::AppConfig;
use belpanel::routes;
use belpanel::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();
    let state = AppState::new(&config).map_err(std::io::Error::other)?;
    let secret_key = config.cookie_key();
    let limiter = web::Data::new(RateLimiter::new());

    log::info!("Backend API at {}", config.api_base_url);
    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
            .cookie_secure(false)
            .cookie_http_only(true)
            .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(limiter.clone())
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            .configure(routes::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
