use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;

use taskvault::auth::TokenService;
use taskvault::config::Config;
use taskvault::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let tokens = TokenService::from_config(&config);
    let pool_data = web::Data::new(pool);
    let token_data = web::Data::new(tokens);

    let allowed_origins = config.allowed_origins.clone();
    let bind_addr = (config.server_host.clone(), config.server_port);
    log::info!("Starting taskvault server at {}", config.server_url());

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .app_data(pool_data.clone())
            .app_data(token_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind(bind_addr)?
    .run()
    .await
}
