use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use mosaic_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if config.is_production() {
        config.validate_for_production();
    }

    let bind_addr = (config.web_server_host.clone(), config.web_server_port);

    let state = AppState::new(config)
        .await
        .expect("failed to initialise application state");

    log::info!(
        "starting HTTP server on {}:{}",
        bind_addr.0,
        bind_addr.1
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(handlers::health_handler::health_check)
            .service(handlers::dashboard_handler::dashboard)
            .service(handlers::app_handler::register_app)
            .service(handlers::app_handler::delete_app_widget)
            .service(handlers::widget_handler::share_data)
            .service(handlers::widget_handler::cached_app_widget)
            .service(handlers::widget_handler::create_user_widget)
            .service(handlers::widget_handler::edit_user_widget)
            .service(handlers::widget_handler::delete_user_widget)
            .service(handlers::widget_handler::refresh_user_widget)
            .service(handlers::widget_handler::full_refresh_user_widget)
            .service(handlers::widget_handler::refresh_app_widget)
            .service(handlers::widget_handler::full_refresh_app_widget)
    })
    .bind(bind_addr)?
    .run()
    .await
}
