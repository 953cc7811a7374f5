use database::db::create_connection;
use log::info;
use server::{
    app, config::AppConfig, middleware::guard::SessionClaims, routes, state::AppState,
    utils::shutdown::shutdown_signal,
};
use tower::ServiceBuilder;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let db = create_connection(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let oauth2_resource_server = OAuth2ResourceServer::<SessionClaims>::builder()
        .issuer_url(&config.oidc_issuer_url)
        .build()
        .await
        .expect("Failed to build OAuth2ResourceServer");

    let protected =
        routes::protected().layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));
    let app = app(AppState::new(db), protected);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listener");
    info!("Running axum on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}
