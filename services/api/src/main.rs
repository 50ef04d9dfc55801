use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::database::{DatabaseConfig, init_pool};

use api::{
    avatars::AvatarStore,
    jwt::{JwtConfig, JwtService},
    membership::MembershipCoordinator,
    repositories::{event::EventRepository, user::UserRepository},
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting RSVP API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations complete");

    // Initialize services and repositories
    let jwt_service = JwtService::new(JwtConfig::from_env()?);
    let avatar_store = AvatarStore::from_env().await;
    let user_repository = UserRepository::new(pool.clone());
    let event_repository = EventRepository::new(pool.clone());
    let membership = MembershipCoordinator::new(
        pool.clone(),
        user_repository.clone(),
        event_repository.clone(),
    );

    let app_state = AppState {
        db_pool: pool,
        jwt_service,
        avatar_store,
        user_repository,
        event_repository,
        membership,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("RSVP API service listening on 0.0.0.0:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
