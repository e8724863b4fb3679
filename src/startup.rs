//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{
    AuthService, AuthServiceImpl, PersonService, PersonServiceImpl, PetService, PetServiceImpl,
};
use crate::config::{AdminSettings, CorsSettings, Settings};
use crate::infrastructure::database;
use crate::infrastructure::repositories::{
    InMemoryPersonRepository, InMemoryPetRepository, InMemoryStore, InMemoryUserRepository,
    PgPersonRepository, PgPetRepository, PgUserRepository,
};
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{create_cors_layer, create_trace_layer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Present when backed by PostgreSQL; used by the readiness probe
    pub db: Option<PgPool>,
    pub person_service: Arc<dyn PersonService>,
    pub pet_service: Arc<dyn PetService>,
    pub auth_service: Arc<dyn AuthService>,
}

impl AppState {
    /// Wire services over PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        let person_repo = Arc::new(PgPersonRepository::new(pool.clone()));
        let pet_repo = Arc::new(PgPetRepository::new(pool.clone()));
        let user_repo = Arc::new(PgUserRepository::new(pool.clone()));

        Self {
            db: Some(pool),
            person_service: Arc::new(PersonServiceImpl::new(person_repo.clone())),
            pet_service: Arc::new(PetServiceImpl::new(pet_repo, person_repo)),
            auth_service: Arc::new(AuthServiceImpl::new(user_repo)),
        }
    }

    /// Wire services over a process-local store.
    pub fn in_memory(store: InMemoryStore) -> Self {
        let person_repo = Arc::new(InMemoryPersonRepository::new(store.clone()));
        let pet_repo = Arc::new(InMemoryPetRepository::new(store.clone()));
        let user_repo = Arc::new(InMemoryUserRepository::new(store));

        Self {
            db: None,
            person_service: Arc::new(PersonServiceImpl::new(person_repo.clone())),
            pet_service: Arc::new(PetServiceImpl::new(pet_repo, person_repo)),
            auth_service: Arc::new(AuthServiceImpl::new(user_repo)),
        }
    }
}

/// Router with CORS and tracing layers applied, CORS outermost
pub fn build_router(state: AppState, cors: &CorsSettings) -> Router {
    routes::create_router(state)
        .layer(create_trace_layer())
        .layer(create_cors_layer(cors))
}

/// Create the configured administrator unless that user already exists.
pub async fn bootstrap_admin(state: &AppState, admin: Option<&AdminSettings>) -> Result<()> {
    let Some(admin) = admin else {
        tracing::warn!("No administrator configured; address updates will be refused");
        return Ok(());
    };

    let created = state
        .auth_service
        .ensure_admin(&admin.username, &admin.password)
        .await
        .context("Failed to bootstrap administrator")?;

    if !created {
        tracing::info!(username = %admin.username, "Administrator already exists");
    }
    Ok(())
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::init_server_start();

        let db = database::create_pool(&settings.database)
            .await
            .context("Failed to connect to PostgreSQL")?;

        if settings.database.run_migrations {
            database::run_migrations(&db)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        let state = AppState::postgres(db);
        bootstrap_admin(&state, settings.admin.as_ref()).await?;

        let router = build_router(state, &settings.cors);

        let listener = TcpListener::bind(settings.server_addr())
            .await
            .with_context(|| format!("Failed to bind {}", settings.server_addr()))?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
