//! Router assembly for the Verbatim gateway
//!
//! Wires the transcription endpoint, session issuance, metadata, and
//! static assets into one axum router, with auth and CORS applied per
//! configuration.

mod auth;
mod cors;
mod health;
mod metadata;
mod respond;
mod session;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::trace::TraceLayer;
use verbatim_config::Config;
use verbatim_session::{NonceRegistry, NonceSweeper, TokenSigner};

use state::AppState;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
    // Keeps the background nonce sweeper alive while serving
    _sweeper: NonceSweeper,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if STT provider initialization fails
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8081)));

        let stt_state = stt::build_server(&config)?;

        let signer = match config.session.secret.as_ref().filter(|_| config.session.require_nonce()) {
            Some(secret) => TokenSigner::new(secret),
            None => TokenSigner::ephemeral(),
        };

        let nonces = NonceRegistry::new(Duration::from_secs(config.session.nonce_ttl_seconds));
        let sweeper = NonceSweeper::spawn(
            nonces.clone(),
            Duration::from_secs(config.session.sweep_interval_seconds),
        );

        let state = Arc::new(AppState {
            signer,
            nonces,
            require_nonce: config.session.require_nonce(),
            token_ttl_seconds: config.session.token_ttl_seconds,
            static_root: config.server.static_files.root.clone(),
            metadata_path: config.server.metadata_path.clone(),
        });

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Transcription endpoint, bearer-protected unless configured off
        let mut stt_routes = stt::endpoint_router(&stt_state);
        if config.session.require_auth {
            stt_routes = stt_routes.route_layer(axum::middleware::from_fn_with_state(
                Arc::clone(&state),
                auth::require_bearer,
            ));
        }
        app = app.merge(stt_routes.with_state(stt_state));

        // Session and metadata endpoints
        app = app.merge(
            Router::new()
                .route("/api/session", axum::routing::get(session::session_handler))
                .route("/api/metadata", axum::routing::get(metadata::metadata_handler))
                .with_state(Arc::clone(&state)),
        );

        // Static assets (includes `/` with nonce injection)
        if config.server.static_files.enabled {
            app = app.fallback_service(axum::routing::get(static_files::serve_handler).with_state(Arc::clone(&state)));
        }

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS
        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Ok(Self {
            router: app,
            listen_address,
            _sweeper: sweeper,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
