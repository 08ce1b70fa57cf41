use crate::errors::handle_rejection;
use crate::events::EventBus;
use crate::handlers;
use crate::middleware::with_request_logging;
use crate::settings::SettingsStore;
use crate::wheel::WheelService;
use std::convert::Infallible;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warp::filters::BoxedFilter;
use warp::reply::Reply;
use warp::Filter;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    host: String,
    port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn for_tests() -> Self {
        Self::new("127.0.0.1", 0)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", 8080)
    }
}

/// Shared components handed to every route.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: ServerConfig,
    event_bus: Arc<EventBus>,
    settings: Arc<SettingsStore>,
    wheel: Arc<WheelService>,
}

impl AppContext {
    /// Must be called from inside a tokio runtime; the wheel spawns its
    /// timer driver here.
    pub fn new(config: ServerConfig) -> Self {
        let event_bus = Arc::new(EventBus::new());
        let settings = Arc::new(SettingsStore::new());
        let wheel = WheelService::new(Arc::clone(&event_bus), Arc::clone(&settings));
        Self::new_with_dependencies(config, wheel)
    }

    pub fn new_with_dependencies(config: ServerConfig, wheel: Arc<WheelService>) -> Self {
        Self {
            config,
            event_bus: wheel.event_bus(),
            settings: wheel.settings(),
            wheel,
        }
    }

    pub fn new_for_tests() -> Self {
        Self::new(ServerConfig::for_tests())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn event_bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.event_bus)
    }

    pub fn settings(&self) -> Arc<SettingsStore> {
        Arc::clone(&self.settings)
    }

    pub fn wheel(&self) -> Arc<WheelService> {
        Arc::clone(&self.wheel)
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[derive(Debug, Clone)]
pub struct WebServer {
    context: AppContext,
}

impl WebServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            context: AppContext::new(config),
        }
    }

    pub fn from_context(context: AppContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let WebServer { context } = self;
        let bind_addr = Self::bind_addr(context.config())?;

        // Surface an occupied port as an io error before warp wraps it
        if bind_addr.port() != 0 {
            drop(std::net::TcpListener::bind(bind_addr)?);
        }

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let routes = Self::routes(&context);
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        let (addr, server_future) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(bind_addr, shutdown_signal)
            .map_err(Self::map_warp_error)?;

        tracing::info!(address = %addr, "web server listening");

        let task = tokio::spawn(async move {
            server_future.await;
            Ok(())
        });

        Ok(ServerHandle::new(addr, shutdown_tx, task, context))
    }

    fn bind_addr(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
        let host = config.host();

        if let Ok(addr) = host.parse::<SocketAddr>() {
            return Ok(addr);
        }

        if let Ok(ip) = host.parse::<std::net::IpAddr>() {
            return Ok(SocketAddr::new(ip, config.port()));
        }

        let candidate = format!("{}:{}", host, config.port());
        let mut addrs = candidate.to_socket_addrs().map_err(|err| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`: {err}"))
        })?;

        addrs.next().ok_or_else(|| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`"))
        })
    }

    fn map_warp_error(err: warp::Error) -> ServerError {
        use std::error::Error as StdError;

        if let Some(source) = err.source() {
            if let Some(io_err) = source.downcast_ref::<std::io::Error>() {
                let recreated = std::io::Error::new(io_err.kind(), io_err.to_string());
                return ServerError::BindError(recreated);
            }
        }

        ServerError::ConfigError(err.to_string())
    }

    /// Every route, with rejections recovered as JSON errors and wrapped in
    /// request logging.
    pub fn routes(context: &AppContext) -> BoxedFilter<(warp::reply::Response,)> {
        let health = Self::health_route();
        let entry_routes = Self::entry_routes(context);
        let settings_routes = Self::settings_routes(context);
        let wheel_routes = Self::wheel_routes(context);
        let sse_routes = Self::sse_routes(context);

        let all = health
            .or(entry_routes)
            .unify()
            .or(settings_routes)
            .unify()
            .or(wheel_routes)
            .unify()
            .or(sse_routes)
            .unify()
            .recover(handle_rejection)
            .unify()
            .boxed();

        with_request_logging(all)
    }

    fn health_route() -> BoxedFilter<(warp::reply::Response,)> {
        warp::path("health")
            .and(warp::get())
            .and(warp::path::end())
            .map(|| handlers::health::health().into_response())
            .boxed()
    }

    fn entry_routes(context: &AppContext) -> BoxedFilter<(warp::reply::Response,)> {
        let wheel = context.wheel();

        let list = warp::path!("api" / "entries")
            .and(warp::get())
            .and(Self::with_wheel(wheel.clone()))
            .and_then(|wheel: Arc<WheelService>| async move {
                Ok::<_, Infallible>(handlers::list_entries(wheel).await)
            });

        let create = warp::path!("api" / "entries")
            .and(warp::post())
            .and(Self::with_wheel(wheel.clone()))
            .and(warp::body::json())
            .and_then(
                |wheel: Arc<WheelService>, request: handlers::CreateEntryRequest| async move {
                    Ok::<_, Infallible>(handlers::create_entry(wheel, request).await)
                },
            );

        let update = warp::path!("api" / "entries" / String)
            .and(warp::put())
            .and(Self::with_wheel(wheel.clone()))
            .and(warp::body::json())
            .and_then(
                |entry_id: String,
                 wheel: Arc<WheelService>,
                 request: handlers::UpdateEntryRequest| async move {
                    Ok::<_, Infallible>(handlers::update_entry(wheel, entry_id, request).await)
                },
            );

        let delete = warp::path!("api" / "entries" / String)
            .and(warp::delete())
            .and(Self::with_wheel(wheel))
            .and_then(|entry_id: String, wheel: Arc<WheelService>| async move {
                Ok::<_, Infallible>(handlers::delete_entry(wheel, entry_id).await)
            });

        list.or(create)
            .unify()
            .or(update)
            .unify()
            .or(delete)
            .unify()
            .boxed()
    }

    fn settings_routes(context: &AppContext) -> BoxedFilter<(warp::reply::Response,)> {
        let settings = context.settings();

        let get = warp::path!("api" / "settings")
            .and(warp::get())
            .and(Self::with_settings_store(settings.clone()))
            .and_then(|store: Arc<SettingsStore>| async move {
                Ok::<_, Infallible>(handlers::get_settings(store).await)
            });

        let update = warp::path!("api" / "settings")
            .and(warp::put())
            .and(Self::with_settings_store(settings.clone()))
            .and(warp::body::json())
            .and_then(
                |store: Arc<SettingsStore>, request: handlers::UpdateSettingsRequest| async move {
                    Ok::<_, Infallible>(handlers::update_settings(store, request).await)
                },
            );

        let reset = warp::path!("api" / "settings" / "reset")
            .and(warp::post())
            .and(Self::with_settings_store(settings))
            .and_then(|store: Arc<SettingsStore>| async move {
                Ok::<_, Infallible>(handlers::reset_settings(store).await)
            });

        get.or(update).unify().or(reset).unify().boxed()
    }

    fn wheel_routes(context: &AppContext) -> BoxedFilter<(warp::reply::Response,)> {
        let wheel = context.wheel();

        let state = warp::path!("api" / "wheel")
            .and(warp::get())
            .and(Self::with_wheel(wheel.clone()))
            .and_then(|wheel: Arc<WheelService>| async move {
                Ok::<_, Infallible>(handlers::get_wheel(wheel).await)
            });

        let spin = warp::path!("api" / "wheel" / "spin")
            .and(warp::post())
            .and(Self::with_wheel(wheel.clone()))
            .and_then(|wheel: Arc<WheelService>| async move {
                Ok::<_, Infallible>(handlers::spin(wheel).await)
            });

        let reset = warp::path!("api" / "wheel" / "reset")
            .and(warp::post())
            .and(Self::with_wheel(wheel.clone()))
            .and_then(|wheel: Arc<WheelService>| async move {
                Ok::<_, Infallible>(handlers::reset(wheel).await)
            });

        let dismiss = warp::path!("api" / "wheel" / "dismiss")
            .and(warp::post())
            .and(Self::with_wheel(wheel.clone()))
            .and_then(|wheel: Arc<WheelService>| async move {
                Ok::<_, Infallible>(handlers::dismiss(wheel).await)
            });

        let remove_winner = warp::path!("api" / "wheel" / "remove-winner")
            .and(warp::post())
            .and(Self::with_wheel(wheel))
            .and_then(|wheel: Arc<WheelService>| async move {
                Ok::<_, Infallible>(handlers::remove_winner(wheel).await)
            });

        state
            .or(spin)
            .unify()
            .or(reset)
            .unify()
            .or(dismiss)
            .unify()
            .or(remove_winner)
            .unify()
            .boxed()
    }

    fn sse_routes(context: &AppContext) -> BoxedFilter<(warp::reply::Response,)> {
        warp::path!("api" / "wheel" / "events")
            .and(warp::get())
            .and(Self::with_wheel(context.wheel()))
            .and_then(|wheel: Arc<WheelService>| async move {
                Ok::<_, Infallible>(handlers::stream_events(wheel).await)
            })
            .boxed()
    }

    fn with_wheel(
        wheel: Arc<WheelService>,
    ) -> impl Filter<Extract = (Arc<WheelService>,), Error = Infallible> + Clone {
        warp::any().map(move || Arc::clone(&wheel))
    }

    fn with_settings_store(
        settings: Arc<SettingsStore>,
    ) -> impl Filter<Extract = (Arc<SettingsStore>,), Error = Infallible> + Clone {
        warp::any().map(move || Arc::clone(&settings))
    }
}

#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<(), ServerError>>>,
    context: AppContext,
}

impl ServerHandle {
    fn new(
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<Result<(), ServerError>>,
        context: AppContext,
    ) -> Self {
        Self {
            addr,
            shutdown: Some(shutdown),
            task: Some(task),
            context,
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            match task.await {
                Ok(result) => result?,
                Err(err) => {
                    return Err(ServerError::ConfigError(format!(
                        "server task join error: {err}"
                    )))
                }
            }
        }

        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
