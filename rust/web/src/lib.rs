pub mod errors;
pub mod events;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod scheduler;
pub mod server;
pub mod settings;
pub mod wheel;

pub use errors::{handle_rejection, ErrorResponse, ErrorSeverity, IntoErrorResponse, RequestRejection};
pub use events::{EventBus, EventSubscription, WheelEventEnvelope};
pub use logging::{init_logging, CapturedEvent, LogCapture, LogFormat};
pub use middleware::{log_response, with_request_logging};
pub use scheduler::TokioScheduler;
pub use server::{AppContext, ServerConfig, ServerError, ServerHandle, WebServer};
pub use settings::{SettingsError, SettingsStore};
pub use wheel::{WheelService, WheelServiceError, WheelView};
