//! HTTP surface of the service.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, layer stack)
//!     → middleware/telemetry.rs (timing guard created)
//!     → handlers.rs (endpoint logic)
//!     → guard drop (counter + histogram + log line)
//!     → response to client
//! ```

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use error::ApiError;
pub use extract::JsonBody;
pub use server::{ApiServer, AppState};
