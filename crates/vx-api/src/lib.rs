//! vx-api: HTTP surface of the voice gateway
//!
//! Routes:
//! - `POST /voice` — telephony webhook; runs one voice turn and answers
//!   with TwiML
//! - `GET /audio/{turn_id}` — per-turn transcoded audio
//! - `GET /audio` — audio of the most recent completed turn
//! - `GET /call-now` — operator-facing outbound call trigger
//! - `GET /` — health check

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod turn;

pub use error::TurnError;
pub use routes::routes;
pub use server::{start_server, AppState};
