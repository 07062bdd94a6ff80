// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between the front end and the services
// - Translates between DTOs and domain entities
// - Errors leave this layer as serialized ErrorResponse strings

pub mod dto;
pub mod commands;
pub mod error_handling;
pub mod state;

pub use dto::*;
pub use commands::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;
