// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the front end and the services
// - Commands take the caller's Session explicitly and return DTOs
// - Commands handle error conversion (serialized ErrorResponse)
// - Commands NEVER contain business logic

pub mod date_commands;
pub mod lottery_commands;
pub mod movie_commands;
pub mod session_commands;

pub use date_commands::*;
pub use lottery_commands::*;
pub use movie_commands::*;
pub use session_commands::*;
