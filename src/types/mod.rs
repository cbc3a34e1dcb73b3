// Tickerlens shared type definitions
// Each submodule defines types used across the client core.

pub mod company;
pub mod errors;
pub mod history;
pub mod session;
pub mod settings;
