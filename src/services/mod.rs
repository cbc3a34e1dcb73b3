// Tickerlens services
// Services wrap what lives outside the client core, such as the backend API and the settings file.

pub mod backend_client;
pub mod company_search;
pub mod delay;
pub mod history_api;
pub mod notifier;
pub mod search_codec;
pub mod settings_engine;
