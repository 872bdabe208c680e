// Adapters layer: concrete implementations for external systems (model API, http surface).

pub mod anthropic;
pub mod http;
