// Adapters layer: concrete implementations for external systems (http catalog, key-value storage).

pub mod http;
pub mod storage;
