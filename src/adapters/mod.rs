// Adapters layer: concrete implementations of the domain ports (http, storage, console).

pub mod console;
pub mod http;
pub mod storage;
