pub mod ws;

pub use ws::{WsClient, serve_ws};
