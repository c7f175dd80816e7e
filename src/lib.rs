pub mod cache;
pub mod client;
pub mod config;
pub mod evolution;
pub mod generation;
pub mod normalize;
pub mod pokemon;
pub mod retry;
pub mod storage;

pub use cache::*;
pub use client::*;
pub use config::*;
pub use evolution::*;
pub use generation::*;
pub use normalize::*;
pub use pokemon::*;
pub use retry::*;
pub use storage::*;
