// src/api/handlers/mod.rs
mod assets;
mod evaluate;
mod files;
mod health;
mod page;

pub use assets::static_asset;
pub use evaluate::{evaluate, get_state};
pub use files::{remove_file, upload_file};
pub use health::health_check;
pub use page::index;
