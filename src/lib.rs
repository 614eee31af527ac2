pub mod a11y;
pub mod config;
pub mod contact;
pub mod error;
pub mod loading;
pub mod menu;
pub mod navigation;
pub mod particles;
pub mod registry;
pub mod reveal;
pub mod setup;
pub mod task;
pub mod telemetry;
pub mod theme;
pub mod timing;
pub mod typing;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
