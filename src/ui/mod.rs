//! UIモジュール
//!
//! ratatuiベースのターミナルUI機能

pub mod layout;
pub mod menu;
pub mod renderer;
pub mod theme;
pub mod viewport;

// 公開API
pub use layout::{AppLayout, MIN_HEIGHT, MIN_WIDTH};
pub use menu::{Menu, MenuBar, MenuItem, MenuResult};
pub use renderer::{display_column, RenderView, Renderer};
pub use theme::{ColorPair, ComponentType, Theme};
pub use viewport::Viewport;
