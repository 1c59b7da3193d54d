//! Shared defaults and limits for the galaxy generator, renderer, and CLI.

pub mod background;
pub mod controls;
pub mod galaxy;
pub mod palette;
pub mod render_settings;
pub mod zone;
