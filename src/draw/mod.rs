pub mod clock;
pub mod config;
pub mod controller;
pub mod decay;
pub mod engine;
pub mod input;
pub mod keyboard_hook;
pub mod layout;
pub mod messages;
pub mod model;
pub mod render;
pub mod settings;
pub mod settings_store;
pub mod state;
pub mod store;

pub use controller::OverlayController;
pub use engine::EngineState;
pub use messages::{OverlayEvent, OverlayNotice};
pub use render::{RenderLoop, Surface};
pub use store::{AnnotationStore, Frame};
