pub mod config;
pub mod error;
pub mod platform;
pub mod tab;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use error::{Error, Result};
pub use platform::PlatformFamily;
pub use tab::{ContextAction, ContextEntry, Tab};
