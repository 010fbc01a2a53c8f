pub mod config;
pub mod error;
pub mod reference;
pub mod types;

pub use config::KoseiConfig;
pub use error::{KoseiError, Result};
pub use reference::ReferenceLibrary;
pub use types::*;
