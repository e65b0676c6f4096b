//! Data models for SACCO website content

mod content;
mod directory;
mod forms;
mod products;
mod user;

pub use content::*;
pub use directory::*;
pub use forms::*;
pub use products::*;
pub use user::*;
