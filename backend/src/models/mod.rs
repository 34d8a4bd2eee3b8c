pub mod flight;
pub mod macros;
pub mod pacing;
pub mod time;

pub use flight::*;
pub use pacing::*;
pub use time::*;
