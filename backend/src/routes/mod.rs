pub mod flights;
pub mod pacing;
pub mod timeline;
