//! UI layer for the disk tool: app shell and disk rendering.

pub mod app;
pub mod disk;

pub use app::CipherDiskApp;
