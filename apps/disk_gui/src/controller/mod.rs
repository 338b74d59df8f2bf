//! Controller layer between the egui surface and the cache worker.

pub mod events;
pub mod orchestration;
