pub mod providers;
pub mod storage;

pub use storage::{ImageHandle, ImageStore};
