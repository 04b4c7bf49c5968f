pub mod loader;
pub mod replay;
pub mod sample;
