pub mod classify;
pub mod env;

pub use classify::{classify, LineClassifier};
pub use env::EnvironmentReadings;

pub use core_types::Decoder;
