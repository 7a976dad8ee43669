// Data models for the adaptive training load engine

pub mod session;
pub mod fatigue;
pub mod exercise;
pub mod adapted_workout;
pub mod validation;

pub use session::*;
pub use fatigue::*;
pub use exercise::*;
pub use adapted_workout::*;
pub use validation::*;
