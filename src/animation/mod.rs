pub mod clock;
pub mod ease;
pub mod lerp;
pub mod reveal;
