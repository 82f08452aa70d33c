pub mod round;
pub mod target;
pub mod wheel;
