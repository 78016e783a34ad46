pub mod currency;
pub mod input;
pub mod platform;

pub use currency::*;
pub use input::*;
pub use platform::*;
