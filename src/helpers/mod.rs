pub mod constant;
pub mod staging;
pub mod utils;

pub use constant::*;
pub use staging::*;
pub use utils::*;
