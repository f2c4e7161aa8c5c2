pub mod error;
pub mod modules;
pub mod utilities;

pub use error::Error;
