pub(crate) mod error;
pub use error::*;
