mod errors;
mod types;
mod validation;

pub use errors::*;
pub use types::*;
pub use validation::*;
