pub mod error;
pub mod validation;

pub use error::{RagmonError, Result};
pub use validation::{CompositeError, ErrorCollector, ValidationError};
