pub mod models;
pub mod validation;
pub mod summary;
pub mod errors;

pub use models::*;
pub use validation::*;
pub use summary::*;
pub use errors::*;
