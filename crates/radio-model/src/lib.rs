mod error;
pub use error::ModelError;

mod domain;
pub use domain::*;

mod gatt;
pub use gatt::*;
