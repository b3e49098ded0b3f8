pub mod backend;
pub mod error;
pub mod model;
pub mod result;

pub use backend::*;
pub use error::*;
pub use model::*;
pub use result::*;
