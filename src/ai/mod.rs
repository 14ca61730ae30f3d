pub mod extract;
pub mod model;
pub mod prompt;

pub use extract::*;
pub use model::*;
