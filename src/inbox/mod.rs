pub mod client;
pub mod duplicates;
pub mod models;
pub mod publish;

pub use client::*;
pub use duplicates::*;
pub use models::*;
pub use publish::*;
