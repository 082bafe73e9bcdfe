pub mod types;
pub mod kdf;
pub mod xor;
pub mod cache;

pub use types::*;
pub use kdf::*;
pub use xor::*;
pub use cache::*;
