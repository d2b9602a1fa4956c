pub mod builder;
pub mod error;
pub mod filter;

pub use builder::DatasetBuilder;
pub use error::BuildError;
