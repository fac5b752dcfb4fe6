pub mod token;

pub use token::{provider_from_source, FileToken, StaticToken, TokenProvider};
