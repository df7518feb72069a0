pub mod settings;
pub mod geo;
pub mod slice;
pub mod align;
pub mod export;

mod error;
pub use error::Error;

#[cfg(test)]
mod tests;
