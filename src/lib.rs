pub mod config;
pub mod converter;
pub mod error;
pub mod generator;
pub mod logger;
pub mod parser;
pub mod utils;

// Re-export commonly used types
pub use converter::{ConversionReport, ConvertOptions, convert_file};
pub use error::{ConverterError, Result};
