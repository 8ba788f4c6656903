pub mod formatter;
pub mod python;

pub use formatter::{CodeFormatter, PassthroughFormatter, TidyFormatter};
