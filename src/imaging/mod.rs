pub mod convert;

pub use convert::{convert_format, resize_by, resize_exact};
