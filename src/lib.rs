pub mod libs;

pub use crate::libs::io::{read_lines, reader, writer};
