//! CSV reading and writing.

mod reader;
mod writer;

pub use reader::{read_csv_frame, read_csv_headers, validate_encoding, validate_frame_shape};
pub use writer::write_csv_frame;
