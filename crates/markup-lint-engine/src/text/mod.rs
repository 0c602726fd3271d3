pub mod cursor;
pub mod lines;
pub mod slice;

pub use cursor::Cursor;
pub use lines::{line_col, line_padding};
pub use slice::find_from;
