pub mod console;
pub mod payload;
pub mod value;
pub mod value_source;


pub use console::{print_block, print_line, with_console};
pub use payload::Payload;
pub use value::{TIME_OF_DAY_FORMAT, Value};
pub use value_source::ValueSource;
