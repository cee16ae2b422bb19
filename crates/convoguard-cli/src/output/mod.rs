pub mod json;
pub mod table;

pub use json::{print_json, write_transcript};
pub use table::print_table;
