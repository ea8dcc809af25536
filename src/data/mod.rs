pub mod header;
pub mod loader;
pub mod source;
pub mod table;
