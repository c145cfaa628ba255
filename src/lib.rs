pub mod authors;
pub mod books;
pub mod catalog;
pub mod core;
pub mod utils;
