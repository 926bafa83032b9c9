//! Database schema and initialization

pub mod init;

pub use init::{create_section_tables, init_database, open_memory_database};
