pub mod app;
pub mod collection;
pub mod ids;
pub mod records;
