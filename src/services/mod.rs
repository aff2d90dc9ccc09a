pub mod data_service;
pub mod visit_service;
