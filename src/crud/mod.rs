pub mod repository;
pub mod service;

pub use repository::Repository;
pub use service::{CrudError, CrudResource, CrudService, PrimaryKey};
