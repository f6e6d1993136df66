//! One repository per table. Repositories are unit structs whose methods
//! take the pool explicitly.

pub mod project_repo;

pub use project_repo::ProjectRepo;
