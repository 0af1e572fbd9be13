//! User store implementations

pub mod memory_user_repository;
pub mod user_repository;

pub use memory_user_repository::MemoryUserRepository;
pub use user_repository::UserRepository;
