pub mod dto;
pub mod file_state_repository;
pub mod memory_state_repository;
pub mod paths;
pub mod storage;

pub use crate::file_state_repository::FileStateRepository;
pub use crate::memory_state_repository::MemoryStateRepository;
pub use crate::paths::TonePaths;
pub use crate::storage::SecretStorage;
