//! Repository layer for dynamic runtime data.
//!
//! Repositories handle data that CHANGES during play: the player profile.
//! Static content (enemies, skills, items) comes from `game-content`.

mod error;
mod traits;

pub mod file;
pub mod memory;

pub use error::{RepositoryError, Result};
pub use file::FileProfileRepository;
pub use memory::InMemoryProfileRepo;
pub use traits::ProfileRepository;
