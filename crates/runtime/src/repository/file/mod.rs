//! File-based repository implementations.

mod profile;

pub use profile::FileProfileRepository;
