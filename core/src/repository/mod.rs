pub mod error;
pub mod file;
pub mod traits;

// Re-export
pub use error::StoreError;
pub use file::FileGradeBookRepository;
pub use traits::GradeBookRepository;
