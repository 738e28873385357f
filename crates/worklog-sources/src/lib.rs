// Error types
pub mod error;

// Trait-based architecture (public API)
pub mod traits;

// Extraction backends
pub mod commits;
pub mod transcript;

pub use commits::CommitSource;
pub use traits::{SessionSource, SourceKind};
pub use transcript::TranscriptSource;

pub use error::{Error, Result};
