pub mod pipeline;
pub mod progress;
pub mod walker;

pub use pipeline::{BoundEntity, DocumentationRun};
pub use progress::ScanStats;
pub use walker::FileWalker;
