pub mod directory;
pub mod save;

pub use save::{SaveOutcome, SaveService};
