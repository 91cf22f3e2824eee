//! Desktop embedding core.
//!
//! - [`enumerator`] finds the background container behind the desktop icons
//! - [`composition`] applies the blur-behind accent policy
//! - [`coordinator`] sequences blur, discovery, reparenting and retries
//! - [`region`] keeps the rounded window region in step with the bounds

pub mod composition;
pub mod coordinator;
pub mod enumerator;
pub mod errors;
pub mod region;

pub use composition::{AccentState, BlurOutcome, CompositionRequest, apply_blur};
pub use coordinator::{EmbedState, EmbeddingCoordinator, RetryPolicy};
pub use enumerator::WindowEnumerator;
pub use errors::EmbedError;
pub use region::{ClipRegion, RegionMasker, compute_mask};
