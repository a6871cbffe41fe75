//! Service layer: availability derivation, navigation helpers, and document
//! plumbing used by the interaction controller.

pub mod availability;
pub mod documents;
pub mod navigation;

pub use availability::{initialize, partition_holds, prune};
pub use navigation::Direction;
