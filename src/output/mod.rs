//! Output module for durable JSON snapshots
//!
//! This module handles:
//! - Per-page checkpoint files written as each catalog page completes
//! - The final deduplicated aggregate file
//! - Discovery and loading of existing checkpoints for resumption

mod snapshot;

pub use snapshot::{checkpoint_path, find_checkpoints, load_snapshot, write_snapshot};
