//! Core types for the undofs namespace engine.

/// Entry: an opaque path-like name. A trailing `/` marks a directory.
pub type Entry = String;

/// SlotIndex: physical position inside an open-addressing table
pub type SlotIndex = usize;

/// Default slot count for a snapshot table (prime).
pub const DEFAULT_TABLE_CAPACITY: usize = 98317;

/// Prime used to derive the double-hash step.
pub const STEP_PRIME: u64 = 12289;

/// Marker character for directory entries.
pub const DIRECTORY_MARKER: char = '/';
