//! Asset types loaded through the Bevy asset server.

/// Galaxy preset wrapper registered as a JSON asset.
pub mod galaxy_preset;
