//! JSON-RPC 2.0 communication layer for an embedding web page.
//!
//! Implements bidirectional messaging between the Bevy engine and the page
//! that hosts it in an iframe, via `postMessage`.
//!
//! ## Message Flow
//!
//! ```text
//! Page (Parent Window)   <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Methods
//!
//! - `get_parameters`: committed parameters, seed, generation, point count,
//!   seconds of rotation so far
//! - `get_controls`: control descriptors (field, label, kind, bounds)
//! - `stage_parameter`: `{field, value}` intermediate value; never rebuilds
//! - `commit_parameter`: `{field, value}` final value; rebuilds when the
//!   field regenerates
//! - `regenerate`: `{reroll?: bool}` rebuild from the committed parameters
//! - `load_preset`: `{seed?, parameters?}` replace every parameter at once;
//!   a seed restarts the random stream
//! - `get_fps`: current frame rate
//!
//! ## Notifications
//!
//! - `galaxy_regenerated`: `{count, seconds, generation}` after every rebuild
//! - `fps_update`: `{fps}` every half second
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error, including mutating calls made while the galaxy
//!   is still loading

/// JSON-RPC 2.0 bidirectional communication system for the embedding page.
pub mod web_rpc;
