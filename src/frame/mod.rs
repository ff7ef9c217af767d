//! # Newline Framing for Scatter and Gather
//!
//! Lists of strings travel between ranks as newline-terminated lines packed into
//! one flat byte buffer. A `FrameTable` of per-recipient lengths and offsets lets
//! the variable-size collectives know which bytes belong to which rank. The same
//! codec carries file paths out to the workers and digests back to the
//! coordinator.
//!
//! Embedded newlines are not escaped. Paths containing one are rejected during
//! discovery.
//!
//! ## Submodules
//!
//! - **codec**: `encode`, `decode` and `Frame::pack`.
//! - **types**: Defines `Frame` and `FrameTable`.

mod codec;
mod types;

pub use codec::{decode, encode, LINE_TERMINATOR};
pub use types::{Frame, FrameTable};
