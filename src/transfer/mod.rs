//! Transfer module
//!
//! Streams file content through the compression codec and the digest.

pub mod codec;
pub mod digest;
pub mod modes;

pub use codec::{compress_file, decompress_file, transcode_file};
pub use digest::hash_file;
pub use modes::CodecMode;
