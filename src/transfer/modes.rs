//! Codec directions

use std::fmt;

/// Direction a file is streamed through the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecMode {
    Compress,
    Decompress,
}

impl fmt::Display for CodecMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecMode::Compress => write!(f, "compress"),
            CodecMode::Decompress => write!(f, "decompress"),
        }
    }
}
