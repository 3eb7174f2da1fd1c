use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_COMPRESSION_LEVEL;

/// Options for the text-safe wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSafeOptions {
    /// gzip the stream before base64 encoding.
    pub compressed: bool,
    /// gzip level 0-9. Anything else falls back to the flate2 default.
    pub level: u32,
}

impl Default for TextSafeOptions {
    fn default() -> Self {
        Self { compressed: false, level: DEFAULT_COMPRESSION_LEVEL }
    }
}

impl TextSafeOptions {
    pub fn compressed() -> Self {
        Self { compressed: true, ..Self::default() }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub(crate) fn compression(&self) -> flate2::Compression {
        match self.level {
            0..=9 => flate2::Compression::new(self.level),
            _ => flate2::Compression::default(),
        }
    }
}
