//! Text encodings for the string-returning pipe variants.

use std::fmt;
use std::str::FromStr;

use crate::error::{GraphvizError, GraphvizResult};

/// Encoding used to turn source text into bytes and captured output back into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Ascii,
    Latin1,
}

impl Encoding {
    /// Returns the canonical label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin-1",
        }
    }

    /// Looks up an encoding by label, ignoring case, `-` and `_`.
    pub fn from_label(label: &str) -> GraphvizResult<Self> {
        let key: String = label
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "utf8" => Ok(Encoding::Utf8),
            "ascii" | "usascii" => Ok(Encoding::Ascii),
            "latin1" | "iso88591" | "l1" => Ok(Encoding::Latin1),
            _ => Err(GraphvizError::UnknownEncoding {
                label: label.to_string(),
            }),
        }
    }

    /// Encodes `text`, failing on the first character the encoding cannot represent.
    pub fn encode(&self, text: &str) -> GraphvizResult<Vec<u8>> {
        let limit = match self {
            Encoding::Utf8 => return Ok(text.as_bytes().to_vec()),
            Encoding::Ascii => 0x7f,
            Encoding::Latin1 => 0xff,
        };
        text.chars()
            .enumerate()
            .map(|(position, c)| {
                let code = u32::from(c);
                if code <= limit {
                    Ok(code as u8)
                } else {
                    Err(GraphvizError::Encoding {
                        encoding: *self,
                        position,
                    })
                }
            })
            .collect()
    }

    /// Decodes `bytes`, failing on the first invalid byte sequence.
    pub fn decode(&self, bytes: &[u8]) -> GraphvizResult<String> {
        match self {
            Encoding::Utf8 => match std::str::from_utf8(bytes) {
                Ok(text) => Ok(text.to_string()),
                Err(e) => Err(GraphvizError::Decoding {
                    encoding: *self,
                    position: e.valid_up_to(),
                }),
            },
            Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(position) => Err(GraphvizError::Decoding {
                    encoding: *self,
                    position,
                }),
                None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            },
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = GraphvizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}
