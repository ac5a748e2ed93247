//! Conversions between text and encoded bytes.

/// Text encodings understood by the framing primitives.
///
/// Decoding is lossy and never fails: malformed input is replaced with
/// U+FFFD. Encoding to [`Latin1`](Self::Latin1) replaces characters above
/// U+00FF with `?`.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// UTF-8, the system default.
    #[default]
    Utf8,
    /// ISO-8859-1, one byte per character.
    Latin1,
    /// UTF-16, little-endian code units.
    Utf16Le,
    /// UTF-16, big-endian code units.
    Utf16Be,
}

impl TextEncoding {
    /// Encoding used when none is specified.
    pub const DEFAULT: TextEncoding = TextEncoding::Utf8;

    /// Whether ordinary text encodes without zero bytes.
    ///
    /// UTF-16 emits a zero byte for every ASCII character, so it must not be
    /// combined with NUL-terminated framing.
    #[must_use]
    pub fn is_nul_safe(self) -> bool { matches!(self, Self::Utf8 | Self::Latin1) }

    /// Encode `text` into bytes.
    #[must_use]
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
            Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        }
    }

    /// Decode `bytes` into text.
    ///
    /// A trailing odd byte in UTF-16 input decodes as U+FFFD.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Latin1 => bytes.iter().copied().map(char::from).collect(),
            Self::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            Self::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let chunks = bytes.chunks_exact(2);
    let odd = !chunks.remainder().is_empty();
    let units: Vec<u16> = chunks.map(|pair| unit([pair[0], pair[1]])).collect();
    let mut text = String::from_utf16_lossy(&units);
    if odd {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

/// Encode `text` with [`TextEncoding::DEFAULT`].
#[must_use]
pub fn encode(text: &str) -> Vec<u8> { TextEncoding::DEFAULT.encode(text) }

/// Decode `bytes` with [`TextEncoding::DEFAULT`].
#[must_use]
pub fn decode(bytes: &[u8]) -> String { TextEncoding::DEFAULT.decode(bytes) }
