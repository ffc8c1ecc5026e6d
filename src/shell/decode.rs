//! Decoding of child process output.
//!
//! Console tools on Windows write in the OEM code page rather than UTF-8.
//! Output is decoded as strict UTF-8 first, then with the configured legacy
//! code page, then as UTF-8 with replacement characters. Decoding always
//! produces text.

use encoding_rs::{Encoding, UTF_8};

/// Upper half (0x80..=0xFF) of IBM code page 850.
const CP850_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', //
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', 'ø', '£', 'Ø', '×', 'ƒ', //
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '®', '¬', '½', '¼', '¡', '«', '»', //
    '░', '▒', '▓', '│', '┤', 'Á', 'Â', 'À', '©', '╣', '║', '╗', '╝', '¢', '¥', '┐', //
    '└', '┴', '┬', '├', '─', '┼', 'ã', 'Ã', '╚', '╔', '╩', '╦', '╠', '═', '╬', '¤', //
    'ð', 'Ð', 'Ê', 'Ë', 'È', 'ı', 'Í', 'Î', 'Ï', '┘', '┌', '█', '▄', '¦', 'Ì', '▀', //
    'Ó', 'ß', 'Ô', 'Ò', 'õ', 'Õ', 'µ', 'þ', 'Þ', 'Ú', 'Û', 'Ù', 'ý', 'Ý', '¯', '´', //
    '\u{AD}', '±', '‗', '¾', '¶', '§', '÷', '¸', '°', '¨', '·', '¹', '³', '²', '■', '\u{A0}',
];

/// Legacy code page tried when output is not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyCodePage {
    /// IBM 850, the Western European console code page.
    Cp850,
    /// Any encoding known to `encoding_rs` (e.g. `ibm866`, `windows-1252`).
    Encoding(&'static Encoding),
}

impl Default for LegacyCodePage {
    fn default() -> Self {
        Self::Cp850
    }
}

impl LegacyCodePage {
    /// Resolve a code page from a configuration label.
    ///
    /// Accepts `cp850`/`850`/`ibm850` and any WHATWG encoding label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "cp850" | "850" | "ibm850" => Some(Self::Cp850),
            other => Encoding::for_label(other.as_bytes()).map(Self::Encoding),
        }
    }

    /// Name for display.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cp850 => "cp850",
            Self::Encoding(encoding) => encoding.name(),
        }
    }

    /// Decode without substitution; `None` if a byte sequence is unmappable.
    pub fn decode_strict(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Cp850 => Some(
                bytes
                    .iter()
                    .map(|&b| {
                        if b < 0x80 {
                            char::from(b)
                        } else {
                            CP850_HIGH[usize::from(b - 0x80)]
                        }
                    })
                    .collect(),
            ),
            Self::Encoding(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
        }
    }
}

/// Three-tier output decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDecoder {
    legacy: LegacyCodePage,
}

impl TextDecoder {
    /// Create a decoder using `legacy` as the second tier.
    pub fn new(legacy: LegacyCodePage) -> Self {
        Self { legacy }
    }

    pub fn legacy(&self) -> LegacyCodePage {
        self.legacy
    }

    /// Decode `bytes` into text.
    pub fn decode(&self, bytes: &[u8]) -> String {
        if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
            return text.into_owned();
        }
        if let Some(text) = self.legacy.decode_strict(bytes) {
            return text;
        }
        let (text, _) = UTF_8.decode_without_bom_handling(bytes);
        text.into_owned()
    }

    /// Decode one output line, dropping the line terminator and surrounding
    /// whitespace.
    pub fn decode_line(&self, bytes: &[u8]) -> String {
        self.decode(bytes).trim().to_string()
    }
}
