//! Encoding label resolution and the lossy re-encode/re-decode step.
//!
//! Codecs come from `encoding_rs`, plus a strict ISO-8859-1 codec: the WHATWG
//! label table folds "iso-8859-1" into windows-1252, which would turn bytes
//! 0x80-0x9F into typographic punctuation instead of C1 controls.

use std::fmt;

use encoding_rs::{Encoding, EncoderResult, UTF_16BE, UTF_16LE};

/// Labels offered by the encoding dialog, in display order.
pub const ENCODING_LABELS: [&str; 39] = [
    "Arabic (ISO-8859-6)",
    "Arabic (Windows-1256)",
    "Baltic (ISO-8859-4)",
    "Baltic (ISO-8859-13)",
    "Baltic (Windows-1257)",
    "Celtic (ISO-8859-14)",
    "Central European (ISO-8859-2)",
    "Central European (ISO-8859-16)",
    "Central European (Windows-1250)",
    "Chinese Simplified (GB2312)",
    "Chinese Simplified (GBK)",
    "Chinese Simplified (GB18030)",
    "Chinese Traditional (Big5)",
    "Chinese Traditional (Big5-HKSCS)",
    "Cyrillic (ISO-8859-5)",
    "Cyrillic (KOI8-R)",
    "Cyrillic (KOI8-U)",
    "Cyrillic (Windows-1251)",
    "Greek (ISO-8859-7)",
    "Greek (Windows-1253)",
    "Hebrew (ISO-8859-8)",
    "Hebrew (Windows-1255)",
    "Japanese (Shift-JIS)",
    "Japanese (EUC-JP)",
    "Japanese (ISO-2022-JP)",
    "Korean (EUC-KR)",
    "Korean (UHC)",
    "Korean (JOHAB)",
    "Korean (ISO-2022-KR)",
    "Nordic (ISO-8859-10)",
    "South European (ISO-8859-3)",
    "Thai (TIS-620)",
    "Thai (ISO-8859-11)",
    "Turkish (ISO-8859-9)",
    "Turkish (Windows-1254)",
    "Vietnamese (Windows-1258)",
    "Western (ISO-8859-1)",
    "Western (ISO-8859-15)",
    "Western (Windows-1251)",
];

// Normalised names that mean strict ISO-8859-1.
const LATIN1_NAMES: &[&str] = &[
    "latin-1",
    "latin1",
    "l1",
    "iso-8859-1",
    "iso8859-1",
    "iso88591",
    "8859",
    "cp819",
    "ibm819",
    "iso-ir-100",
    "csisolatin1",
];

// Common codec names missing from the WHATWG label table.
const COMPAT_ALIASES: &[(&str, &str)] = &[
    ("shift-jis", "shift_jis"),
    ("s-jis", "shift_jis"),
    ("cp932", "shift_jis"),
    ("eucjp", "euc-jp"),
    ("uhc", "euc-kr"),
    ("cp949", "euc-kr"),
    ("ms949", "euc-kr"),
    ("euckr", "euc-kr"),
    ("cp936", "gbk"),
    ("big5hkscs", "big5"),
    ("tis620", "windows-874"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Latin1,
    Web(&'static Encoding),
}

/// A resolved, usable text codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    backend: Backend,
}

impl Codec {
    pub const LATIN_1: Codec = Codec {
        backend: Backend::Latin1,
    };

    /// Wrap an `encoding_rs` encoding. The WHATWG "replacement" encoding
    /// cannot encode and is rejected.
    pub fn from_encoding(encoding: &'static Encoding) -> Option<Codec> {
        if encoding == encoding_rs::REPLACEMENT {
            return None;
        }
        Some(Codec {
            backend: Backend::Web(encoding),
        })
    }

    /// Canonical lowercase identifier, e.g. `latin-1` or `gb18030`.
    pub fn name(&self) -> String {
        match self.backend {
            Backend::Latin1 => "latin-1".to_string(),
            Backend::Web(encoding) => encoding.name().to_ascii_lowercase(),
        }
    }

    /// Encode `text`, writing characters this codec cannot represent as
    /// `\xhh`, `\uhhhh` or `\Uhhhhhhhh`. Never fails.
    pub fn encode_escaped(&self, text: &str) -> Vec<u8> {
        match self.backend {
            Backend::Latin1 => {
                let mut out = Vec::with_capacity(text.len());
                for c in text.chars() {
                    match u8::try_from(u32::from(c)) {
                        Ok(b) => out.push(b),
                        Err(_) => push_escape(&mut out, c),
                    }
                }
                out
            }
            Backend::Web(encoding) if encoding == UTF_16LE => {
                text.encode_utf16().flat_map(u16::to_le_bytes).collect()
            }
            Backend::Web(encoding) if encoding == UTF_16BE => {
                text.encode_utf16().flat_map(u16::to_be_bytes).collect()
            }
            Backend::Web(encoding) => encode_web(encoding, text),
        }
    }

    /// Decode `bytes`, substituting U+FFFD for malformed sequences. A leading
    /// BOM is kept as text. Never fails.
    pub fn decode_replacing(&self, bytes: &[u8]) -> String {
        match self.backend {
            Backend::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Backend::Web(encoding) => {
                let (cow, _had_errors) = encoding.decode_without_bom_handling(bytes);
                cow.into_owned()
            }
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn encode_web(encoding: &'static Encoding, text: &str) -> Vec<u8> {
    let mut encoder = encoding.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    let mut src = text;

    loop {
        let needed = encoder
            .max_buffer_length_from_utf8_without_replacement(src.len())
            .unwrap_or(src.len() * 4 + 8);
        out.reserve(needed);

        let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(src, &mut out, true);
        src = &src[read..];

        match result {
            EncoderResult::InputEmpty => return out,
            EncoderResult::OutputFull => {}
            // Stateful encoders are back in ASCII mode when reporting this.
            EncoderResult::Unmappable(c) => push_escape(&mut out, c),
        }
    }
}

fn push_escape(out: &mut Vec<u8>, c: char) {
    let cp = u32::from(c);
    let escape = if cp <= 0xff {
        format!("\\x{cp:02x}")
    } else if cp <= 0xffff {
        format!("\\u{cp:04x}")
    } else {
        format!("\\U{cp:08x}")
    };
    out.extend_from_slice(escape.as_bytes());
}

/// Extract the codec name from a display label: the text between the first
/// `(` and the last `)`. A label without parentheses is a bare codec name.
pub fn codec_name(label: &str) -> &str {
    let start = label.find('(').map_or(0, |i| i + 1);
    let rest = &label[start..];
    let end = rest.rfind(')').unwrap_or(rest.len());
    rest[..end].trim()
}

/// Look up a codec by name. Returns `None` for unknown names and for codecs
/// this platform cannot both encode and decode.
pub fn lookup(name: &str) -> Option<Codec> {
    let lower = name.trim().to_ascii_lowercase();
    let normalized = lower.replace(['_', ' '], "-");

    if LATIN1_NAMES.contains(&normalized.as_str()) {
        return Some(Codec::LATIN_1);
    }

    let label = COMPAT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map_or(lower.as_str(), |&(_, label)| label);

    Encoding::for_label_no_replacement(label.as_bytes())
        .or_else(|| Encoding::for_label_no_replacement(normalized.as_bytes()))
        .and_then(Codec::from_encoding)
}

/// Resolve a dialog label such as `"Western (ISO-8859-1)"` to a codec.
pub fn resolve_label(label: &str) -> Option<Codec> {
    let resolved = lookup(codec_name(label));
    if resolved.is_none() {
        log::debug!("encoding label {label:?} did not resolve");
    }
    resolved
}

/// Re-encode `text` with `source` and re-decode the bytes with `target`.
pub fn recode(text: &str, source: Codec, target: Codec) -> String {
    let bytes = source.encode_escaped(text);
    target.decode_replacing(&bytes)
}
