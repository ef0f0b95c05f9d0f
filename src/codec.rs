// GTP-C codec - framing primitives, error types and the IE registry
//
// The header state machine lives in header.rs and the message model in frame.rs.
// This module ties them together: it owns the per-version decoder tables and the
// dispatch loop that walks the information elements following the header.

use crate::datatypes::Version;
use crate::frame::Message;
use crate::header::Header;
use bytes::Buf;
use std::fmt;
use std::io::Cursor;
use std::sync::OnceLock;
use thiserror::Error;

/// Highest IE tag value, every per-version table holds `MAX_IE + 1` slots
pub const MAX_IE: usize = 0xFF;

/// Tag + 2-byte length
pub const TLV_V1_PREFIX: usize = 3;

/// Tag + 2-byte length + instance
pub const TLV_V2_PREFIX: usize = 4;

/// TLV-class marker for v0/v1 tags
pub const TLV_CLASS_BIT: u8 = 0x80;

/// Codec errors with enough context to locate the offending bytes
///
/// Offsets are absolute positions in the datagram handed to `decode`.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Unsupported GTP version: {0}")]
    UnsupportedVersion(u8),

    #[error("Protocol type flag is not GTP in {version:?} header")]
    NotGtp { version: Version },

    #[error("Truncated at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("GTPv2 message length {declared} does not match the {actual} bytes that follow")]
    LengthMismatch { declared: u16, actual: usize },

    #[error("IE {tag:#04x} at offset {offset} is malformed: {source}")]
    IeDecode {
        tag: u8,
        offset: usize,
        #[source]
        source: IeError,
    },

    #[error("Body decoding stopped at IE {tag:#04x}, offset {offset} of {length}")]
    BodyIncomplete { tag: u8, offset: usize, length: usize },
}

/// Errors reported by a single IE decoder
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IeError {
    #[error("need {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },

    #[error("field '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("decoder expects a {expected:?} message body")]
    BodyMismatch { expected: Version },

    #[error("decoder consumed no bytes")]
    NoProgress,

    #[error("decoder consumed {consumed} bytes, only {available} available")]
    Overrun { consumed: usize, available: usize },
}

/// Coarse decode status, for callers that only need to know which stage failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeStatus {
    /// Unsupported version, wrong protocol type, truncated or mis-framed header
    HeaderError,
    /// The IE loop did not account for every byte of the body
    BodyIncomplete,
}

impl CodecError {
    pub fn status(&self) -> DecodeStatus {
        match self {
            CodecError::UnsupportedVersion(_)
            | CodecError::NotGtp { .. }
            | CodecError::Truncated { .. }
            | CodecError::LengthMismatch { .. } => DecodeStatus::HeaderError,
            CodecError::IeDecode { .. } | CodecError::BodyIncomplete { .. } => {
                DecodeStatus::BodyIncomplete
            }
        }
    }

    /// True when the buffer ended before a header field or an IE did
    pub fn is_truncated(&self) -> bool {
        matches!(
            self,
            CodecError::Truncated { .. }
                | CodecError::IeDecode {
                    source: IeError::Truncated { .. },
                    ..
                }
        )
    }

    /// Tag and offset of the IE that stopped decoding, if any
    pub fn ie_location(&self) -> Option<(u8, usize)> {
        match self {
            CodecError::IeDecode { tag, offset, .. }
            | CodecError::BodyIncomplete { tag, offset, .. } => Some((*tag, *offset)),
            _ => None,
        }
    }
}

fn ensure(buf: &Cursor<&[u8]>, needed: usize) -> Result<(), CodecError> {
    if buf.remaining() < needed {
        return Err(CodecError::Truncated {
            offset: buf.position() as usize,
            needed,
            available: buf.remaining(),
        });
    }
    Ok(())
}

/// Decode a single byte
pub fn decode_u8(buf: &mut Cursor<&[u8]>) -> Result<u8, CodecError> {
    ensure(buf, 1)?;
    Ok(buf.get_u8())
}

/// Decode a 16-bit big-endian integer
pub fn decode_u16(buf: &mut Cursor<&[u8]>) -> Result<u16, CodecError> {
    ensure(buf, 2)?;
    Ok(buf.get_u16())
}

/// Decode a 32-bit big-endian integer
pub fn decode_u32(buf: &mut Cursor<&[u8]>) -> Result<u32, CodecError> {
    ensure(buf, 4)?;
    Ok(buf.get_u32())
}

/// Decode a 64-bit big-endian integer
pub fn decode_u64(buf: &mut Cursor<&[u8]>) -> Result<u64, CodecError> {
    ensure(buf, 8)?;
    Ok(buf.get_u64())
}

/// Advance past `count` bytes that carry nothing we keep
pub fn skip(buf: &mut Cursor<&[u8]>, count: usize) -> Result<(), CodecError> {
    ensure(buf, count)?;
    buf.advance(count);
    Ok(())
}

fn value_at(data: &[u8], at: usize, len: usize) -> Result<&[u8], IeError> {
    data.get(at..at + len).ok_or(IeError::Truncated {
        needed: at + len,
        available: data.len(),
    })
}

/// Read a big-endian u16 at `at` inside an IE value
pub fn be_u16(data: &[u8], at: usize) -> Result<u16, IeError> {
    let mut bytes = value_at(data, at, 2)?;
    Ok(bytes.get_u16())
}

/// Read a big-endian u32 at `at` inside an IE value
pub fn be_u32(data: &[u8], at: usize) -> Result<u32, IeError> {
    let mut bytes = value_at(data, at, 4)?;
    Ok(bytes.get_u32())
}

/// Read the first byte of an IE value, which must not be empty
pub fn first_byte(value: &[u8], field: &'static str) -> Result<u8, IeError> {
    value.first().copied().ok_or_else(|| IeError::InvalidValue {
        field,
        reason: "empty value".to_string(),
    })
}

/// Result of offering an IE to a decoder
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IeOutcome {
    /// The IE was decoded; carries the full frame size including tag and length
    Matched(usize),
    /// The tag is not the one this decoder handles
    NotMatched,
    /// The IE is recognised but its framing or content is invalid
    Malformed(IeError),
}

/// One framed IE as seen by a leaf decoder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IeFrame<'a> {
    pub tag: u8,
    /// Instance nibble (v2 only, zero otherwise)
    pub instance: u8,
    pub value: &'a [u8],
    /// Total bytes occupied on the wire
    pub size: usize,
}

/// Frame a fixed-length Tag-Value IE (v0/v1)
pub fn tv(data: &[u8], tag: u8, len: usize) -> Result<Option<IeFrame<'_>>, IeError> {
    if data.first() != Some(&tag) {
        return Ok(None);
    }
    let size = 1 + len;
    let value = data.get(1..size).ok_or(IeError::Truncated {
        needed: size,
        available: data.len(),
    })?;
    Ok(Some(IeFrame {
        tag,
        instance: 0,
        value,
        size,
    }))
}

fn tlv(data: &[u8], tag: u8, prefix: usize) -> Result<Option<IeFrame<'_>>, IeError> {
    if data.first() != Some(&tag) {
        return Ok(None);
    }
    let length = be_u16(data, 1)? as usize;
    let size = prefix + length;
    let value = data.get(prefix..size).ok_or(IeError::Truncated {
        needed: size,
        available: data.len(),
    })?;
    let instance = if prefix == TLV_V2_PREFIX {
        data[3] & 0x0F
    } else {
        0
    };
    Ok(Some(IeFrame {
        tag,
        instance,
        value,
        size,
    }))
}

/// Frame a v0/v1 Tag-Length-Value IE
pub fn tlv_v1(data: &[u8], tag: u8) -> Result<Option<IeFrame<'_>>, IeError> {
    tlv(data, tag, TLV_V1_PREFIX)
}

/// Frame a v2 Tag-Length-Instance-Value IE
pub fn tlv_v2(data: &[u8], tag: u8) -> Result<Option<IeFrame<'_>>, IeError> {
    tlv(data, tag, TLV_V2_PREFIX)
}

fn skip_tlv(data: &[u8], prefix: usize) -> IeOutcome {
    let size = match be_u16(data, 1) {
        Ok(length) => prefix + length as usize,
        Err(err) => return IeOutcome::Malformed(err),
    };
    if data.len() < size {
        return IeOutcome::Malformed(IeError::Truncated {
            needed: size,
            available: data.len(),
        });
    }
    IeOutcome::Matched(size)
}

/// Consume an unregistered v0/v1 TLV IE without interpreting it
pub fn skip_tlv_v1(data: &[u8]) -> IeOutcome {
    skip_tlv(data, TLV_V1_PREFIX)
}

/// Consume an unregistered v2 IE without interpreting it
pub fn skip_tlv_v2(data: &[u8]) -> IeOutcome {
    skip_tlv(data, TLV_V2_PREFIX)
}

/// Decoder that consumes a known TV IE of fixed length and keeps nothing
pub fn skip_tv(tag: u8, len: usize) -> impl Fn(&[u8], &mut Message) -> IeOutcome + Send + Sync {
    move |data: &[u8], _message: &mut Message| match tv(data, tag, len) {
        Ok(Some(frame)) => IeOutcome::Matched(frame.size),
        Ok(None) => IeOutcome::NotMatched,
        Err(err) => IeOutcome::Malformed(err),
    }
}

/// Decoder for a known TLV IE whose content is not kept
pub fn skip_tlv_ie(
    version: Version,
    tag: u8,
) -> impl Fn(&[u8], &mut Message) -> IeOutcome + Send + Sync {
    move |data: &[u8], _message: &mut Message| {
        let framed = match version {
            Version::V2 => tlv_v2(data, tag),
            _ => tlv_v1(data, tag),
        };
        match framed {
            Ok(Some(frame)) => IeOutcome::Matched(frame.size),
            Ok(None) => IeOutcome::NotMatched,
            Err(err) => IeOutcome::Malformed(err),
        }
    }
}

/// Skip rule applied to tags without a decoder
fn fallback(version: Version, tag: u8, data: &[u8]) -> IeOutcome {
    match version {
        Version::V0 | Version::V1 if tag & TLV_CLASS_BIT != 0 => skip_tlv_v1(data),
        Version::V2 => skip_tlv_v2(data),
        _ => IeOutcome::NotMatched,
    }
}

/// Registry entry: receives the body from the IE's tag byte onward
pub type DecoderFn = Box<dyn Fn(&[u8], &mut Message) -> IeOutcome + Send + Sync>;

/// Result of a registration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    Added,
    Replaced,
}

/// Per-version IE decoder tables
///
/// Each version owns a dense table indexed by tag so lookups never hash.
/// Decoding borrows the registry immutably, so one registry can serve any
/// number of threads; registration needs `&mut self`.
pub struct IeRegistry {
    tables: [Vec<Option<DecoderFn>>; 3],
}

impl IeRegistry {
    /// Create a registry with every built-in v0, v1 and v2 decoder
    pub fn new() -> Self {
        let mut registry = Self::empty();
        crate::ie::v0::register(&mut registry);
        crate::ie::v1::register(&mut registry);
        crate::ie::v2::register(&mut registry);
        registry
    }

    /// Create a registry without decoders; only the skip rules apply
    pub fn empty() -> Self {
        let table = || (0..=MAX_IE).map(|_| None).collect::<Vec<Option<DecoderFn>>>();
        Self {
            tables: [table(), table(), table()],
        }
    }

    /// Process-wide default registry, built on first use
    pub fn global() -> &'static IeRegistry {
        static GLOBAL: OnceLock<IeRegistry> = OnceLock::new();
        GLOBAL.get_or_init(IeRegistry::new)
    }

    fn table(&self, version: Version) -> &[Option<DecoderFn>] {
        &self.tables[version.index()]
    }

    /// Register (or replace) the decoder for `tag` in `version`'s table
    pub fn register<F>(&mut self, version: Version, tag: u8, decoder: F) -> Registration
    where
        F: Fn(&[u8], &mut Message) -> IeOutcome + Send + Sync + 'static,
    {
        let slot = &mut self.tables[version.index()][tag as usize];
        let registration = if slot.is_some() {
            Registration::Replaced
        } else {
            Registration::Added
        };
        *slot = Some(Box::new(decoder));
        registration
    }

    /// Register a decoder using the raw 3-bit version number
    pub fn register_ie_decoder<F>(
        &mut self,
        version: u8,
        tag: u8,
        decoder: F,
    ) -> Result<Registration, CodecError>
    where
        F: Fn(&[u8], &mut Message) -> IeOutcome + Send + Sync + 'static,
    {
        let version =
            Version::try_from(version).map_err(|_| CodecError::UnsupportedVersion(version))?;
        Ok(self.register(version, tag, decoder))
    }

    /// Check if a tag has a decoder for this version
    pub fn is_registered(&self, version: Version, tag: u8) -> bool {
        self.table(version)[tag as usize].is_some()
    }

    /// Get all tags with a decoder for this version, in ascending order
    pub fn registered_tags(&self, version: Version) -> Vec<u8> {
        self.table(version)
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(tag, _)| tag as u8)
            .collect()
    }

    /// Decode one GTP-C datagram
    pub fn decode(&self, data: &[u8]) -> Result<Message, CodecError> {
        let (header, offset) = Header::decode(data)?;
        tracing::debug!(
            version = ?header.version(),
            message_type = header.message_type(),
            body_offset = offset,
            "decoded GTP-C header"
        );

        let version = header.version();
        let mut message = Message::new(header);
        self.decode_body(version, &data[offset..], offset, &mut message)?;
        Ok(message)
    }

    /// Walk the IE sequence of `body`; `base` is the body's offset in the datagram
    fn decode_body(
        &self,
        version: Version,
        body: &[u8],
        base: usize,
        message: &mut Message,
    ) -> Result<(), CodecError> {
        let table = self.table(version);
        let mut idx = 0;

        while idx < body.len() {
            let tag = body[idx];
            let rest = &body[idx..];
            let offset = base + idx;

            let outcome = match &table[tag as usize] {
                Some(decoder) => decoder(rest, &mut *message),
                None => IeOutcome::NotMatched,
            };
            let outcome = match outcome {
                IeOutcome::NotMatched => {
                    tracing::debug!(tag, offset, "no decoder for IE, trying skip rule");
                    fallback(version, tag, rest)
                }
                outcome => outcome,
            };

            let malformed = |source| CodecError::IeDecode {
                tag,
                offset,
                source,
            };
            match outcome {
                IeOutcome::Matched(0) => return Err(malformed(IeError::NoProgress)),
                IeOutcome::Matched(consumed) if consumed > rest.len() => {
                    return Err(malformed(IeError::Overrun {
                        consumed,
                        available: rest.len(),
                    }));
                }
                IeOutcome::Matched(consumed) => {
                    tracing::trace!(tag, offset, consumed, "IE decoded");
                    idx += consumed;
                }
                IeOutcome::Malformed(source) => return Err(malformed(source)),
                IeOutcome::NotMatched => {
                    tracing::warn!(
                        tag,
                        offset,
                        "unknown TV IE without skip rule, stopping body decode"
                    );
                    return Err(CodecError::BodyIncomplete {
                        tag,
                        offset,
                        length: base + body.len(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl Default for IeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = |version| self.table(version).iter().flatten().count();
        f.debug_struct("IeRegistry")
            .field("v0", &count(Version::V0))
            .field("v1", &count(Version::V1))
            .field("v2", &count(Version::V2))
            .finish()
    }
}

/// Build the process-wide registry if needed and return it
pub fn initialize() -> &'static IeRegistry {
    IeRegistry::global()
}

/// Decode one GTP-C datagram with the process-wide registry
pub fn decode(data: &[u8]) -> Result<Message, CodecError> {
    IeRegistry::global().decode(data)
}
