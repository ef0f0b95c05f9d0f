// ABOUTME: GTP-C header state machine: version detection and per-version fixed header decoding
// ABOUTME: Returns the decoded header and the offset of the first information element

use crate::codec::{CodecError, decode_u8, decode_u16, decode_u32, decode_u64, skip};
use crate::datatypes::Version;
use std::io::Cursor;

/// GTPv0 header size (TS 09.60 Section 6)
pub const GTPV0_HEADER_LEN: usize = 20;

/// Mandatory part of a GTPv1 header, also the base of its length field
pub const GTPV1_MANDATORY_LEN: usize = 8;

/// Flags, message type and length of a GTPv2 header
pub const GTPV2_PREFIX_LEN: usize = 4;

/// Next-extension-header value that announces another chained extension
pub const EXTENSION_HEADER_MARKER: u8 = 0x02;

/// Bytes consumed per chained GTPv1 extension header
pub const EXTENSION_HEADER_LEN: usize = 4;

const PROTOCOL_TYPE_GTP: u8 = 0x10;
const V0_SNDCP_FLAG: u8 = 0x01;
const V1_SEQUENCE_FLAG: u8 = 0x02;
const V2_TEID_FLAG: u8 = 0x08;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GtpV0Header {
    pub message_type: u8,
    pub message_length: u16,
    pub sequence_number: u16,
    pub flow_label: u16,
    /// SNDCP N-PDU LLC number, present only when the SNDCP flag is set
    pub sndcp_npdu: Option<u8>,
    /// Tunnel identifier, kept as the raw 8 bytes
    pub tid: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GtpV1Header {
    pub message_type: u8,
    pub message_length: u16,
    pub teid: u32,
    pub sequence_number: Option<u16>,
    /// Number of chained extension headers walked past
    pub extension_headers: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GtpV2Header {
    pub message_type: u8,
    pub message_length: u16,
    pub teid_present: bool,
    /// Top 24 bits of the last 4-byte header word.
    ///
    /// When the T flag is set the TEID word is read first and then replaced
    /// by this value, so `teid` holds the sequence number field in that case.
    pub teid: u32,
}

/// Decoded GTP-C header, one variant per protocol version
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Header {
    V0(GtpV0Header),
    V1(GtpV1Header),
    V2(GtpV2Header),
}

impl Header {
    /// Decode the header at the start of `data`.
    ///
    /// Returns the header and the offset at which the information elements
    /// begin. Every read is bounds-checked; a short buffer is
    /// `CodecError::Truncated`.
    pub fn decode(data: &[u8]) -> Result<(Header, usize), CodecError> {
        let mut buf = Cursor::new(data);
        let flags = decode_u8(&mut buf)?;

        let header = match Version::from_flags(flags) {
            Ok(Version::V0) => Header::V0(decode_v0(flags, &mut buf)?),
            Ok(Version::V1) => Header::V1(decode_v1(flags, &mut buf)?),
            Ok(Version::V2) => Header::V2(decode_v2(flags, &mut buf)?),
            Err(version) => return Err(CodecError::UnsupportedVersion(version)),
        };

        Ok((header, buf.position() as usize))
    }

    pub fn version(&self) -> Version {
        match self {
            Header::V0(_) => Version::V0,
            Header::V1(_) => Version::V1,
            Header::V2(_) => Version::V2,
        }
    }

    pub fn message_type(&self) -> u8 {
        match self {
            Header::V0(h) => h.message_type,
            Header::V1(h) => h.message_type,
            Header::V2(h) => h.message_type,
        }
    }

    pub fn message_length(&self) -> u16 {
        match self {
            Header::V0(h) => h.message_length,
            Header::V1(h) => h.message_length,
            Header::V2(h) => h.message_length,
        }
    }

    /// Tunnel endpoint identifier (GTPv1 and GTPv2 only)
    pub fn teid(&self) -> Option<u32> {
        match self {
            Header::V0(_) => None,
            Header::V1(h) => Some(h.teid),
            Header::V2(h) => Some(h.teid),
        }
    }

    pub fn sequence_number(&self) -> Option<u16> {
        match self {
            Header::V0(h) => Some(h.sequence_number),
            Header::V1(h) => h.sequence_number,
            Header::V2(_) => None,
        }
    }
}

fn check_protocol_type(flags: u8, version: Version) -> Result<(), CodecError> {
    if flags & PROTOCOL_TYPE_GTP == 0 {
        return Err(CodecError::NotGtp { version });
    }
    Ok(())
}

// The declared length may not promise more than the datagram holds
fn check_declared_length(
    buf: &Cursor<&[u8]>,
    base: usize,
    declared: u16,
) -> Result<(), CodecError> {
    let available = buf.get_ref().len().saturating_sub(base);
    if declared as usize > available {
        return Err(CodecError::Truncated {
            offset: base,
            needed: declared as usize,
            available,
        });
    }
    Ok(())
}

fn decode_v0(flags: u8, buf: &mut Cursor<&[u8]>) -> Result<GtpV0Header, CodecError> {
    check_protocol_type(flags, Version::V0)?;

    let message_type = decode_u8(buf)?;
    let message_length = decode_u16(buf)?;
    let sequence_number = decode_u16(buf)?;
    let flow_label = decode_u16(buf)?;
    let llc_number = decode_u8(buf)?;
    skip(buf, 3)?;
    let tid = decode_u64(buf)?;

    check_declared_length(buf, GTPV0_HEADER_LEN, message_length)?;

    Ok(GtpV0Header {
        message_type,
        message_length,
        sequence_number,
        flow_label,
        sndcp_npdu: (flags & V0_SNDCP_FLAG != 0).then_some(llc_number),
        tid,
    })
}

fn decode_v1(flags: u8, buf: &mut Cursor<&[u8]>) -> Result<GtpV1Header, CodecError> {
    check_protocol_type(flags, Version::V1)?;

    let message_type = decode_u8(buf)?;
    let message_length = decode_u16(buf)?;
    let teid = decode_u32(buf)?;
    check_declared_length(buf, GTPV1_MANDATORY_LEN, message_length)?;

    let sequence_number = if flags & V1_SEQUENCE_FLAG != 0 {
        Some(decode_u16(buf)?)
    } else {
        None
    };

    // N-PDU number and next extension header type
    let _npdu = decode_u8(buf)?;
    let mut next_extension = decode_u8(buf)?;

    let mut extension_headers = 0;
    while next_extension == EXTENSION_HEADER_MARKER {
        skip(buf, EXTENSION_HEADER_LEN - 1)?;
        next_extension = decode_u8(buf)?;
        extension_headers += 1;
    }

    Ok(GtpV1Header {
        message_type,
        message_length,
        teid,
        sequence_number,
        extension_headers,
    })
}

fn decode_v2(flags: u8, buf: &mut Cursor<&[u8]>) -> Result<GtpV2Header, CodecError> {
    let message_type = decode_u8(buf)?;
    let message_length = decode_u16(buf)?;

    let actual = buf.get_ref().len() - GTPV2_PREFIX_LEN;
    if actual != message_length as usize {
        return Err(CodecError::LengthMismatch {
            declared: message_length,
            actual,
        });
    }

    let teid_present = flags & V2_TEID_FLAG != 0;
    if teid_present {
        let _teid = decode_u32(buf)?;
    }
    // sequence number (24 bits) + spare, stands in for the TEID read above
    let teid = decode_u32(buf)? >> 8;

    Ok(GtpV2Header {
        message_type,
        message_length,
        teid_present,
        teid,
    })
}
