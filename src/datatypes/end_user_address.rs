use crate::codec::IeError;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// PDP type organisation: ETSI
pub const PDP_ORGANIZATION_ETSI: u8 = 0;
/// PDP type organisation: IETF
pub const PDP_ORGANIZATION_IETF: u8 = 1;

/// IETF PDP type numbers
pub const PDP_TYPE_IPV4: u8 = 0x21;
pub const PDP_TYPE_IPV6: u8 = 0x57;
pub const PDP_TYPE_IPV4V6: u8 = 0x8D;

/// End User Address IE (TS 29.060 Section 7.7.27)
///
/// The value starts with the PDP type organisation (low nibble of octet 1) and
/// the PDP type number, followed by an optional PDP address. The address length
/// tells the family apart: 4 bytes IPv4, 16 bytes IPv6, 20 bytes IPv4 followed
/// by IPv6. An empty address means dynamic allocation was requested.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EndUserAddress {
    pub pdp_type_organization: u8,
    pub pdp_type_number: u8,
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
}

impl EndUserAddress {
    pub fn decode(value: &[u8]) -> Result<Self, IeError> {
        let [organization, pdp_type_number, address @ ..] = value else {
            return Err(IeError::Truncated {
                needed: 2,
                available: value.len(),
            });
        };

        let mut eua = EndUserAddress {
            pdp_type_organization: organization & 0x0F,
            pdp_type_number: *pdp_type_number,
            ipv4: None,
            ipv6: None,
        };

        match address.len() {
            0 => {}
            4 => eua.ipv4 = ipv4_at(address, 0),
            16 => eua.ipv6 = ipv6_at(address, 0),
            20 => {
                eua.ipv4 = ipv4_at(address, 0);
                eua.ipv6 = ipv6_at(address, 4);
            }
            other => {
                tracing::warn!(length = other, "unexpected End User Address length");
            }
        }

        Ok(eua)
    }

    /// The allocated address, IPv4 preferred for dual-stack contexts
    pub fn address(&self) -> Option<IpAddr> {
        self.ipv4
            .map(IpAddr::V4)
            .or_else(|| self.ipv6.map(IpAddr::V6))
    }
}

pub(crate) fn ipv4_at(data: &[u8], at: usize) -> Option<Ipv4Addr> {
    let octets: [u8; 4] = data.get(at..at + 4)?.try_into().ok()?;
    Some(Ipv4Addr::from(octets))
}

pub(crate) fn ipv6_at(data: &[u8], at: usize) -> Option<Ipv6Addr> {
    let octets: [u8; 16] = data.get(at..at + 16)?.try_into().ok()?;
    Some(Ipv6Addr::from(octets))
}

/// Decode a GSN Address IE value (4-byte IPv4 or 16-byte IPv6)
pub fn decode_gsn_address(value: &[u8]) -> Option<IpAddr> {
    match value.len() {
        4 => ipv4_at(value, 0).map(IpAddr::V4),
        16 => ipv6_at(value, 0).map(IpAddr::V6),
        other => {
            tracing::warn!(length = other, "unexpected GSN Address length");
            None
        }
    }
}
