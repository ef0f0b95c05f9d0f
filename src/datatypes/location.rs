// ABOUTME: PLMN and location identities (MCC/MNC/LAC, routing area, cell global identity)
// ABOUTME: Shared by the Routing Area Identity and User Location Information IEs

use super::bcd::{FILLER, tbcd_digit};
use crate::codec::{IeError, be_u16};

/// Size of the MCC/MNC/LAC block on the wire
pub const LOCATION_AREA_LEN: usize = 5;

/// Size of a Routing Area Identity value (location area + RAC)
pub const ROUTING_AREA_LEN: usize = LOCATION_AREA_LEN + 1;

/// Size of a Cell Global Identity (location area + cell identity)
pub const CELL_GLOBAL_IDENTITY_LEN: usize = LOCATION_AREA_LEN + 2;

// Mirrors a `%x` rendering for the filler so a mis-coded digit stays visible
fn nibble_char(nibble: u8) -> char {
    tbcd_digit(nibble).unwrap_or('f')
}

/// Location Area Identification: PLMN (MCC + MNC) and Location Area Code
///
/// Wire layout (TS 24.008 Section 10.5.1.3):
/// ```text
///   octet 1   MCC digit 2 | MCC digit 1
///   octet 2   MNC digit 3 | MCC digit 3    (MNC digit 3 = 0xF for a 2-digit MNC)
///   octet 3   MNC digit 2 | MNC digit 1
///   octet 4-5 LAC
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocationArea {
    /// Mobile Country Code, always three digits
    pub mcc: String,
    /// Mobile Network Code, two or three digits
    pub mnc: String,
    /// Location Area Code
    pub lac: u16,
}

impl LocationArea {
    /// Decode the 5-byte MCC/MNC/LAC block at the start of `data`
    pub fn decode(data: &[u8]) -> Result<Self, IeError> {
        if data.len() < LOCATION_AREA_LEN {
            return Err(IeError::Truncated {
                needed: LOCATION_AREA_LEN,
                available: data.len(),
            });
        }

        let mcc = [data[0] & 0x0F, data[0] >> 4, data[1] & 0x0F]
            .into_iter()
            .map(nibble_char)
            .collect();

        let mnc_digit3 = data[1] >> 4;
        let mut mnc = String::with_capacity(3);
        mnc.push(nibble_char(data[2] & 0x0F));
        mnc.push(nibble_char(data[2] >> 4));
        if mnc_digit3 != FILLER {
            mnc.push(nibble_char(mnc_digit3));
        }

        let lac = be_u16(data, 3)?;

        Ok(LocationArea { mcc, mnc, lac })
    }
}

/// Routing Area Identity: location area plus Routing Area Code
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RoutingAreaIdentity {
    pub location_area: LocationArea,
    pub rac: u8,
}

impl RoutingAreaIdentity {
    pub fn decode(data: &[u8]) -> Result<Self, IeError> {
        if data.len() < ROUTING_AREA_LEN {
            return Err(IeError::Truncated {
                needed: ROUTING_AREA_LEN,
                available: data.len(),
            });
        }
        Ok(RoutingAreaIdentity {
            location_area: LocationArea::decode(data)?,
            rac: data[LOCATION_AREA_LEN],
        })
    }
}

/// Cell Global Identity: location area plus Cell Identity
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellGlobalIdentity {
    pub location_area: LocationArea,
    pub cell_id: u16,
}

impl CellGlobalIdentity {
    pub fn decode(data: &[u8]) -> Result<Self, IeError> {
        Ok(CellGlobalIdentity {
            location_area: LocationArea::decode(data)?,
            cell_id: be_u16(data, LOCATION_AREA_LEN)?,
        })
    }
}

/// Geographic location type of a GTPv1 User Location Information IE
pub const GEOGRAPHIC_LOCATION_CGI: u8 = 0;

/// GTPv1 User Location Information (TS 29.060 Section 7.7.51)
///
/// Only the CGI form is broken out; SAI and RAI forms keep just the type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserLocation {
    pub location_type: u8,
    pub cgi: Option<CellGlobalIdentity>,
}

impl UserLocation {
    pub fn decode(value: &[u8]) -> Result<Self, IeError> {
        let (&location_type, rest) = value.split_first().ok_or(IeError::Truncated {
            needed: 1,
            available: 0,
        })?;

        let cgi = match location_type {
            GEOGRAPHIC_LOCATION_CGI => Some(CellGlobalIdentity::decode(rest)?),
            _ => None,
        };

        Ok(UserLocation { location_type, cgi })
    }
}
