//! GTP-C message model
//!
//! A `Message` pairs a decoded header with a body of the same version. The
//! body starts empty and is filled in by the IE decoders as the dispatch loop
//! walks the datagram; every IE-backed field is `None` until its IE is seen.

use crate::codec::IeError;
use crate::datatypes::{
    EndUserAddress, RoutingAreaIdentity, SelectionMode, UserLocation, Version,
};
use crate::header::Header;
use std::net::IpAddr;

/// IEs whose wire layout is the same in GTPv0 and GTPv1
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GprsContext {
    pub cause: Option<u8>,
    pub imsi: Option<String>,
    pub routing_area: Option<RoutingAreaIdentity>,
    pub reordering_required: Option<bool>,
    pub recovery: Option<u8>,
    pub selection_mode: Option<SelectionMode>,
    pub charging_id: Option<u32>,
    pub end_user_address: Option<EndUserAddress>,
    pub apn: Option<String>,
    /// First GSN Address IE of the message
    pub gsn_address_signalling: Option<IpAddr>,
    /// Second GSN Address IE of the message
    pub gsn_address_user: Option<IpAddr>,
    pub msisdn: Option<String>,
}

impl GprsContext {
    /// Store a GSN address in the first free slot: signalling first, then user traffic
    pub fn push_gsn_address(&mut self, address: IpAddr) {
        if self.gsn_address_signalling.is_none() {
            self.gsn_address_signalling = Some(address);
        } else if self.gsn_address_user.is_none() {
            self.gsn_address_user = Some(address);
        } else {
            tracing::debug!(%address, "ignoring extra GSN Address IE");
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GtpV0Body {
    pub context: GprsContext,
    /// QoS profile, three raw octets
    pub qos: Option<[u8; 3]>,
    pub flow_label_data: Option<u16>,
    pub flow_label_signalling: Option<u16>,
}

/// MS Time Zone IE (TS 29.060 Section 7.7.101)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MsTimeZone {
    /// Offset from UTC in quarter hours, TBCD-coded as on the air interface
    pub time_zone: u8,
    /// Daylight saving adjustment in hours (0-2)
    pub dst: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GtpV1Body {
    pub context: GprsContext,
    pub teid_data: Option<u32>,
    pub teid_control_plane: Option<u32>,
    pub teardown_ind: Option<bool>,
    pub nsapi: Option<u8>,
    /// Charging characteristics flags, low nibble of the first octet
    pub charging_characteristics: Option<u8>,
    /// Allocation/retention priority octet of the QoS profile
    pub allocation_retention_priority: Option<u8>,
    pub common_flags: Option<u8>,
    pub rat_type: Option<u8>,
    pub user_location: Option<UserLocation>,
    pub ms_time_zone: Option<MsTimeZone>,
    pub imei: Option<String>,
    pub bearer_control_mode: Option<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GtpV2Body {
    pub imsi: Option<String>,
}

/// Per-version message body
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    V0(Box<GtpV0Body>),
    V1(Box<GtpV1Body>),
    V2(GtpV2Body),
}

impl Body {
    fn empty(version: Version) -> Self {
        match version {
            Version::V0 => Body::V0(Box::default()),
            Version::V1 => Body::V1(Box::default()),
            Version::V2 => Body::V2(GtpV2Body::default()),
        }
    }
}

/// A decoded GTP-C message
///
/// The body variant always matches the header version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    header: Header,
    body: Body,
}

impl Message {
    /// Create a message with an empty body for the header's version
    pub fn new(header: Header) -> Self {
        let body = Body::empty(header.version());
        Message { header, body }
    }

    pub fn version(&self) -> Version {
        self.header.version()
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Shared GTPv0/GTPv1 fields, `None` for GTPv2 messages
    pub fn gprs_context(&self) -> Option<&GprsContext> {
        match &self.body {
            Body::V0(body) => Some(&body.context),
            Body::V1(body) => Some(&body.context),
            Body::V2(_) => None,
        }
    }

    pub fn gprs_context_mut(&mut self) -> Result<&mut GprsContext, IeError> {
        match &mut self.body {
            Body::V0(body) => Ok(&mut body.context),
            Body::V1(body) => Ok(&mut body.context),
            Body::V2(_) => Err(IeError::BodyMismatch {
                expected: Version::V1,
            }),
        }
    }

    pub fn v0_mut(&mut self) -> Result<&mut GtpV0Body, IeError> {
        match &mut self.body {
            Body::V0(body) => Ok(&mut **body),
            _ => Err(IeError::BodyMismatch {
                expected: Version::V0,
            }),
        }
    }

    pub fn v1_mut(&mut self) -> Result<&mut GtpV1Body, IeError> {
        match &mut self.body {
            Body::V1(body) => Ok(&mut **body),
            _ => Err(IeError::BodyMismatch {
                expected: Version::V1,
            }),
        }
    }

    pub fn v2_mut(&mut self) -> Result<&mut GtpV2Body, IeError> {
        match &mut self.body {
            Body::V2(body) => Ok(body),
            _ => Err(IeError::BodyMismatch {
                expected: Version::V2,
            }),
        }
    }

    /// Subscriber IMSI, whichever version carried it
    pub fn imsi(&self) -> Option<&str> {
        match &self.body {
            Body::V0(body) => body.context.imsi.as_deref(),
            Body::V1(body) => body.context.imsi.as_deref(),
            Body::V2(body) => body.imsi.as_deref(),
        }
    }

    pub fn into_parts(self) -> (Header, Body) {
        (self.header, self.body)
    }
}
