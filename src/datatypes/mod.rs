mod apn;
pub mod bcd;
mod end_user_address;
mod ie_type;
mod location;
mod selection_mode;
mod version;

pub use apn::{MAX_APN_LEN, decode_apn};
pub use bcd::{BcdError, decode_bcd};
pub use end_user_address::{
    EndUserAddress, PDP_ORGANIZATION_ETSI, PDP_ORGANIZATION_IETF, PDP_TYPE_IPV4, PDP_TYPE_IPV4V6,
    PDP_TYPE_IPV6, decode_gsn_address,
};
pub use ie_type::{GtpV0IeType, GtpV1IeType, GtpV2IeType};
pub use location::{
    CELL_GLOBAL_IDENTITY_LEN, CellGlobalIdentity, GEOGRAPHIC_LOCATION_CGI, LOCATION_AREA_LEN,
    LocationArea, ROUTING_AREA_LEN, RoutingAreaIdentity, UserLocation,
};
pub use selection_mode::SelectionMode;
pub use version::Version;
