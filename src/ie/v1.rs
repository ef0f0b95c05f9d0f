// GTPv1-C (TS 29.060) decoders

use super::{bcd_field, register_tv_skips};
use crate::codec::{IeError, IeOutcome, IeRegistry, be_u32, first_byte, skip_tlv_ie, tlv_v1};
use crate::datatypes::bcd::MAX_IMEISV_DIGITS;
use crate::datatypes::{GtpV1IeType as Ie, UserLocation, Version};
use crate::frame::{Message, MsTimeZone};
use crate::macros::{ie_frame, try_ie, tv_frame};

pub(crate) fn teid_data(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = tv_frame!(data, Ie::TeidDataI);
    let teid = try_ie!(be_u32(frame.value, 0));
    try_ie!(message.v1_mut()).teid_data = Some(teid);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn teid_control_plane(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = tv_frame!(data, Ie::TeidControlPlane);
    let teid = try_ie!(be_u32(frame.value, 0));
    try_ie!(message.v1_mut()).teid_control_plane = Some(teid);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn teardown_ind(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = tv_frame!(data, Ie::TeardownInd);
    let octet = try_ie!(first_byte(frame.value, "teardown_ind"));
    try_ie!(message.v1_mut()).teardown_ind = Some(octet & 0x01 != 0);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn nsapi(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = tv_frame!(data, Ie::Nsapi);
    let octet = try_ie!(first_byte(frame.value, "nsapi"));
    try_ie!(message.v1_mut()).nsapi = Some(octet & 0x0F);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn charging_characteristics(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = tv_frame!(data, Ie::ChargingCharacteristics);
    let octet = try_ie!(first_byte(frame.value, "charging_characteristics"));
    try_ie!(message.v1_mut()).charging_characteristics = Some(octet & 0x0F);
    IeOutcome::Matched(frame.size)
}

/// QoS Profile: only the allocation/retention priority octet is kept
pub(crate) fn quality_of_service(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = ie_frame!(tlv_v1(data, Ie::QualityOfServiceProfile.tag()));
    let priority = try_ie!(first_byte(frame.value, "allocation_retention_priority"));
    try_ie!(message.v1_mut()).allocation_retention_priority = Some(priority);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn common_flags(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = ie_frame!(tlv_v1(data, Ie::CommonFlags.tag()));
    let flags = try_ie!(first_byte(frame.value, "common_flags"));
    try_ie!(message.v1_mut()).common_flags = Some(flags);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn rat_type(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = ie_frame!(tlv_v1(data, Ie::RatType.tag()));
    let rat = try_ie!(first_byte(frame.value, "rat_type"));
    try_ie!(message.v1_mut()).rat_type = Some(rat);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn user_location(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = ie_frame!(tlv_v1(data, Ie::UserLocationInformation.tag()));
    let location = try_ie!(UserLocation::decode(frame.value));
    try_ie!(message.v1_mut()).user_location = Some(location);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn ms_time_zone(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = ie_frame!(tlv_v1(data, Ie::MsTimeZone.tag()));
    let &[time_zone, dst, ..] = frame.value else {
        return IeOutcome::Malformed(IeError::Truncated {
            needed: 2,
            available: frame.value.len(),
        });
    };
    try_ie!(message.v1_mut()).ms_time_zone = Some(MsTimeZone {
        time_zone,
        dst: dst & 0x03,
    });
    IeOutcome::Matched(frame.size)
}

pub(crate) fn imei(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = ie_frame!(tlv_v1(data, Ie::ImeiSv.tag()));
    try_ie!(message.v1_mut()).imei = bcd_field(frame.value, MAX_IMEISV_DIGITS, "imei");
    IeOutcome::Matched(frame.size)
}

pub(crate) fn bearer_control_mode(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = ie_frame!(tlv_v1(data, Ie::BearerControlMode.tag()));
    let mode = try_ie!(first_byte(frame.value, "bearer_control_mode"));
    try_ie!(message.v1_mut()).bearer_control_mode = Some(mode);
    IeOutcome::Matched(frame.size)
}

const SKIPPED_TV: [Ie; 15] = [
    Ie::TemporaryLogicalLinkIdentity,
    Ie::PacketTmsi,
    Ie::AuthenticationTriplet,
    Ie::MapCause,
    Ie::PacketTmsiSignature,
    Ie::MsValidated,
    Ie::TeidDataII,
    Ie::RanapCause,
    Ie::RabContext,
    Ie::RadioPrioritySms,
    Ie::RadioPriority,
    Ie::PacketFlowId,
    Ie::TraceReference,
    Ie::TraceType,
    Ie::MsNotReachableReason,
];

// Known TLV elements that are consumed without being kept
const SKIPPED_TLV: [Ie; 3] = [
    Ie::ProtocolConfigurationOptions,
    Ie::MsInfoChangeReportingAction,
    Ie::EvolvedAllocationRetentionPriorityI,
];

pub(crate) fn register(registry: &mut IeRegistry) {
    super::register_context(registry, Version::V1);

    registry.register(Version::V1, Ie::TeidDataI.tag(), teid_data);
    registry.register(Version::V1, Ie::TeidControlPlane.tag(), teid_control_plane);
    registry.register(Version::V1, Ie::TeardownInd.tag(), teardown_ind);
    registry.register(Version::V1, Ie::Nsapi.tag(), nsapi);
    registry.register(Version::V1, Ie::ChargingCharacteristics.tag(), charging_characteristics);
    registry.register(Version::V1, Ie::QualityOfServiceProfile.tag(), quality_of_service);
    registry.register(Version::V1, Ie::CommonFlags.tag(), common_flags);
    registry.register(Version::V1, Ie::RatType.tag(), rat_type);
    registry.register(Version::V1, Ie::UserLocationInformation.tag(), user_location);
    registry.register(Version::V1, Ie::MsTimeZone.tag(), ms_time_zone);
    registry.register(Version::V1, Ie::ImeiSv.tag(), imei);
    registry.register(Version::V1, Ie::BearerControlMode.tag(), bearer_control_mode);

    register_tv_skips(
        registry,
        Version::V1,
        SKIPPED_TV.iter().map(|ie| (ie.tag(), ie.tv_length())),
    );
    for ie in SKIPPED_TLV {
        registry.register(Version::V1, ie.tag(), skip_tlv_ie(Version::V1, ie.tag()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Body, GtpV1Body};
    use crate::ie::test_support::v1_message;

    fn v1_body(message: &Message) -> &GtpV1Body {
        match message.body() {
            Body::V1(body) => &**body,
            other => panic!("expected v1 body, got {other:?}"),
        }
    }

    #[test]
    fn tunnel_identifiers() {
        let mut message = v1_message();
        assert_eq!(
            teid_data(&[0x10, 0x00, 0x00, 0x04, 0xD2], &mut message),
            IeOutcome::Matched(5)
        );
        assert_eq!(
            teid_control_plane(&[0x11, 0xDE, 0xAD, 0xBE, 0xEF], &mut message),
            IeOutcome::Matched(5)
        );
        let body = v1_body(&message);
        assert_eq!(body.teid_data, Some(1234));
        assert_eq!(body.teid_control_plane, Some(0xDEAD_BEEF));
    }

    #[test]
    fn single_octet_fields() {
        let mut message = v1_message();
        assert_eq!(teardown_ind(&[0x13, 0xFF], &mut message), IeOutcome::Matched(2));
        assert_eq!(nsapi(&[0x14, 0xF5], &mut message), IeOutcome::Matched(2));
        assert_eq!(
            charging_characteristics(&[0x1A, 0x08, 0x00], &mut message),
            IeOutcome::Matched(3)
        );
        let body = v1_body(&message);
        assert_eq!(body.teardown_ind, Some(true));
        assert_eq!(body.nsapi, Some(5));
        assert_eq!(body.charging_characteristics, Some(8));
    }

    #[test]
    fn qos_keeps_allocation_retention_priority() {
        let mut message = v1_message();
        let data = [0x87, 0x00, 0x04, 0x02, 0x0B, 0x92, 0x1F];
        assert_eq!(quality_of_service(&data, &mut message), IeOutcome::Matched(7));
        assert_eq!(v1_body(&message).allocation_retention_priority, Some(0x02));
    }

    #[test]
    fn empty_single_octet_tlv_is_malformed() {
        let mut message = v1_message();
        assert!(matches!(
            rat_type(&[0x97, 0x00, 0x00], &mut message),
            IeOutcome::Malformed(IeError::InvalidValue { field: "rat_type", .. })
        ));
    }

    #[test]
    fn time_zone_and_imei() {
        let mut message = v1_message();
        assert_eq!(
            ms_time_zone(&[0x99, 0x00, 0x02, 0x40, 0xFD], &mut message),
            IeOutcome::Matched(5)
        );
        let imeisv = [0x9A, 0x00, 0x08, 0x53, 0x08, 0x71, 0x20, 0x50, 0x44, 0x11, 0x20];
        assert_eq!(imei(&imeisv, &mut message), IeOutcome::Matched(11));

        let body = v1_body(&message);
        assert_eq!(
            body.ms_time_zone,
            Some(MsTimeZone {
                time_zone: 0x40,
                dst: 1
            })
        );
        assert_eq!(body.imei.as_deref(), Some("3580170205441102"));
    }

    #[test]
    fn short_time_zone_is_truncated() {
        let mut message = v1_message();
        assert_eq!(
            ms_time_zone(&[0x99, 0x00, 0x01, 0x40], &mut message),
            IeOutcome::Malformed(IeError::Truncated {
                needed: 2,
                available: 1
            })
        );
    }

    #[test]
    fn user_location_cgi() {
        let mut message = v1_message();
        let data = [0x98, 0x00, 0x08, 0x00, 0x64, 0xF0, 0x00, 0x00, 0x0A, 0x00, 0x63];
        assert_eq!(user_location(&data, &mut message), IeOutcome::Matched(11));
        let cgi = v1_body(&message)
            .user_location
            .as_ref()
            .and_then(|uli| uli.cgi.as_ref())
            .unwrap();
        assert_eq!(cgi.location_area.mcc, "460");
        assert_eq!(cgi.location_area.mnc, "00");
        assert_eq!(cgi.cell_id, 99);
    }

    #[test]
    fn known_tlv_without_decoder_is_consumed() {
        let mut registry = IeRegistry::empty();
        register(&mut registry);
        assert!(registry.is_registered(Version::V1, 0x84));
        assert!(registry.is_registered(Version::V1, 0xBF));
        assert!(registry.is_registered(Version::V1, 0x16));
        assert!(!registry.is_registered(Version::V1, 0x7E));
    }
}
