// GTPv0 (TS 09.60) decoders

use super::register_tv_skips;
use crate::codec::{IeError, IeOutcome, IeRegistry, be_u16, skip_tlv_ie};
use crate::datatypes::{GtpV0IeType as Ie, Version};
use crate::frame::Message;
use crate::macros::{try_ie, tv_frame};

pub(crate) fn quality_of_service(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = tv_frame!(data, Ie::QualityOfServiceProfile);
    let profile = try_ie!(<[u8; 3]>::try_from(frame.value).map_err(|_| IeError::Truncated {
        needed: 3,
        available: frame.value.len(),
    }));
    try_ie!(message.v0_mut()).qos = Some(profile);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn flow_label_data(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = tv_frame!(data, Ie::FlowLabelDataI);
    let label = try_ie!(be_u16(frame.value, 0));
    try_ie!(message.v0_mut()).flow_label_data = Some(label);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn flow_label_signalling(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = tv_frame!(data, Ie::FlowLabelSignalling);
    let label = try_ie!(be_u16(frame.value, 0));
    try_ie!(message.v0_mut()).flow_label_signalling = Some(label);
    IeOutcome::Matched(frame.size)
}

const SKIPPED_TV: [Ie; 8] = [
    Ie::TemporaryLogicalLinkIdentity,
    Ie::PacketTmsi,
    Ie::AuthenticationTriplet,
    Ie::MapCause,
    Ie::PacketTmsiSignature,
    Ie::MsValidated,
    Ie::FlowLabelDataII,
    Ie::MsNotReachableReason,
];

pub(crate) fn register(registry: &mut IeRegistry) {
    super::register_context(registry, Version::V0);

    registry.register(Version::V0, Ie::QualityOfServiceProfile.tag(), quality_of_service);
    registry.register(Version::V0, Ie::FlowLabelDataI.tag(), flow_label_data);
    registry.register(Version::V0, Ie::FlowLabelSignalling.tag(), flow_label_signalling);

    register_tv_skips(
        registry,
        Version::V0,
        SKIPPED_TV.iter().map(|ie| (ie.tag(), ie.tv_length())),
    );

    let pco = Ie::ProtocolConfigurationOptions.tag();
    registry.register(Version::V0, pco, skip_tlv_ie(Version::V0, pco));
}
