//! Leaf information element decoders
//!
//! Each decoder receives the body from its tag byte onward, frames the IE,
//! stores what it understood in the `Message` and reports how many bytes the
//! IE occupied. GTPv0 and GTPv1 share tag numbers and layouts for the
//! elements that describe the PDP context, so those decoders live here and
//! both version modules register them.

pub mod v0;
pub mod v1;
pub mod v2;

use crate::codec::{IeOutcome, IeRegistry, be_u32, first_byte, skip_tv, tlv_v1};
use crate::datatypes::bcd::{MAX_IMSI_DIGITS, MAX_MSISDN_DIGITS};
use crate::datatypes::{
    EndUserAddress, GtpV1IeType as Ie, RoutingAreaIdentity, SelectionMode, Version, decode_apn,
    decode_bcd, decode_gsn_address,
};
use crate::frame::Message;
use crate::macros::{ie_frame, try_ie, tv_frame};

/// Decode a BCD digit string; a rejected value leaves the field unset
pub(crate) fn bcd_field(value: &[u8], max_digits: usize, field: &'static str) -> Option<String> {
    match decode_bcd(value, max_digits) {
        Ok(digits) => Some(digits),
        Err(err) => {
            tracing::debug!(field, %err, "BCD value rejected");
            None
        }
    }
}

/// Register `skip_tv` for known TV elements whose content is not kept
pub(crate) fn register_tv_skips<I>(registry: &mut IeRegistry, version: Version, ies: I)
where
    I: IntoIterator<Item = (u8, Option<usize>)>,
{
    for (tag, length) in ies {
        if let Some(length) = length {
            registry.register(version, tag, skip_tv(tag, length));
        }
    }
}

pub(crate) fn cause(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = tv_frame!(data, Ie::Cause);
    let cause = try_ie!(first_byte(frame.value, "cause"));
    try_ie!(message.gprs_context_mut()).cause = Some(cause);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn imsi(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = tv_frame!(data, Ie::Imsi);
    try_ie!(message.gprs_context_mut()).imsi = bcd_field(frame.value, MAX_IMSI_DIGITS, "imsi");
    IeOutcome::Matched(frame.size)
}

pub(crate) fn routing_area_identity(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = tv_frame!(data, Ie::RoutingAreaIdentity);
    let rai = try_ie!(RoutingAreaIdentity::decode(frame.value));
    try_ie!(message.gprs_context_mut()).routing_area = Some(rai);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn reordering_required(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = tv_frame!(data, Ie::ReorderingRequired);
    let octet = try_ie!(first_byte(frame.value, "reordering_required"));
    try_ie!(message.gprs_context_mut()).reordering_required = Some(octet & 0x01 != 0);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn recovery(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = tv_frame!(data, Ie::Recovery);
    let restart_counter = try_ie!(first_byte(frame.value, "recovery"));
    try_ie!(message.gprs_context_mut()).recovery = Some(restart_counter);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn selection_mode(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = tv_frame!(data, Ie::SelectionMode);
    let octet = try_ie!(first_byte(frame.value, "selection_mode"));
    try_ie!(message.gprs_context_mut()).selection_mode = Some(SelectionMode::from_octet(octet));
    IeOutcome::Matched(frame.size)
}

pub(crate) fn charging_id(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = tv_frame!(data, Ie::ChargingId);
    let charging_id = try_ie!(be_u32(frame.value, 0));
    try_ie!(message.gprs_context_mut()).charging_id = Some(charging_id);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn end_user_address(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = ie_frame!(tlv_v1(data, Ie::EndUserAddress.tag()));
    let eua = try_ie!(EndUserAddress::decode(frame.value));
    try_ie!(message.gprs_context_mut()).end_user_address = Some(eua);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn access_point_name(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = ie_frame!(tlv_v1(data, Ie::AccessPointName.tag()));
    let apn = try_ie!(decode_apn(frame.value));
    try_ie!(message.gprs_context_mut()).apn = Some(apn);
    IeOutcome::Matched(frame.size)
}

pub(crate) fn gsn_address(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = ie_frame!(tlv_v1(data, Ie::GsnAddress.tag()));
    let context = try_ie!(message.gprs_context_mut());
    if let Some(address) = decode_gsn_address(frame.value) {
        context.push_gsn_address(address);
    }
    IeOutcome::Matched(frame.size)
}

/// MSISDN: extension/TON/NPI octet followed by the BCD number
pub(crate) fn msisdn(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = ie_frame!(tlv_v1(data, Ie::Msisdn.tag()));
    let _numbering = try_ie!(first_byte(frame.value, "msisdn"));
    try_ie!(message.gprs_context_mut()).msisdn =
        bcd_field(&frame.value[1..], MAX_MSISDN_DIGITS, "msisdn");
    IeOutcome::Matched(frame.size)
}

/// Register the decoders shared by GTPv0 and GTPv1
pub(crate) fn register_context(registry: &mut IeRegistry, version: Version) {
    registry.register(version, Ie::Cause.tag(), cause);
    registry.register(version, Ie::Imsi.tag(), imsi);
    registry.register(version, Ie::RoutingAreaIdentity.tag(), routing_area_identity);
    registry.register(version, Ie::ReorderingRequired.tag(), reordering_required);
    registry.register(version, Ie::Recovery.tag(), recovery);
    registry.register(version, Ie::SelectionMode.tag(), selection_mode);
    registry.register(version, Ie::ChargingId.tag(), charging_id);
    registry.register(version, Ie::EndUserAddress.tag(), end_user_address);
    registry.register(version, Ie::AccessPointName.tag(), access_point_name);
    registry.register(version, Ie::GsnAddress.tag(), gsn_address);
    registry.register(version, Ie::Msisdn.tag(), msisdn);
}
