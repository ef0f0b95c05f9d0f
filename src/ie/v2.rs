// GTPv2 (TS 29.274) decoders. Every other tag is consumed by the v2 skip rule.

use super::bcd_field;
use crate::codec::{IeOutcome, IeRegistry, tlv_v2};
use crate::datatypes::bcd::MAX_IMSI_DIGITS;
use crate::datatypes::{GtpV2IeType as Ie, Version};
use crate::frame::Message;
use crate::macros::{ie_frame, try_ie};

pub(crate) fn imsi(data: &[u8], message: &mut Message) -> IeOutcome {
    let frame = ie_frame!(tlv_v2(data, Ie::Imsi.tag()));
    try_ie!(message.v2_mut()).imsi = bcd_field(frame.value, MAX_IMSI_DIGITS, "imsi");
    IeOutcome::Matched(frame.size)
}

pub(crate) fn register(registry: &mut IeRegistry) {
    registry.register(Version::V2, Ie::Imsi.tag(), imsi);
}
