// ABOUTME: Information element type tables for GTPv0, GTPv1 and GTPv2
// ABOUTME: TV elements carry their fixed value length so decoders and skip rules share one source

use crate::macros::ie_types;

ie_types! {
    /// GTPv0 information element types (TS 09.60 Section 7.9)
    ///
    /// Tags below 0x80 are TV with a fixed value length, tags from 0x80 up
    /// are TLV with a 2-byte length.
    pub enum GtpV0IeType {
        tv {
            Cause = 0x01 => 1,
            Imsi = 0x02 => 8,
            RoutingAreaIdentity = 0x03 => 6,
            TemporaryLogicalLinkIdentity = 0x04 => 4,
            PacketTmsi = 0x05 => 4,
            QualityOfServiceProfile = 0x06 => 3,
            ReorderingRequired = 0x08 => 1,
            AuthenticationTriplet = 0x09 => 28,
            MapCause = 0x0B => 1,
            PacketTmsiSignature = 0x0C => 3,
            MsValidated = 0x0D => 1,
            Recovery = 0x0E => 1,
            SelectionMode = 0x0F => 1,
            FlowLabelDataI = 0x10 => 2,
            FlowLabelSignalling = 0x11 => 2,
            FlowLabelDataII = 0x12 => 3,
            MsNotReachableReason = 0x13 => 1,
            ChargingId = 0x7F => 4,
        }
        tlv {
            EndUserAddress = 0x80,
            MmContext = 0x81,
            PdpContext = 0x82,
            AccessPointName = 0x83,
            ProtocolConfigurationOptions = 0x84,
            GsnAddress = 0x85,
            Msisdn = 0x86,
            ChargingGatewayAddress = 0xFB,
            PrivateExtension = 0xFF,
        }
    }
}

ie_types! {
    /// GTPv1-C information element types (TS 29.060 Section 7.7)
    pub enum GtpV1IeType {
        tv {
            Cause = 0x01 => 1,
            Imsi = 0x02 => 8,
            RoutingAreaIdentity = 0x03 => 6,
            TemporaryLogicalLinkIdentity = 0x04 => 4,
            PacketTmsi = 0x05 => 4,
            ReorderingRequired = 0x08 => 1,
            AuthenticationTriplet = 0x09 => 28,
            MapCause = 0x0B => 1,
            PacketTmsiSignature = 0x0C => 3,
            MsValidated = 0x0D => 1,
            Recovery = 0x0E => 1,
            SelectionMode = 0x0F => 1,
            TeidDataI = 0x10 => 4,
            TeidControlPlane = 0x11 => 4,
            TeidDataII = 0x12 => 5,
            TeardownInd = 0x13 => 1,
            Nsapi = 0x14 => 1,
            RanapCause = 0x15 => 1,
            RabContext = 0x16 => 9,
            RadioPrioritySms = 0x17 => 1,
            RadioPriority = 0x18 => 1,
            PacketFlowId = 0x19 => 2,
            ChargingCharacteristics = 0x1A => 2,
            TraceReference = 0x1B => 2,
            TraceType = 0x1C => 2,
            MsNotReachableReason = 0x1D => 1,
            ChargingId = 0x7F => 4,
        }
        tlv {
            EndUserAddress = 0x80,
            MmContext = 0x81,
            PdpContext = 0x82,
            AccessPointName = 0x83,
            ProtocolConfigurationOptions = 0x84,
            GsnAddress = 0x85,
            Msisdn = 0x86,
            QualityOfServiceProfile = 0x87,
            AuthenticationQuintuplet = 0x88,
            TrafficFlowTemplate = 0x89,
            TargetIdentification = 0x8A,
            UtranTransparentContainer = 0x8B,
            RabSetupInformation = 0x8C,
            ExtensionHeaderTypeList = 0x8D,
            TriggerId = 0x8E,
            OmcIdentity = 0x8F,
            CommonFlags = 0x94,
            ApnRestriction = 0x95,
            RatType = 0x97,
            UserLocationInformation = 0x98,
            MsTimeZone = 0x99,
            ImeiSv = 0x9A,
            MsInfoChangeReportingAction = 0xB5,
            BearerControlMode = 0xB8,
            EvolvedAllocationRetentionPriorityI = 0xBF,
            ChargingGatewayAddress = 0xFB,
            PrivateExtension = 0xFF,
        }
    }
}

ie_types! {
    /// GTPv2-C information element types (TS 29.274 Section 8.1)
    ///
    /// Every GTPv2 element uses the 4-byte TLIV prefix.
    pub enum GtpV2IeType {
        tv {}
        tlv {
            Imsi = 0x01,
            Cause = 0x02,
            Recovery = 0x03,
            AccessPointName = 0x47,
            AggregateMaximumBitRate = 0x48,
            EpsBearerId = 0x49,
            IpAddress = 0x4A,
            MobileEquipmentIdentity = 0x4B,
            Msisdn = 0x4C,
            Indication = 0x4D,
            ProtocolConfigurationOptions = 0x4E,
            PdnAddressAllocation = 0x4F,
            BearerQos = 0x50,
            RatType = 0x52,
            ServingNetwork = 0x53,
            BearerTft = 0x54,
            UserLocationInformation = 0x56,
            FullyQualifiedTeid = 0x57,
            BearerContext = 0x5D,
            ChargingId = 0x5E,
            PdnType = 0x63,
            ApnRestriction = 0x7F,
            SelectionMode = 0x80,
            PrivateExtension = 0xFF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tv_lengths() {
        assert_eq!(GtpV1IeType::Imsi.tv_length(), Some(8));
        assert_eq!(GtpV1IeType::RabContext.tv_length(), Some(9));
        assert_eq!(GtpV0IeType::AuthenticationTriplet.tv_length(), Some(28));
        assert_eq!(GtpV1IeType::AccessPointName.tv_length(), None);
        assert_eq!(GtpV2IeType::Imsi.tv_length(), None);
    }

    #[test]
    fn tv_tags_stay_below_tlv_class() {
        for ie in GtpV0IeType::TV {
            assert!(ie.tag() < 0x80, "{ie:?}");
        }
        for ie in GtpV1IeType::TV {
            assert!(ie.tag() < 0x80, "{ie:?}");
        }
        assert!(GtpV2IeType::TV.is_empty());
    }

    #[test]
    fn raw_tags_name_their_ie() {
        assert_eq!(
            GtpV1IeType::try_from(0x98).ok(),
            Some(GtpV1IeType::UserLocationInformation)
        );
        assert_eq!(
            GtpV0IeType::try_from(0x06).ok(),
            Some(GtpV0IeType::QualityOfServiceProfile)
        );
        assert_eq!(GtpV2IeType::try_from(0x01).ok(), Some(GtpV2IeType::Imsi));
        assert!(GtpV1IeType::try_from(0x07).is_err());
    }
}
