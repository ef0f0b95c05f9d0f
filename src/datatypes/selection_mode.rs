use num_enum::FromPrimitive;

/// Selection Mode IE value (TS 29.060 Section 7.7.12), low two bits of the octet
#[derive(FromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// MS or network provided APN, subscription verified
    Verified = 0,
    /// MS provided APN, subscription not verified
    MsProvidedUnverified = 1,
    /// Network provided APN, subscription not verified
    NetworkProvidedUnverified = 2,
    /// For future use, shall not be sent
    #[num_enum(default)]
    Reserved = 3,
}

impl SelectionMode {
    pub fn from_octet(octet: u8) -> Self {
        SelectionMode::from(octet & 0x03)
    }

    /// The mode a receiver acts on; the reserved value is read as network provided
    pub fn effective(self) -> Self {
        match self {
            SelectionMode::Reserved => SelectionMode::NetworkProvidedUnverified,
            mode => mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spare_bits_are_ignored() {
        assert_eq!(SelectionMode::from_octet(0xFC), SelectionMode::Verified);
        assert_eq!(
            SelectionMode::from_octet(0xF1),
            SelectionMode::MsProvidedUnverified
        );
    }

    #[test]
    fn reserved_reads_as_network_provided() {
        let mode = SelectionMode::from_octet(0x03);
        assert_eq!(mode, SelectionMode::Reserved);
        assert_eq!(mode.effective(), SelectionMode::NetworkProvidedUnverified);
    }
}
