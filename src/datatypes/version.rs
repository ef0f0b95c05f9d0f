use num_enum::TryFromPrimitive;

/// GTP protocol version carried in the top three bits of the first header octet
///
/// - `V0`: 3GPP TS 09.60 (GTP release 97/98)
/// - `V1`: 3GPP TS 29.060
/// - `V2`: 3GPP TS 29.274
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Version {
    V0 = 0,
    V1 = 1,
    V2 = 2,
}

impl Version {
    /// Extract the version from the first header octet
    pub fn from_flags(flags: u8) -> Result<Self, u8> {
        let raw = flags >> 5;
        Version::try_from(raw).map_err(|_| raw)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}
