mod macros;

pub mod codec;
pub mod datatypes;
pub mod frame;
pub mod header;
pub mod ie;


// Re-export codec types for direct access
pub use codec::{
    CodecError, DecodeStatus, DecoderFn, IeError, IeOutcome, IeRegistry, Registration, decode,
    initialize,
};

// Re-export the message model
pub use datatypes::Version;
pub use frame::{Body, GprsContext, GtpV0Body, GtpV1Body, GtpV2Body, Message};
pub use header::Header;

/// A specialized `Result` type for GTP-C decoding.
///
/// # Examples
///
/// ## Decoding a datagram
///
/// ```rust
/// use gtpc::{Body, Version};
///
/// // GTPv1 Echo Request carrying an IMSI
/// let datagram = [
///     0x32, 0x01, 0x00, 0x0D, 0x00, 0x00, 0x00, 0x00, // flags, type, length, TEID
///     0x00, 0x01, 0x00, 0x00, // sequence, N-PDU, next extension type
///     0x02, 0x21, 0x43, 0x65, 0x87, 0x09, 0x21, 0x43, 0xF5, // IMSI
/// ];
///
/// let message = gtpc::decode(&datagram)?;
/// assert_eq!(message.version(), Version::V1);
/// assert_eq!(message.imsi(), Some("123456789012345"));
/// assert!(matches!(message.body(), Body::V1(_)));
/// # Ok::<(), gtpc::CodecError>(())
/// ```
///
/// ## Plugging in a custom decoder
///
/// ```rust
/// use gtpc::{IeOutcome, IeRegistry, Message, Registration, Version};
///
/// let mut registry = IeRegistry::new();
/// let registration = registry.register(Version::V1, 0x0E, |data: &[u8], _: &mut Message| {
///     match data.first() {
///         Some(&0x0E) if data.len() >= 2 => IeOutcome::Matched(2),
///         _ => IeOutcome::NotMatched,
///     }
/// });
/// assert_eq!(registration, Registration::Replaced);
/// ```
pub type Result<T> = std::result::Result<T, CodecError>;
