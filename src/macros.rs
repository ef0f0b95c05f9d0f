// ABOUTME: This module provides macros to reduce boilerplate in the GTP-C IE decoders
// ABOUTME: Includes macros for IE type tables and for unwrapping framing results inside decoders

/// Macro for declaring a per-version IE type table
///
/// Generates a `#[repr(u8)]` enum with `num_enum::TryFromPrimitive` so a raw
/// tag can be named in logs, and records the fixed value length of every TV
/// element next to its tag.
///
/// # Arguments
/// * `tv { Name = tag => length, ... }` - Tag-Value elements and their value length
/// * `tlv { Name = tag, ... }` - Tag-Length-Value elements
///
/// # Generated code
/// - `tag(self) -> u8`
/// - `tv_length(self) -> Option<usize>` (`None` for TLV elements)
macro_rules! ie_types {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            tv { $($tv:ident = $tv_tag:literal => $len:literal),* $(,)? }
            tlv { $($tlv:ident = $tlv_tag:literal),* $(,)? }
        }
    ) => {
        $(#[$meta])*
        #[derive(num_enum::TryFromPrimitive)]
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($tv = $tv_tag,)*
            $($tlv = $tlv_tag,)*
        }

        impl $name {
            /// Every TV element of this version
            pub const TV: &'static [$name] = &[$($name::$tv),*];

            pub const fn tag(self) -> u8 {
                self as u8
            }

            /// Value length of a TV element, `None` for TLV elements
            #[allow(unreachable_patterns)]
            pub const fn tv_length(self) -> Option<usize> {
                match self {
                    $($name::$tv => Some($len),)*
                    _ => None,
                }
            }
        }
    };
}

/// Macro for unwrapping a framing primitive inside a decoder
///
/// `Ok(Some(frame))` yields the frame, `Ok(None)` returns
/// `IeOutcome::NotMatched` and `Err(e)` returns `IeOutcome::Malformed(e)`.
macro_rules! ie_frame {
    ($framed:expr) => {
        match $framed {
            Ok(Some(frame)) => frame,
            Ok(None) => return $crate::codec::IeOutcome::NotMatched,
            Err(err) => return $crate::codec::IeOutcome::Malformed(err),
        }
    };
}

/// Macro for framing a TV element from its IE type
///
/// Expands to `ie_frame!(tv(data, ie.tag(), length))` with the length taken
/// from the IE type table.
macro_rules! tv_frame {
    ($data:expr, $ie:expr) => {
        match $ie.tv_length() {
            Some(length) => $crate::macros::ie_frame!($crate::codec::tv($data, $ie.tag(), length)),
            None => return $crate::codec::IeOutcome::NotMatched,
        }
    };
}

/// Macro for propagating an `IeError` out of a decoder as `IeOutcome::Malformed`
macro_rules! try_ie {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(err) => return $crate::codec::IeOutcome::Malformed(err.into()),
        }
    };
}

// Make macros available to the rest of the crate
pub(crate) use {ie_frame, ie_types, try_ie, tv_frame};
