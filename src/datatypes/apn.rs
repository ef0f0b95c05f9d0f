use crate::codec::IeError;

/// Longest APN value we accept
pub const MAX_APN_LEN: usize = 100;

/// Decode an Access Point Name IE value into dotted form.
///
/// The APN is carried as DNS labels, each prefixed by its length octet:
/// `\x08internet\x03com` becomes `internet.com`. The leading length octet is
/// dropped and every later one is rendered as a dot. The value ends at the
/// first NUL byte, if any.
pub fn decode_apn(value: &[u8]) -> Result<String, IeError> {
    if value.len() >= MAX_APN_LEN {
        return Err(IeError::InvalidValue {
            field: "access_point_name",
            reason: format!("{} bytes, at most {} allowed", value.len(), MAX_APN_LEN - 1),
        });
    }

    let start = value.iter().position(|&b| b >= 0x20).unwrap_or(value.len());
    let labels = &value[start..];
    let end = labels.iter().position(|&b| b == 0).unwrap_or(labels.len());

    let printable: Vec<u8> = labels[..end]
        .iter()
        .map(|&b| if b < 0x20 { b'.' } else { b })
        .collect();

    Ok(String::from_utf8_lossy(&printable).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_become_dotted() {
        assert_eq!(
            decode_apn(b"\x08internet\x03mnc\x03com").unwrap(),
            "internet.mnc.com"
        );
    }

    #[test]
    fn single_label() {
        assert_eq!(decode_apn(b"\x03ims").unwrap(), "ims");
    }

    #[test]
    fn stops_at_nul() {
        assert_eq!(decode_apn(b"\x03web\x00junk").unwrap(), "web");
    }

    #[test]
    fn empty_value() {
        assert_eq!(decode_apn(b"").unwrap(), "");
    }

    #[test]
    fn oversized_value_is_rejected() {
        let value = vec![b'a'; MAX_APN_LEN];
        assert!(matches!(
            decode_apn(&value),
            Err(IeError::InvalidValue {
                field: "access_point_name",
                ..
            })
        ));
    }
}
