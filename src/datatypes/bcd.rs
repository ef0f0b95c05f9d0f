// ABOUTME: Packed BCD/TBCD digit codec shared by the IMSI, IMEI(SV) and MSISDN information elements
// ABOUTME: Digits are read low nibble first and a 0xF filler nibble ends the digit string

use thiserror::Error;

/// Maximum number of IMSI digits (TS 23.003 Section 2.2)
pub const MAX_IMSI_DIGITS: usize = 15;

/// Maximum number of IMEISV digits
pub const MAX_IMEISV_DIGITS: usize = 16;

/// Maximum number of MSISDN digits (E.164)
pub const MAX_MSISDN_DIGITS: usize = 15;

/// Filler nibble used to pad an odd number of digits
pub const FILLER: u8 = 0x0F;

/// Errors returned by [`decode_bcd`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BcdError {
    #[error("empty BCD input")]
    Empty,

    #[error("BCD input holds {digits} digits, at most {max} allowed")]
    TooLong { digits: usize, max: usize },
}

/// Map a single TBCD nibble to its printable character.
///
/// Returns `None` for the filler nibble.
pub fn tbcd_digit(nibble: u8) -> Option<char> {
    match nibble & 0x0F {
        n @ 0..=9 => Some(char::from(b'0' + n)),
        0x0A => Some('*'),
        0x0B => Some('#'),
        0x0C => Some('a'),
        0x0D => Some('b'),
        0x0E => Some('c'),
        _ => None,
    }
}

/// Decode a packed BCD string into printable digits.
///
/// Each byte carries two digits, the low nibble first. Decoding stops at the
/// first filler nibble, which is not emitted. `max_digits` is the capacity of
/// the destination field: the input may carry at most one extra nibble, the
/// filler, beyond it.
pub fn decode_bcd(bcd: &[u8], max_digits: usize) -> Result<String, BcdError> {
    if bcd.is_empty() {
        return Err(BcdError::Empty);
    }

    let nibbles = bcd.len() * 2;
    if nibbles > max_digits + 1 {
        return Err(BcdError::TooLong {
            digits: nibbles,
            max: max_digits,
        });
    }

    let mut digits = String::with_capacity(nibbles);
    for nibble in bcd.iter().flat_map(|byte| [byte & 0x0F, byte >> 4]) {
        match tbcd_digit(nibble) {
            Some(ch) => digits.push(ch),
            None => break,
        }
    }

    if digits.len() > max_digits {
        return Err(BcdError::TooLong {
            digits: digits.len(),
            max: max_digits,
        });
    }

    Ok(digits)
}

#[cfg(test)]
pub(crate) fn encode_bcd(digits: &str) -> Vec<u8> {
    let nibbles: Vec<u8> = digits
        .chars()
        .map(|c| match c {
            '*' => 0x0A,
            '#' => 0x0B,
            d => d.to_digit(10).expect("test digits are decimal") as u8,
        })
        .collect();

    nibbles
        .chunks(2)
        .map(|pair| match pair {
            [low, high] => low | (high << 4),
            [low] => low | (FILLER << 4),
            _ => unreachable!(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_imsi_with_filler() {
        let bcd = [0x21, 0x43, 0x65, 0x87, 0x09, 0x21, 0x43, 0xF5];
        assert_eq!(
            decode_bcd(&bcd, MAX_IMSI_DIGITS).unwrap(),
            "123456789012345"
        );
    }

    #[test]
    fn even_digit_count_without_filler() {
        assert_eq!(decode_bcd(&[0x21, 0x43], 4).unwrap(), "1234");
    }

    #[test]
    fn telecom_special_digits() {
        assert_eq!(decode_bcd(&[0xBA, 0xF1], 4).unwrap(), "*#1");
    }

    #[test]
    fn filler_in_low_nibble_stops_early() {
        assert_eq!(decode_bcd(&[0x21, 0xFF], 4).unwrap(), "12");
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(decode_bcd(&[], MAX_IMSI_DIGITS), Err(BcdError::Empty));
    }

    #[test]
    fn rejects_input_larger_than_capacity() {
        // 16 digits, no filler, into a 15 digit field
        let bcd = [0x21, 0x43, 0x65, 0x87, 0x09, 0x21, 0x43, 0x65];
        assert_eq!(
            decode_bcd(&bcd, MAX_IMSI_DIGITS),
            Err(BcdError::TooLong { digits: 16, max: 15 })
        );

        // 9 bytes can never fit
        assert!(matches!(
            decode_bcd(&[0x11; 9], MAX_IMSI_DIGITS),
            Err(BcdError::TooLong { digits: 18, .. })
        ));
    }

    #[test]
    fn digit_sets_survive_encode_then_decode() {
        for digits in [
            "0",
            "9",
            "0123456789",
            "123456789012345",
            "98765",
            "4600012345678",
        ] {
            let bcd = encode_bcd(digits);
            assert_eq!(decode_bcd(&bcd, MAX_IMEISV_DIGITS).unwrap(), digits);
        }
    }

    #[test]
    fn odd_length_encoding_uses_filler() {
        assert_eq!(encode_bcd("123"), vec![0x21, 0xF3]);
    }
}
