/// Re-packs the decimal digits of a byte as hexadecimal nibbles.
///
/// The hundreds, tens and ones digits of `byte` become the third, second and
/// first nibble of the result, so `100` maps to `0x0100` and `255` maps to
/// `0x0255`. Printed in hex, the result looks like the decimal input.
///
/// Only nibble values `0-9` are ever produced and the top nibble is always zero.
#[must_use]
pub fn decimal_digits_as_hex(byte: u8) -> u16 {
    let hundreds = u16::from(byte / 100);
    let tens = u16::from((byte / 10) % 10);
    let ones = u16::from(byte % 10);
    (hundreds << 8) | (tens << 4) | ones
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_digits() {
        assert_eq!(decimal_digits_as_hex(0), 0x0000);
        assert_eq!(decimal_digits_as_hex(1), 0x0001);
        assert_eq!(decimal_digits_as_hex(9), 0x0009);
    }

    #[test]
    fn test_multi_digits() {
        assert_eq!(decimal_digits_as_hex(10), 0x0010);
        assert_eq!(decimal_digits_as_hex(42), 0x0042);
        assert_eq!(decimal_digits_as_hex(100), 0x0100);
        assert_eq!(decimal_digits_as_hex(129), 0x0129);
        assert_eq!(decimal_digits_as_hex(255), 0x0255);
    }

    #[test]
    fn test_matches_decimal_rendering() {
        for byte in 0..=u8::MAX {
            assert_eq!(
                format!("{:x}", decimal_digits_as_hex(byte)),
                byte.to_string()
            );
        }
    }

    #[test]
    fn test_nibbles_stay_decimal() {
        for byte in 0..=u8::MAX {
            let hex = decimal_digits_as_hex(byte);
            assert!(hex < 0x0300);
            assert!((hex & 0xf) <= 9);
            assert!(((hex >> 4) & 0xf) <= 9);
        }
    }
}
