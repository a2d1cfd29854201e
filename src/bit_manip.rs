use crate::addr::Ipv4Address;


/// Converts a slice of bytes into its constituent bits (most significant bit first).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    let mut ret = Vec::with_capacity(bytes.len() * 8);
    for byte in bytes {
        for bit_idx in 0..8 {
            ret.push(
                byte & (1 << (7 - bit_idx)) != 0
            );
        }
    }
    ret
}

/// Converts a slice of bytes into a string of '1' and '0' characters representing the bit values
/// (most significant bit first).
pub fn bytes_to_binary(bytes: &[u8]) -> String {
    let mut ret = String::with_capacity(bytes.len() * 8);
    for bit in bytes_to_bits(bytes) {
        ret.push(if bit { '1' } else { '0' });
    }
    ret
}

/// Groups a 32-character string into four dot-separated octets.
fn dot_octets(chars: &[char]) -> String {
    let mut ret = String::with_capacity(chars.len() + 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 8 == 0 {
            ret.push('.');
        }
        ret.push(*c);
    }
    ret
}

/// Renders a prefix as a per-bit pattern in dotted octets, using `net_char` for each of the
/// first `prefix` bits and `host_char` for the rest.
///
/// `prefix_pattern(22, 'N', 'H')` returns `"NNNNNNNN.NNNNNNNN.NNNNNNHH.HHHHHHHH"`.
pub fn prefix_pattern(prefix: usize, net_char: char, host_char: char) -> String {
    let prefix = prefix.min(32);
    let chars: Vec<char> = (0..32)
        .map(|i| if i < prefix { net_char } else { host_char })
        .collect();
    dot_octets(&chars)
}

/// Renders the address in dotted binary with a `|` inserted at the network/host boundary.
///
/// No marker is inserted when the boundary falls on an octet edge or at either end; the dots
/// already show it there.
pub fn binary_with_boundary(addr: Ipv4Address, prefix: usize) -> String {
    let bits = bytes_to_binary(&addr.to_bytes());
    let mut ret = String::with_capacity(bits.len() + 4);
    for (i, c) in bits.chars().enumerate() {
        if i > 0 && i % 8 == 0 {
            ret.push('.');
        } else if i == prefix && i % 8 != 0 {
            ret.push('|');
        }
        ret.push(c);
    }
    ret
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bytes_to_binary() {
        assert_eq!("00000000", bytes_to_binary(&[0x00]));
        assert_eq!("10000001", bytes_to_binary(&[0x81]));
        assert_eq!("1111111100001111", bytes_to_binary(&[0xFF, 0x0F]));
    }

    #[test]
    fn test_prefix_pattern() {
        assert_eq!("HHHHHHHH.HHHHHHHH.HHHHHHHH.HHHHHHHH", prefix_pattern(0, 'N', 'H'));
        assert_eq!("NNNNNNNN.NNNNNNNN.NNNNNNHH.HHHHHHHH", prefix_pattern(22, 'N', 'H'));
        assert_eq!("11111111.11111111.11111111.11111111", prefix_pattern(32, '1', '0'));
    }

    #[test]
    fn test_binary_with_boundary() {
        let addr = Ipv4Address::new(0xC0A80000);
        assert_eq!("11000000.10101000.00000000.00000000", binary_with_boundary(addr, 24));
        assert_eq!("11000000.10101000.000000|00.00000000", binary_with_boundary(addr, 22));
        assert_eq!("11000000.10101000.00000000.00000000", binary_with_boundary(addr, 0));
        assert_eq!("11000000.10101000.00000000.00000000", binary_with_boundary(addr, 32));
    }
}
