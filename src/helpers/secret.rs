use rand::Rng;

pub fn random_hex(len: usize) -> String {
    const CHARSET: &[u8] = b"0123456789abcdef";
    let mut rng = rand::thread_rng();

    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        assert_eq!(random_hex(64).len(), 64);
    }

    #[test]
    fn uses_hex_alphabet_only() {
        assert!(random_hex(256).chars().all(|c| c.is_ascii_hexdigit()));
    }
}
