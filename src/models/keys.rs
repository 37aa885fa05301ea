//! Block key generation
//!
//! Fragment blocks get fresh keys so a pasted fragment never collides with the
//! blocks it was copied from. Keys are short base-32 strings, unique for the
//! lifetime of the module.

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Upper bound (exclusive) of the random key space
const KEY_SPACE: u32 = 1 << 24;

const DIGITS: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

lazy_static! {
    static ref SEEN_KEYS: Mutex<HashSet<String>> = Mutex::new(HashSet::new());
}

static FALLBACK_COUNTER: AtomicU32 = AtomicU32::new(0);

fn to_base32(mut value: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 32) as usize]);
        value /= 32;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

fn random_u32() -> u32 {
    let mut buf = [0u8; 4];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf),
        Err(e) => {
            log::warn!("getrandom unavailable ({}), using counter keys", e);
            FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed)
        }
    }
}

/// Generate a block key not handed out before in this session
pub fn generate_random_key() -> String {
    let mut seen = match SEEN_KEYS.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    loop {
        let key = to_base32(random_u32() % KEY_SPACE);
        if seen.insert(key.clone()) {
            return key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base32() {
        assert_eq!(to_base32(0), "0");
        assert_eq!(to_base32(31), "v");
        assert_eq!(to_base32(32), "10");
        assert_eq!(to_base32(KEY_SPACE - 1), "fvvvv");
    }

    #[test]
    fn test_generated_keys_are_unique() {
        let keys: HashSet<String> = (0..500).map(|_| generate_random_key()).collect();
        assert_eq!(keys.len(), 500);
        assert!(keys.iter().all(|k| !k.is_empty() && k.len() <= 5));
    }
}
