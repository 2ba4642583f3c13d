// utils/tracking.rs
use rand::Rng;

/// Alphabet without 0/O/1/I so ids survive being read out over the phone.
const TRACKING_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const TRACKING_PREFIX: &str = "RSA";
const TRACKING_LEN: usize = 6;

/// Human-shareable request identifier, e.g. "RSA-8F3K2Q". Distinct from
/// the row's primary key; shown to riders for reference.
pub fn generate_tracking_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..TRACKING_LEN)
        .map(|_| TRACKING_ALPHABET[rng.random_range(0..TRACKING_ALPHABET.len())] as char)
        .collect();
    format!("{}-{}", TRACKING_PREFIX, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_id_shape() {
        let id = generate_tracking_id();
        assert_eq!(id.len(), TRACKING_PREFIX.len() + 1 + TRACKING_LEN);
        assert!(id.starts_with("RSA-"));
        assert!(id[4..]
            .bytes()
            .all(|b| TRACKING_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_tracking_id_avoids_ambiguous_chars() {
        for _ in 0..100 {
            let id = generate_tracking_id();
            assert!(!id[4..].contains(['0', 'O', '1', 'I']));
        }
    }
}
