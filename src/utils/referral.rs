use rand::Rng;

pub const REFERRAL_CODE_LEN: usize = 6;
const REFERRAL_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Synthesized positions fall in this range; they are placeholders, not ranks.
pub const SYNTHETIC_POSITION_MIN: u64 = 1000;
pub const SYNTHETIC_POSITION_MAX: u64 = 6000;

pub fn generate_referral_code() -> String {
    let mut rng = rand::rng();
    (0..REFERRAL_CODE_LEN)
        .map(|_| REFERRAL_ALPHABET[rng.random_range(0..REFERRAL_ALPHABET.len())] as char)
        .collect()
}

pub fn synthetic_position() -> u64 {
    rand::rng().random_range(SYNTHETIC_POSITION_MIN..SYNTHETIC_POSITION_MAX)
}

pub fn is_referral_code(code: &str) -> bool {
    code.len() == REFERRAL_CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// `<base>?ref=<code>`
pub fn referral_link(base_url: &str, code: &str) -> String {
    format!(
        "{}?ref={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(code)
    )
}
