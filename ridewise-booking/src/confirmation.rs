use rand::Rng;

pub const CODE_PREFIX: &str = "RW-";
pub const CODE_LEN: usize = 8;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a display code: `RW-` followed by 8 characters from A-Z0-9.
///
/// Codes are not checked for collisions.
pub fn generate_confirmation_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let suffix: String = (0..CODE_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("{}{}", CODE_PREFIX, suffix)
}

/// Does `code` match `RW-[A-Z0-9]{8}`
pub fn is_well_formed(code: &str) -> bool {
    match code.strip_prefix(CODE_PREFIX) {
        Some(suffix) => {
            suffix.len() == CODE_LEN
                && suffix.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        }
        None => false,
    }
}
