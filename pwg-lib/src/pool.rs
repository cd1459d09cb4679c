/// Letters and digits, 62 characters.
pub static ALPHANUMERIC: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Special symbols, 10 characters.
pub static SPECIAL: &[u8; 10] = b"!@#$%^&*()";

/// True if `c` is one of the special symbols.
pub fn is_special(c: char) -> bool {
    c.is_ascii() && SPECIAL.contains(&(c as u8))
}

/// True if `c` is an ASCII letter or digit from the alphanumeric pool.
pub fn is_alphanumeric(c: char) -> bool {
    c.is_ascii() && ALPHANUMERIC.contains(&(c as u8))
}

// Index reduction is a plain modulo. Over 2^32 inputs the low indices are
// favoured by less than 1.5e-8 relative for both pools.
pub(crate) fn pick(pool: &[u8], value: u32) -> char {
    pool[value as usize % pool.len()] as char
}
