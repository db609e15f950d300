//! Constant-time comparison helpers

/// Compare two byte slices without short-circuiting on the first difference
///
/// Length is not secret: slices of different length return early.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// String wrapper over [`constant_time_eq`]
#[must_use]
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"", b""));
        assert!(constant_time_eq(b"f271c81ff7084ee5b99a5091b42d486e", b"f271c81ff7084ee5b99a5091b42d486e"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }

    #[test]
    fn test_constant_time_str_eq() {
        assert!(constant_time_str_eq("key", "key"));
        assert!(!constant_time_str_eq("key", "Key"));
    }
}
