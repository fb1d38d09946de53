/// Printable view of raw response bytes.
///
/// Valid UTF-8 is shown as a string, anything else as the raw byte slice, so
/// garbage on the line never panics the logger.
pub struct LossyStr<'a>(pub &'a [u8]);

impl core::fmt::Debug for LossyStr<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match core::str::from_utf8(self.0) {
            Ok(s) => write!(f, "{:?}", s),
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LossyStr<'_> {
    fn format(&self, fmt: defmt::Formatter) {
        match core::str::from_utf8(self.0) {
            Ok(s) => defmt::write!(fmt, "{:?}", s),
            Err(_) => defmt::write!(fmt, "{:?}", self.0),
        }
    }
}

/// Offset of the first occurrence of `needle` in `haystack`.
///
/// An empty needle matches at offset 0.
pub fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn find() {
        assert_eq!(find_subslice(b"AT\r\nOK\r\n", b"OK"), Some(4));
        assert_eq!(find_subslice(b"AT\r\nOK\r\nOK", b"OK"), Some(4));
        assert_eq!(find_subslice(b"AT\r\nO", b"OK"), None);
        assert_eq!(find_subslice(b"OK", b"OK\r\n"), None);
        assert_eq!(find_subslice(b"", b"OK"), None);
        assert_eq!(find_subslice(b"+CSQ: 12,0", b""), Some(0));
    }

    #[test]
    fn lossy_str() {
        assert_eq!(format!("{:?}", LossyStr(b"OK\r\n")), "\"OK\\r\\n\"");
        assert_eq!(format!("{:?}", LossyStr(&[0x4f, 0xff])), "[79, 255]");
    }
}
