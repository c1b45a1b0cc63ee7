use std::sync::OnceLock;

/// Searches `buf[start..end]` for `target`. Returns the index of the first
/// match, or `end` if the range contains none.
pub type FindByte = fn(&[u8], usize, usize, u8) -> usize;

static SELECTED: OnceLock<FindByte> = OnceLock::new();

/// The byte-search implementation for this process. Probed once; every later
/// call returns the same function.
pub fn selected() -> FindByte {
    *SELECTED.get_or_init(detect)
}

fn detect() -> FindByte {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return find_byte_avx2;
        }
    }

    find_byte_scalar
}

pub fn find_byte_scalar(buf: &[u8], start: usize, end: usize, target: u8) -> usize {
    let mut i = start;
    while i < end {
        if buf[i] == target {
            return i;
        }
        i += 1;
    }
    end
}

#[cfg(target_arch = "x86_64")]
pub fn find_byte_avx2(buf: &[u8], start: usize, end: usize, target: u8) -> usize {
    // Safety: only reachable through `selected()` after the AVX2 probe, or
    // from tests that perform the same check.
    unsafe { find_byte_avx2_impl(buf, start, end, target) }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn find_byte_avx2_impl(buf: &[u8], start: usize, end: usize, target: u8) -> usize {
    use std::arch::x86_64::{
        __m256i, _mm256_cmpeq_epi8, _mm256_loadu_si256, _mm256_movemask_epi8, _mm256_set1_epi8,
        _mm256_zeroupper,
    };

    let needle = _mm256_set1_epi8(target as i8);

    let mut i = start;
    while i + 32 <= end {
        let chunk = _mm256_loadu_si256(buf.as_ptr().add(i) as *const __m256i);
        let matches = _mm256_movemask_epi8(_mm256_cmpeq_epi8(chunk, needle)) as u32;

        if matches != 0 {
            _mm256_zeroupper();
            return i + matches.trailing_zeros() as usize;
        }

        i += 32;
    }

    _mm256_zeroupper();

    find_byte_scalar(buf, i, end, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn implementations() -> Vec<(&'static str, FindByte)> {
        let mut impls: Vec<(&'static str, FindByte)> = vec![("scalar", find_byte_scalar)];

        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("avx2") {
                impls.push(("avx2", find_byte_avx2));
            }
        }

        impls
    }

    #[test]
    fn test_finds_first_match() {
        let buf = b"Melbourne;23.4\nSan Diego;-1.2\n";

        for (name, find) in implementations() {
            assert_eq!(find(buf, 0, buf.len(), b';'), 9, "{name}");
            assert_eq!(find(buf, 0, buf.len(), b'\n'), 14, "{name}");
            assert_eq!(find(buf, 10, buf.len(), b';'), 24, "{name}");
        }
    }

    #[test]
    fn test_miss_returns_end() {
        let buf = b"Llanfairpwllgwyngyllgogerychwyrndrobwllllantysiliogogogoch";

        for (name, find) in implementations() {
            assert_eq!(find(buf, 0, buf.len(), b';'), buf.len(), "{name}");
            assert_eq!(find(buf, 5, 20, b';'), 20, "{name}");
        }
    }

    #[test]
    fn test_respects_range() {
        let buf = b";aaaa;aaaa;";

        for (name, find) in implementations() {
            // Match before `start` is invisible.
            assert_eq!(find(buf, 1, buf.len(), b';'), 5, "{name}");
            // Match at or after `end` is invisible.
            assert_eq!(find(buf, 1, 5, b';'), 5, "{name}");
            assert_eq!(find(buf, 6, 10, b';'), 10, "{name}");
        }
    }

    #[test]
    fn test_empty_range() {
        let buf = b";;;";

        for (name, find) in implementations() {
            assert_eq!(find(buf, 2, 2, b';'), 2, "{name}");
        }
    }

    #[test]
    fn test_match_past_vector_chunks() {
        // Needle beyond the first two 32-byte blocks, so the wide variant has
        // to run its full core and its tail.
        let mut buf = vec![b'a'; 100];
        buf[70] = b';';
        buf[99] = b'\n';

        for (name, find) in implementations() {
            assert_eq!(find(&buf, 0, buf.len(), b';'), 70, "{name}");
            assert_eq!(find(&buf, 71, buf.len(), b'\n'), 99, "{name}");
            assert_eq!(find(&buf, 71, 99, b'\n'), 99, "{name}");
        }
    }

    #[test]
    fn test_implementations_agree() {
        let lines = b"B\xc4\x81gepalli;17.8\nSan Fernando;-1.9\nKika;4.3\nBo;6.8\nPoyo;39.2\nKonibodom;40.2\n";

        for start in 0..lines.len() {
            let scalar = find_byte_scalar(lines, start, lines.len(), b';');
            for (name, find) in implementations() {
                assert_eq!(find(lines, start, lines.len(), b';'), scalar, "{name} from {start}");
            }
        }
    }

    #[test]
    fn test_selected_is_stable() {
        let a = selected();
        let b = selected();
        assert_eq!(a as usize, b as usize);
    }
}
