//! `<`-locator strategies: scalar and vectorized.
//!
//! A [`TagScanner`] does exactly one thing: report the position of the next
//! `U+003C LESS-THAN SIGN` byte at or after a given offset. The tree builder
//! asks its scanner for that position both while scanning between tags and
//! while capturing inline text, so accelerating this single primitive
//! accelerates the whole parse without touching tag semantics.
//!
//! The wide scanners walk the buffer in 16-byte chunks, compare every lane
//! against `<` in one vector instruction, and turn the comparison result
//! into a bitmask whose lowest set bit is the match offset. The tail
//! shorter than one vector falls back to the scalar scan.

/// The byte every scanner looks for.
const TAG_OPEN: u8 = b'<';

/// Width of one vector chunk in bytes.
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
const LANES: usize = 16;

/// Locates the next tag-open byte in a buffer.
pub(crate) trait TagScanner {
    /// Position of the first `<` at or after `from`, or `None` if the rest
    /// of the buffer holds no tag-open byte. `from` past the end of the
    /// buffer is not an error; it simply finds nothing.
    fn find_tag_open(&self, input: &[u8], from: usize) -> Option<usize>;
}

/// Byte-by-byte scan. The reference the wide scans must agree with.
#[derive(Clone, Copy)]
pub(crate) struct ScalarScan;

impl TagScanner for ScalarScan {
    fn find_tag_open(&self, input: &[u8], from: usize) -> Option<usize> {
        input
            .get(from..)?
            .iter()
            .position(|&b| b == TAG_OPEN)
            .map(|offset| from + offset)
    }
}

/// SSE2 16-byte compare-and-mask scan.
#[cfg(target_arch = "x86_64")]
#[derive(Clone, Copy)]
pub(crate) struct Sse2Scan;

#[cfg(target_arch = "x86_64")]
impl TagScanner for Sse2Scan {
    #[allow(unsafe_code, clippy::cast_possible_wrap)]
    fn find_tag_open(&self, input: &[u8], from: usize) -> Option<usize> {
        use core::arch::x86_64::{
            __m128i, _mm_cmpeq_epi8, _mm_loadu_si128, _mm_movemask_epi8, _mm_set1_epi8,
        };

        if from >= input.len() {
            return None;
        }

        // SAFETY: SSE2 is part of the x86_64 baseline instruction set.
        let needle = unsafe { _mm_set1_epi8(TAG_OPEN as i8) };

        let mut at = from;
        while at + LANES <= input.len() {
            // SAFETY: `at + LANES <= input.len()` keeps the unaligned
            // 16-byte load inside the buffer.
            let mask = unsafe {
                let chunk = _mm_loadu_si128(input.as_ptr().add(at).cast::<__m128i>());
                _mm_movemask_epi8(_mm_cmpeq_epi8(chunk, needle))
            };
            if mask != 0 {
                // Lowest set bit = first matching lane in the chunk.
                return Some(at + mask.trailing_zeros() as usize);
            }
            at += LANES;
        }

        // Tail shorter than one vector.
        ScalarScan.find_tag_open(input, at)
    }
}

/// NEON 16-byte compare scan.
///
/// NEON has no single movemask instruction; the comparison result is read
/// back as two 64-bit lanes, where every matching byte shows up as `0xFF`
/// and `trailing_zeros / 8` gives the byte offset within the lane.
#[cfg(target_arch = "aarch64")]
#[derive(Clone, Copy)]
pub(crate) struct NeonScan;

#[cfg(target_arch = "aarch64")]
impl TagScanner for NeonScan {
    #[allow(unsafe_code)]
    fn find_tag_open(&self, input: &[u8], from: usize) -> Option<usize> {
        use core::arch::aarch64::{
            vceqq_u8, vdupq_n_u8, vgetq_lane_u64, vld1q_u8, vreinterpretq_u64_u8,
        };

        if from >= input.len() {
            return None;
        }

        // SAFETY: NEON is mandatory on aarch64.
        let needle = unsafe { vdupq_n_u8(TAG_OPEN) };

        let mut at = from;
        while at + LANES <= input.len() {
            // SAFETY: `at + LANES <= input.len()` keeps the 16-byte load
            // inside the buffer.
            let (low, high) = unsafe {
                let eq = vreinterpretq_u64_u8(vceqq_u8(vld1q_u8(input.as_ptr().add(at)), needle));
                (vgetq_lane_u64::<0>(eq), vgetq_lane_u64::<1>(eq))
            };
            if low != 0 {
                return Some(at + low.trailing_zeros() as usize / 8);
            }
            if high != 0 {
                return Some(at + 8 + high.trailing_zeros() as usize / 8);
            }
            at += LANES;
        }

        ScalarScan.find_tag_open(input, at)
    }
}

#[cfg(test)]
mod tests {
    use super::{ScalarScan, TagScanner};

    #[test]
    fn scalar_finds_first_match_after_offset() {
        let input = b"ab<cd<ef";
        assert_eq!(ScalarScan.find_tag_open(input, 0), Some(2));
        assert_eq!(ScalarScan.find_tag_open(input, 3), Some(5));
        assert_eq!(ScalarScan.find_tag_open(input, 6), None);
    }

    #[test]
    fn scalar_tolerates_offset_past_end() {
        assert_eq!(ScalarScan.find_tag_open(b"abc", 10), None);
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn sse2_agrees_with_scalar() {
        use super::Sse2Scan;
        agreement_corpus(|input, from| Sse2Scan.find_tag_open(input, from));
    }

    #[cfg(target_arch = "aarch64")]
    #[test]
    fn neon_agrees_with_scalar() {
        use super::NeonScan;
        agreement_corpus(|input, from| NeonScan.find_tag_open(input, from));
    }

    /// Exercise chunk boundaries: matches in the first lane, the last lane,
    /// the scalar tail, and buffers with no match at all.
    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    fn agreement_corpus(wide: impl Fn(&[u8], usize) -> Option<usize>) {
        let mut corpus: Vec<Vec<u8>> = vec![
            b"".to_vec(),
            b"<".to_vec(),
            b"no tag open here, and more than sixteen bytes".to_vec(),
        ];
        // A `<` at every position of a 48-byte buffer.
        for hit in 0..48 {
            let mut buf = vec![b'x'; 48];
            buf[hit] = b'<';
            corpus.push(buf);
        }

        for input in &corpus {
            for from in 0..=input.len() + 1 {
                assert_eq!(
                    wide(input, from),
                    ScalarScan.find_tag_open(input, from),
                    "divergence on input {input:?} from {from}"
                );
            }
        }
    }
}
