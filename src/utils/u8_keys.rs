//! Searches over the sorted key arrays of the keyed (4 and 16 wide) nodes.
//!
//! Keys in `keys[..num_children]` are always ascending, and slots past `num_children` hold
//! garbage that the searches must ignore.

#[cfg(all(feature = "simd_keys", target_arch = "x86_64", target_feature = "sse2"))]
#[inline]
fn x86_64_sse_find_key(key: u8, keys: &[u8; 16], num_children: usize) -> Option<usize> {
    use std::arch::x86_64::{
        __m128i, _mm_cmpeq_epi8, _mm_loadu_si128, _mm_movemask_epi8, _mm_set1_epi8,
    };

    // SAFETY: `keys` is exactly 16 bytes and sse2 is enabled for this target.
    let bitfield = unsafe {
        let key_vec = _mm_set1_epi8(key as i8);
        let results = _mm_cmpeq_epi8(key_vec, _mm_loadu_si128(keys.as_ptr() as *const __m128i));
        let mask = (1i32 << num_children) - 1;
        _mm_movemask_epi8(results) & mask
    };
    if bitfield != 0 {
        return Some(bitfield.trailing_zeros() as usize);
    }
    None
}

fn binary_find_key(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    keys[..num_children].binary_search(&key).ok()
}

/// Position of `key` among the first `num_children` entries of `keys`.
pub fn u8_keys_find_key_position<const WIDTH: usize>(
    key: u8,
    keys: &[u8; WIDTH],
    num_children: usize,
) -> Option<usize> {
    if WIDTH == 16 {
        #[cfg(all(feature = "simd_keys", target_arch = "x86_64", target_feature = "sse2"))]
        {
            if let Ok(keys16) = <&[u8; 16]>::try_from(keys.as_slice()) {
                return x86_64_sse_find_key(key, keys16, num_children);
            }
        }
        binary_find_key(key, keys, num_children)
    } else {
        // Linear search beats binary search at this size.
        (0..num_children).find(|&i| keys[i] == key)
    }
}

/// Index at which `key` must be placed to keep `keys[..num_children]` ascending.
pub fn u8_keys_find_insert_position<const WIDTH: usize>(
    key: u8,
    keys: &[u8; WIDTH],
    num_children: usize,
) -> usize {
    if WIDTH == 16 {
        keys[..num_children].partition_point(|&k| k < key)
    } else {
        (0..num_children)
            .find(|&i| key < keys[i])
            .unwrap_or(num_children)
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::u8_keys::{u8_keys_find_insert_position, u8_keys_find_key_position};

    #[test]
    fn test_find_key_16() {
        let mut keys = [255u8; 16];
        let sorted = [0u8, 3, 7, 64, 127, 128, 200, 254];
        keys[..sorted.len()].copy_from_slice(&sorted);

        for (i, k) in sorted.iter().enumerate() {
            assert_eq!(u8_keys_find_key_position(*k, &keys, sorted.len()), Some(i));
        }
        assert_eq!(u8_keys_find_key_position(1, &keys, sorted.len()), None);
        // 255 fills the unused slots; it must not be reported as present.
        assert_eq!(u8_keys_find_key_position(255, &keys, sorted.len()), None);
        assert_eq!(u8_keys_find_key_position(0, &keys, 0), None);
    }

    #[test]
    fn test_find_key_4() {
        let keys = [10u8, 20, 30, 255];
        assert_eq!(u8_keys_find_key_position(20, &keys, 3), Some(1));
        assert_eq!(u8_keys_find_key_position(255, &keys, 3), None);
    }

    #[test]
    fn test_insert_position() {
        let keys4 = [10u8, 20, 30, 255];
        assert_eq!(u8_keys_find_insert_position(5, &keys4, 3), 0);
        assert_eq!(u8_keys_find_insert_position(25, &keys4, 3), 2);
        assert_eq!(u8_keys_find_insert_position(40, &keys4, 3), 3);

        let mut keys16 = [255u8; 16];
        keys16[..3].copy_from_slice(&[1, 129, 250]);
        // Bytes above 127 compare as unsigned.
        assert_eq!(u8_keys_find_insert_position(128, &keys16, 3), 1);
        assert_eq!(u8_keys_find_insert_position(130, &keys16, 3), 2);
        assert_eq!(u8_keys_find_insert_position(251, &keys16, 3), 3);
    }
}
