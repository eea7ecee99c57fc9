//! Front-coded word blocks.
//!
//! A block holds up to `block_len` sorted words:
//!
//! ```text
//! first-word \0
//! [keep u8] suffix \0      (repeated for each further word)
//! \0                       (one per empty slot of a partial block)
//! ```
//!
//! `keep` is the number of leading bytes shared with the previous word.

/// Length of the common byte prefix of `a` and `b`.
pub fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Appends one encoded block to `out`. Slots past `words.len()` are empty.
pub fn encode_block<S: AsRef<str>>(words: &[S], block_len: usize, out: &mut Vec<u8>) {
    let Some(first) = words.first() else {
        return;
    };
    let mut prev = first.as_ref().as_bytes();
    out.extend_from_slice(prev);
    out.push(0);

    for slot in 1..block_len {
        if let Some(word) = words.get(slot) {
            let word = word.as_ref().as_bytes();
            let keep = common_prefix(prev, word);
            out.push(keep as u8);
            out.extend_from_slice(&word[keep..]);
            prev = word;
        }
        out.push(0);
    }
}

/// Decodes one block. Stops at the first empty slot or at the end of `buf`.
pub fn decode_block(buf: &[u8], block_len: usize) -> Vec<String> {
    let mut words = Vec::with_capacity(block_len);
    let mut prev: Vec<u8> = Vec::new();
    let mut pos = 0;

    for slot in 0..block_len {
        let keep = if slot == 0 {
            0
        } else {
            let Some(&keep) = buf.get(pos) else {
                break;
            };
            pos += 1;
            keep as usize
        };

        let rest = buf.get(pos..).unwrap_or_default();
        let end = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
        if end == 0 {
            break;
        }

        let mut word = prev[..keep.min(prev.len())].to_vec();
        word.extend_from_slice(&rest[..end]);
        pos += end + 1;

        words.push(String::from_utf8_lossy(&word).into_owned());
        prev = word;
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_coding_shares_prefixes() {
        let mut out = Vec::new();
        encode_block(&["color", "colorful", "colour"], 3, &mut out);

        let mut expected = b"color\0".to_vec();
        expected.push(5);
        expected.extend_from_slice(b"ful\0");
        expected.push(4);
        expected.extend_from_slice(b"ur\0");
        assert_eq!(out, expected);

        assert_eq!(decode_block(&out, 3), vec!["color", "colorful", "colour"]);
    }

    #[test]
    fn test_partial_block_pads_with_terminators() {
        let mut out = Vec::new();
        encode_block(&["apple", "apply"], 4, &mut out);
        assert_eq!(out, b"apple\0\x04y\0\0\0".to_vec());
        assert_eq!(decode_block(&out, 4), vec!["apple", "apply"]);
    }

    #[test]
    fn test_decode_tolerates_zero_padding() {
        let mut out = Vec::new();
        encode_block(&["a", "b", "c"], 16, &mut out);
        out.resize(512, 0);
        assert_eq!(decode_block(&out, 16), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_decode_full_block() {
        let words: Vec<String> = (0..16).map(|i| format!("word{:02}", i)).collect();
        let mut out = Vec::new();
        encode_block(&words, 16, &mut out);
        assert_eq!(decode_block(&out, 16), words);
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode_block(&[], 16).is_empty());
        assert!(decode_block(&[0, 0, 0], 16).is_empty());
    }

    #[test]
    fn test_common_prefix() {
        assert_eq!(common_prefix(b"color", b"colour"), 4);
        assert_eq!(common_prefix(b"abc", b"xyz"), 0);
        assert_eq!(common_prefix(b"ab", b"abc"), 2);
    }
}
