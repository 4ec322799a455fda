//! Burrows-Wheeler transform, forward and inverse.
//!
//! The forward transform reads the last column of the sorted rotations of
//! `text · "$"` straight off the suffix array: row `i` holds the character
//! preceding suffix `SA[i]`, cyclically. The inverse rebuilds the text by
//! LF mapping: each last-column position maps to the first-column row of
//! the same character occurrence, and walking that map from the sentinel
//! row visits the text right to left.

use crate::alphabet::{self,ALPHABET_LEN,SENTINEL};
use crate::suffix_tree::SuffixTree;
use crate::Error;

/// Last column of the sorted rotations of `text · "$"`.
pub fn forward(text: &[u8]) -> Result<Vec<u8>,Error> {
    let tree = SuffixTree::build(text)?;
    let sa = tree.suffix_array();
    let t = tree.text();
    let n = t.len();
    log::debug!("transforming {} characters",n);
    Ok(sa.iter().map(|&start| t[(start + n - 1) % n]).collect())
}

/// Last column computed from explicitly sorted rotations.
///
/// Quadratic, but independent of the suffix tree; the linear path is
/// checked against it in tests.
pub fn forward_naive(text: &[u8]) -> Result<Vec<u8>,Error> {
    alphabet::validate(text)?;
    let mut terminated = text.to_vec();
    terminated.push(SENTINEL);
    let n = terminated.len();
    let mut rotations: Vec<usize> = (0..n).collect();
    rotations.sort_by(|&a,&b| {
        let rot_a = terminated[a..].iter().chain(terminated[..a].iter());
        let rot_b = terminated[b..].iter().chain(terminated[..b].iter());
        rot_a.cmp(rot_b)
    });
    Ok(rotations.iter().map(|&start| terminated[(start + n - 1) % n]).collect())
}

/// Recover the original text from its last column.
///
/// Runs in linear time: the occurrence rank of every position is
/// precomputed, so each LF step is a pair of table lookups.
pub fn inverse(last: &[u8]) -> Vec<u8> {
    if last.is_empty() {
        return Vec::new();
    }
    let mut counts = [0usize;ALPHABET_LEN];
    for &byte in last {
        counts[alphabet::index_of(byte)] += 1;
    }
    // rank[c]: how many characters of the column sort strictly before c
    let mut rank = [0usize;ALPHABET_LEN];
    let mut total = 0;
    for (slot,&count) in rank.iter_mut().zip(counts.iter()) {
        *slot = total;
        total += count;
    }
    // occurrence order of each position among equal characters to its left
    let mut seen = [0usize;ALPHABET_LEN];
    let mut occ_rank = Vec::with_capacity(last.len());
    for &byte in last {
        let idx = alphabet::index_of(byte);
        occ_rank.push(seen[idx]);
        seen[idx] += 1;
    }
    // walk the map starting from the sentinel's row
    let mut out = Vec::with_capacity(last.len());
    let mut row = 0;
    for _ in 0..last.len() {
        let byte = last[row];
        out.push(byte);
        row = rank[alphabet::index_of(byte)] + occ_rank[row];
    }
    debug_assert_eq!(out.last(),Some(&SENTINEL));
    out.pop();
    out.reverse();
    out
}

#[test]
fn known_columns() {
    assert_eq!(forward("abc".as_bytes()).unwrap(),"c$ab".as_bytes());
    assert_eq!(forward("banana".as_bytes()).unwrap(),"annb$aa".as_bytes());
    assert_eq!(forward("mississippi".as_bytes()).unwrap(),"ipssm$pissii".as_bytes());
    assert_eq!(forward("aaaa".as_bytes()).unwrap(),"aaaa$".as_bytes());
    assert_eq!(forward("".as_bytes()).unwrap(),"$".as_bytes());
}

#[test]
fn invertibility() {
    for text in ["","a","ab","abc","banana","mississippi","abracadabra",
                 "aaaaaaaa","ababab","the.rain.in.spain"] {
        let column = forward(text.as_bytes()).unwrap();
        assert_eq!(inverse(&column),text.as_bytes(),"input {}",text);
    }
}

#[test]
fn agrees_with_sorted_rotations() {
    let mut state: u64 = 0x9E3779B97F4A7C15;
    for len in 0..=80 {
        let mut text = Vec::with_capacity(len);
        for _ in 0..len {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            // a narrow alphabet keeps the rotations full of repeats
            text.push(b'a' + ((state >> 33) % 4) as u8);
        }
        assert_eq!(forward(&text).unwrap(),forward_naive(&text).unwrap(),"length {}",len);
    }
}

#[test]
fn rejects_bad_input() {
    assert_eq!(forward("ab cd".as_bytes()),Err(Error::IllegalCharacter));
    assert_eq!(forward("ab$cd".as_bytes()),Err(Error::IllegalSentinel));
}
