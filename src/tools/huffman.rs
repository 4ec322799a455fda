//! Huffman coding over the dense pipeline alphabet.
//!
//! Codebook construction follows the classic two-pop heap combine, but
//! instead of materializing a tree it keeps the symbol list of every
//! subtree and appends the combining bit to each member, reversing the
//! accumulated bits at the end to restore root-to-leaf order. Heap order
//! is `(frequency, subtree symbol count, symbol list)`; the trailing
//! symbol-list comparison makes the order total, so the emitted codewords
//! are identical across runs for the same input.
//!
//! Decoding walks a binary trie rebuilt from the codeword table.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use super::bits::{BitReader,BitStream};
use crate::alphabet::ALPHABET_LEN;
use crate::Error;

/// Codewords indexed by alphabet index; absent symbols are `None`.
pub type CodeTable = Vec<Option<BitStream>>;

#[derive(PartialEq,Eq,PartialOrd,Ord)]
struct HeapElement {
    freq: u64,
    num_symbols: usize,
    symbols: Vec<usize>
}

/// Build the codebook for a frequency table over the alphabet.
///
/// An alphabet of exactly one symbol gets the one-bit codeword `0`.
pub fn build_codebook(freq: &[u64]) -> CodeTable {
    let mut codes: CodeTable = vec![None;ALPHABET_LEN];
    let mut heap: BinaryHeap<Reverse<HeapElement>> = freq.iter()
        .enumerate()
        .filter(|(_,f)| **f > 0)
        .map(|(i,f)| Reverse(HeapElement { freq: *f, num_symbols: 1, symbols: vec![i] }))
        .collect();
    if heap.is_empty() {
        return codes;
    }
    if heap.len() == 1 {
        let Reverse(only) = heap.pop().unwrap();
        let mut code = BitStream::new();
        code.push_bit(false);
        codes[only.symbols[0]] = Some(code);
        return codes;
    }
    loop {
        let Reverse(mut left) = heap.pop().unwrap();
        let Reverse(right) = heap.pop().unwrap();
        for &symbol in &left.symbols {
            codes[symbol].get_or_insert_with(BitStream::new).push_bit(false);
        }
        for &symbol in &right.symbols {
            codes[symbol].get_or_insert_with(BitStream::new).push_bit(true);
        }
        if heap.is_empty() {
            break;
        }
        // fold the right element into the left and push the combination back
        left.freq += right.freq;
        left.num_symbols += right.num_symbols;
        left.symbols.extend(right.symbols);
        heap.push(Reverse(left));
    }
    // bits were accumulated leaf to root
    for code in codes.iter_mut().flatten() {
        code.reverse();
    }
    codes
}

/// Binary trie used to decode codewords bit by bit.
pub struct DecodeTree {
    root: DecodeNode
}

#[derive(Default)]
struct DecodeNode {
    zero: Option<Box<DecodeNode>>,
    one: Option<Box<DecodeNode>>,
    symbol: Option<usize>
}

impl DecodeTree {
    pub fn from_codes(codes: &CodeTable) -> DecodeTree {
        let mut root = DecodeNode::default();
        for (symbol,code) in codes.iter().enumerate() {
            if let Some(code) = code {
                root.insert(code,symbol);
            }
        }
        DecodeTree { root }
    }
    /// Read one codeword off the stream and return its alphabet index.
    ///
    /// Fails `CodewordNotFound` when the walk dead-ends and `OutOfRange`
    /// when the stream runs dry mid-codeword.
    pub fn decode_symbol(&self,reader: &mut BitReader) -> Result<usize,Error> {
        let mut node = &self.root;
        loop {
            if let Some(symbol) = node.symbol {
                return Ok(symbol);
            }
            let bit = reader.read_bit().ok_or(Error::OutOfRange)?;
            node = match bit {
                false => node.zero.as_deref().ok_or(Error::CodewordNotFound)?,
                true => node.one.as_deref().ok_or(Error::CodewordNotFound)?
            };
        }
    }
}

impl DecodeNode {
    fn insert(&mut self,code: &BitStream,symbol: usize) {
        let mut node = self;
        for bit in code.iter() {
            node = match bit {
                false => node.zero.get_or_insert_with(Default::default),
                true => node.one.get_or_insert_with(Default::default)
            };
        }
        node.symbol = Some(symbol);
    }
}

#[cfg(test)]
fn frequencies(text: &[u8]) -> Vec<u64> {
    let mut freq = vec![0u64;ALPHABET_LEN];
    for &b in text {
        freq[crate::alphabet::index_of(b)] += 1;
    }
    freq
}

#[test]
fn prefix_free() {
    let codes = build_codebook(&frequencies("mississippi$".as_bytes()));
    let present: Vec<&BitStream> = codes.iter().flatten().collect();
    assert_eq!(present.len(),5);
    for (i,a) in present.iter().enumerate() {
        for (j,b) in present.iter().enumerate() {
            if i == j {
                continue;
            }
            let head = b.slice(0,a.len().min(b.len())).unwrap();
            assert_ne!(**a,head,"codeword {:?} prefixes {:?}",a,b);
        }
    }
}

#[test]
fn single_symbol_gets_one_bit() {
    let codes = build_codebook(&frequencies("aaaa".as_bytes()));
    let code = codes[crate::alphabet::index_of(b'a')].as_ref().unwrap();
    assert_eq!(code.len(),1);
    assert_eq!(code.to_int(),0);
}

#[test]
fn rarer_symbols_get_longer_codewords() {
    let codes = build_codebook(&frequencies("aaaaaaaabbbbc$".as_bytes()));
    let len = |c: u8| codes[crate::alphabet::index_of(c)].as_ref().unwrap().len();
    assert!(len(b'a') <= len(b'b'));
    assert!(len(b'b') <= len(b'c'));
}

#[test]
fn construction_is_deterministic() {
    let freq = frequencies("abracadabra$".as_bytes());
    assert_eq!(build_codebook(&freq),build_codebook(&freq));
}

#[test]
fn trie_round_trip() {
    let text = "annb$aa".as_bytes();
    let codes = build_codebook(&frequencies(text));
    let mut stream = BitStream::new();
    for &b in text {
        stream.extend(codes[crate::alphabet::index_of(b)].as_ref().unwrap());
    }
    let tree = DecodeTree::from_codes(&codes);
    let mut reader = BitReader::new(&stream);
    let mut decoded = Vec::new();
    for _ in 0..text.len() {
        decoded.push(crate::alphabet::byte_at(tree.decode_symbol(&mut reader).unwrap()));
    }
    assert_eq!(decoded,text);
    assert_eq!(reader.remaining(),0);
}

#[test]
fn exhausted_stream_fails() {
    let codes = build_codebook(&frequencies("ab$".as_bytes()));
    let tree = DecodeTree::from_codes(&codes);
    let empty = BitStream::new();
    let mut reader = BitReader::new(&empty);
    assert_eq!(tree.decode_symbol(&mut reader),Err(Error::OutOfRange));
}

#[test]
fn dead_end_walk_fails() {
    // a sparse table, as a corrupt archive could announce one
    let mut codes: CodeTable = vec![None;ALPHABET_LEN];
    let mut lone = BitStream::new();
    lone.push_int(0b11,2);
    codes[1] = Some(lone);
    let tree = DecodeTree::from_codes(&codes);
    let mut stream = BitStream::new();
    stream.push_int(0b01,2);
    let mut reader = BitReader::new(&stream);
    assert_eq!(tree.decode_symbol(&mut reader),Err(Error::CodewordNotFound));
}
