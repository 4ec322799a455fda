//! Elias gamma coding of positive integers.
//!
//! A value is written as its minimal binary form preceded by a chain of
//! length components, each the minimal binary of the next component's
//! length minus one with its leading bit cleared. The decoder scans
//! components from the front, growing the width as directed, until it
//! meets one whose leading bit is set; that component is the value.
//! The code is self-delimiting, so decoding also tells the caller how
//! many bits were consumed.

use super::bits::{BitReader,BitStream};
use crate::Error;

/// Encode a positive integer.
///
/// Panics if `num` is zero; gamma coding covers positive integers only.
pub fn encode(num: u64) -> BitStream {
    assert!(num > 0,"gamma coding covers positive integers only");
    let mut components = vec![minimal_binary(num)];
    let mut length = components[0].len();
    while length > 1 {
        let mut component = minimal_binary(length as u64 - 1);
        component.set_first_bit(false);
        length = component.len();
        components.push(component);
    }
    let mut encoded = components.pop().unwrap();
    for component in components.iter().rev() {
        encoded.extend(component);
    }
    encoded
}

/// Decode one gamma code off the reader, leaving the cursor just past it.
pub fn decode(reader: &mut BitReader) -> Result<u64,Error> {
    let mut width = 1;
    loop {
        let leading = reader.read_bit().ok_or(Error::MalformedGamma)?;
        let rest = reader.read_int(width - 1).map_err(|_| Error::MalformedGamma)?;
        // the component with its leading bit set
        let value = 1u64 << (width - 1) | rest;
        if leading {
            return Ok(value);
        }
        if value >= 64 {
            // no legal archive carries values anywhere near 2^64
            return Err(Error::MalformedGamma);
        }
        width = value as usize + 1;
    }
}

/// minimal binary representation, most significant bit leading
fn minimal_binary(num: u64) -> BitStream {
    let width = 64 - num.leading_zeros() as usize;
    let mut bits = BitStream::new();
    bits.push_int(num,width);
    bits
}

#[cfg(test)]
fn bits(pattern: &str) -> BitStream {
    let mut out = BitStream::new();
    for c in pattern.chars() {
        out.push_bit(c == '1');
    }
    out
}

#[test]
fn known_codewords() {
    assert_eq!(encode(1),bits("1"));
    assert_eq!(encode(2),bits("010"));
    assert_eq!(encode(3),bits("011"));
    assert_eq!(encode(4),bits("000100"));
    assert_eq!(encode(5),bits("000101"));
    assert_eq!(encode(8),bits("0011000"));
}

#[test]
fn single_bit_stream_decodes_to_one() {
    let one = bits("1");
    let mut reader = BitReader::new(&one);
    assert_eq!(decode(&mut reader),Ok(1));
    assert_eq!(reader.remaining(),0);
}

#[test]
fn round_trip() {
    for num in (1..=2000).chain([4096,65537,1_000_000,u32::MAX as u64]) {
        let encoded = encode(num);
        let mut reader = BitReader::new(&encoded);
        assert_eq!(decode(&mut reader),Ok(num),"value {}",num);
        assert_eq!(reader.remaining(),0,"value {}",num);
    }
}

#[test]
fn decode_leaves_the_remainder() {
    let mut stream = encode(100);
    stream.extend(&bits("1101"));
    let mut reader = BitReader::new(&stream);
    assert_eq!(decode(&mut reader),Ok(100));
    assert_eq!(reader.remaining(),4);
}

#[test]
fn rejects_truncated_streams() {
    let encoded = encode(1000);
    let cut = encoded.slice(0,encoded.len()-1).unwrap();
    let mut reader = BitReader::new(&cut);
    assert_eq!(decode(&mut reader),Err(Error::MalformedGamma));
    let empty = BitStream::new();
    let mut reader = BitReader::new(&empty);
    assert_eq!(decode(&mut reader),Err(Error::MalformedGamma));
}
