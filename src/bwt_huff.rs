//! BWT compression with run-length and Huffman coding.
//!
//! The packed container is, in order: the gamma code of the BWT length
//! (text length plus the sentinel), the gamma code of the distinct-symbol
//! count, the code table, the run-length body, and zero padding up to the
//! next byte boundary. The pad width is not recorded; the decoder stops
//! on its own once the declared BWT length is reached.
//!
//! * This transforms buffers, not files (a line of text is easily buffered)
//! * Both directions run whole-buffer and single-threaded

use crate::alphabet;
use crate::bwt;
use crate::run_length;
use crate::tools::bits::{BitReader,BitStream};
use crate::tools::elias;
use crate::Error;

/// Main compression function
pub fn compress(text: &[u8]) -> Result<Vec<u8>,Error> {
    alphabet::validate(text)?;
    let column = bwt::forward(text)?;
    let encoded = run_length::encode(&column);
    let mut stream = elias::encode(column.len() as u64);
    stream.extend(&elias::encode(encoded.unique_symbols));
    stream.extend(&encoded.table);
    stream.extend(&encoded.body);
    log::debug!("{} payload bits for {} input bytes",stream.len(),text.len());
    Ok(stream.to_bytes())
}

/// Main expansion function
pub fn expand(data: &[u8]) -> Result<Vec<u8>,Error> {
    let stream = BitStream::from_bytes(data);
    let mut reader = BitReader::new(&stream);
    let bwt_len = elias::decode(&mut reader)? as usize;
    let unique = elias::decode(&mut reader)? as usize;
    let codes = run_length::parse_table(&mut reader,unique)?;
    let column = run_length::decode(&mut reader,&codes,bwt_len)?;
    log::debug!("recovered a {} character column",column.len());
    Ok(bwt::inverse(&column))
}

#[cfg(test)]
fn round_trip(text: &str) {
    let packed = compress(text.as_bytes()).expect("compression failed");
    let expanded = expand(&packed).expect("expansion failed");
    assert_eq!(expanded,text.as_bytes(),"input {}",text);
}

#[test]
fn compression_works() {
    let packed = compress("aaaa".as_bytes()).expect("compression failed");
    assert_eq!(packed,hex::decode("1524b0e260").unwrap());
    assert_eq!(expand(&packed).expect("expansion failed"),"aaaa".as_bytes());
}

#[test]
fn invertibility() {
    round_trip("abc");
    round_trip("banana");
    round_trip("mississippi");
    round_trip("aaaa");
    round_trip("abracadabra");
    round_trip("");
    round_trip("%");
    round_trip("~%~%~");
    round_trip("how.razorback.jumping.frogs.can.level.six.piqued.gymnasts");
}

#[test]
fn output_is_whole_bytes() {
    for text in ["a","ab","abcdefg","zzzzzzzzzzzz"] {
        let packed = compress(text.as_bytes()).unwrap();
        assert!(!packed.is_empty());
        // byte alignment is inherent in the container; a second expansion
        // of the same bytes must agree
        assert_eq!(expand(&packed).unwrap(),text.as_bytes());
    }
}

#[test]
fn round_trips_many_lengths() {
    let mut state: u64 = 0x2545F4914F6CDD1D;
    for len in 1..=200 {
        let mut text = Vec::with_capacity(len);
        for _ in 0..len {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            text.push(37 + ((state >> 33) % 90) as u8);
        }
        let packed = compress(&text).expect("compression failed");
        assert_eq!(expand(&packed).expect("expansion failed"),text,"length {}",len);
    }
}

#[test]
fn rejects_illegal_input() {
    assert_eq!(compress("two words".as_bytes()),Err(Error::IllegalCharacter));
    assert_eq!(compress("cash$only".as_bytes()),Err(Error::IllegalSentinel));
    assert_eq!(compress(&[31]),Err(Error::IllegalCharacter));
}

#[test]
fn rejects_corrupt_streams() {
    assert_eq!(expand(&[]),Err(Error::MalformedGamma));
    let packed = compress("mississippi".as_bytes()).unwrap();
    assert!(expand(&packed[..packed.len()-1]).is_err());
    assert!(expand(&packed[..2]).is_err());
}
