//! Run-length layer of the pipeline.
//!
//! A BWT column decomposes into maximal equal-symbol runs; each run is
//! written as the gamma code of its length followed by the Huffman
//! codeword of its symbol. The codebook travels in front of the body as a
//! table listing, in ascending alphabet order, each present symbol's 7-bit
//! ASCII value (the sentinel as its literal ASCII 36), the gamma-coded
//! codeword length, and the codeword bits.

use crate::alphabet::{self,ALPHABET_LEN};
use crate::tools::bits::{BitReader,BitStream};
use crate::tools::elias;
use crate::tools::huffman::{self,CodeTable,DecodeTree};
use crate::Error;

/// Encoded run-length stages of one BWT column.
pub struct Encoded {
    pub unique_symbols: u64,
    pub table: BitStream,
    pub body: BitStream
}

/// Run-length encode a BWT column. The column is never empty since the
/// transform always emits the sentinel.
pub fn encode(bwt: &[u8]) -> Encoded {
    let mut freq = [0u64;ALPHABET_LEN];
    for &byte in bwt {
        freq[alphabet::index_of(byte)] += 1;
    }
    let codes = huffman::build_codebook(&freq);
    let unique_symbols = codes.iter().flatten().count() as u64;

    let mut body = BitStream::new();
    let mut accum = 1;
    let mut prev = bwt[0];
    for &byte in &bwt[1..] {
        if byte == prev {
            accum += 1;
        } else {
            push_run(&mut body,&codes,accum,prev);
            accum = 1;
            prev = byte;
        }
    }
    // the trailing run is still open
    push_run(&mut body,&codes,accum,prev);

    let mut table = BitStream::new();
    for (idx,code) in codes.iter().enumerate() {
        if let Some(code) = code {
            table.push_int(alphabet::byte_at(idx) as u64,7);
            table.extend(&elias::encode(code.len() as u64));
            table.extend(code);
        }
    }
    log::debug!("{} distinct symbols, table {} bits, body {} bits",
        unique_symbols,table.len(),body.len());
    Encoded { unique_symbols, table, body }
}

fn push_run(body: &mut BitStream,codes: &CodeTable,count: u64,symbol: u8) {
    body.extend(&elias::encode(count));
    let code = codes[alphabet::index_of(symbol)].as_ref().expect("counted symbol has a codeword");
    body.extend(code);
}

/// Parse a code table announcing `unique` symbols off the stream.
pub fn parse_table(reader: &mut BitReader,unique: usize) -> Result<CodeTable,Error> {
    let mut codes: CodeTable = vec![None;ALPHABET_LEN];
    for _ in 0..unique {
        let ascii = reader.read_int(7).map_err(|_| Error::MalformedTable)? as u8;
        let idx = alphabet::try_index_of(ascii).ok_or(Error::MalformedTable)?;
        let length = elias::decode(reader)? as usize;
        let code = reader.read_stream(length).map_err(|_| Error::MalformedTable)?;
        codes[idx] = Some(code);
    }
    Ok(codes)
}

/// Expand the run-length body back into a column of `bwt_len` bytes.
pub fn decode(reader: &mut BitReader,codes: &CodeTable,bwt_len: usize) -> Result<Vec<u8>,Error> {
    let tree = DecodeTree::from_codes(codes);
    let mut out = Vec::with_capacity(bwt_len);
    while out.len() < bwt_len {
        let count = elias::decode(reader).map_err(|_| Error::TruncatedBody)? as usize;
        let symbol = tree.decode_symbol(reader).map_err(|e| match e {
            Error::OutOfRange => Error::TruncatedBody,
            other => other
        })?;
        if count > bwt_len - out.len() {
            // a run crossing the declared length means a corrupt stream
            return Err(Error::TruncatedBody);
        }
        let byte = alphabet::byte_at(symbol);
        out.extend(std::iter::repeat(byte).take(count));
    }
    Ok(out)
}

#[cfg(test)]
fn round_trip(column: &[u8]) {
    let encoded = encode(column);
    let mut wire = encoded.table.clone();
    wire.extend(&encoded.body);
    let mut reader = BitReader::new(&wire);
    let codes = parse_table(&mut reader,encoded.unique_symbols as usize).unwrap();
    let decoded = decode(&mut reader,&codes,column.len()).unwrap();
    assert_eq!(decoded,column);
    assert_eq!(reader.remaining(),0);
}

#[test]
fn encodes_and_decodes_columns() {
    round_trip("annb$aa".as_bytes());
    round_trip("ipssm$pissii".as_bytes());
    round_trip("aaaa$".as_bytes());
    round_trip("$".as_bytes());
    round_trip("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzy$".as_bytes());
}

#[test]
fn runs_never_repeat_symbols() {
    let column = "aaabbbaaa$".as_bytes();
    let encoded = encode(column);
    let mut reader = BitReader::new(&encoded.body);
    let codes = {
        let mut wire_reader = BitReader::new(&encoded.table);
        parse_table(&mut wire_reader,encoded.unique_symbols as usize).unwrap()
    };
    let tree = DecodeTree::from_codes(&codes);
    let mut prev = None;
    let mut total = 0;
    while total < column.len() {
        let count = elias::decode(&mut reader).unwrap();
        let symbol = tree.decode_symbol(&mut reader).unwrap();
        assert!(count >= 1);
        assert_ne!(prev,Some(symbol));
        prev = Some(symbol);
        total += count as usize;
    }
    assert_eq!(total,column.len());
}

#[test]
fn short_table_is_rejected() {
    let encoded = encode("annb$aa".as_bytes());
    let cut = encoded.table.slice(0,encoded.table.len()-2).unwrap();
    let mut reader = BitReader::new(&cut);
    assert_eq!(
        parse_table(&mut reader,encoded.unique_symbols as usize).err(),
        Some(Error::MalformedTable)
    );
}

#[test]
fn truncated_body_is_rejected() {
    let encoded = encode("annb$aa".as_bytes());
    let mut wire = encoded.table.clone();
    wire.extend(&encoded.body);
    let cut = wire.slice(0,wire.len()-3).unwrap();
    let mut reader = BitReader::new(&cut);
    let codes = parse_table(&mut reader,encoded.unique_symbols as usize).unwrap();
    assert!(decode(&mut reader,&codes,7).is_err());
}
