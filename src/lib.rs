//! # bwtzip Library
//!
//! Compress or expand single lines of printable text with a Burrows-Wheeler
//! pipeline.
//! * `bwt_huff` composes the stages and owns the container format
//! * `suffix_tree` builds the linear-time Ukkonen tree behind the transform
//! * `bwt` holds the forward transform and the LF-mapping inverse
//! * `run_length` pairs gamma-coded run counts with Huffman codewords
//! * `tools` carries the bitstream, gamma, and Huffman machinery
//!
//! The supported alphabet is ASCII 37 through 126; the transform reserves
//! `$` (ASCII 36) as its sentinel, so it may not appear in the input.
//!
//! ## Buffer Example
//!
//! ```rs
//! let packed = bwtzip::bwt_huff::compress("banana".as_bytes())
//!     .expect("compression failed");
//! let text = bwtzip::bwt_huff::expand(&packed).expect("expansion failed");
//! assert_eq!(text, "banana".as_bytes());
//! ```

pub mod alphabet;
pub mod bwt;
pub mod bwt_huff;
pub mod run_length;
pub mod suffix_tree;
pub mod tools;

/// Pipeline errors
#[derive(thiserror::Error,Debug,PartialEq,Eq)]
pub enum Error {
    #[error("character outside the supported range")]
    IllegalCharacter,
    #[error("input contains the reserved sentinel")]
    IllegalSentinel,
    #[error("gamma code ended mid-component")]
    MalformedGamma,
    #[error("code table shorter than announced")]
    MalformedTable,
    #[error("body does not match the declared length")]
    TruncatedBody,
    #[error("no symbol for codeword")]
    CodewordNotFound,
    #[error("bit index out of range")]
    OutOfRange
}
