//! Bencode, the length-prefixed encoding used by `.torrent` files and
//! tracker replies.
//!
//! The decoder is strict: non-canonical integers and lengths, truncated
//! strings and dictionaries whose keys are not in ascending byte order are
//! all rejected. Together with the sorted dictionary representation this
//! means `encode(decode_all(b)?) == b` for every accepted buffer `b`.

mod decoder;
mod encoder;
mod error;
mod value;

pub use decoder::{decode, decode_all};
pub use encoder::encode;
pub use error::DecodeError;
pub use value::BencodeValue;
