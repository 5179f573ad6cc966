//! RLP integration for the fixed-width field types.
//!
//! The codec itself is the `rlp` crate. This module fixes how hashes and
//! addresses map onto it (exact-width byte strings) and provides the strict
//! entry points used by every record decoder:
//! - the outermost item must span the entire input (no truncation, no trailing bytes)
//! - lists must carry exactly the declared number of items

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use std::cmp::Ordering;

use crate::address::Address;
use crate::crypto::Hash32;
use crate::error::{CollationError, Result};
use crate::schema::RecordType;

impl Encodable for Hash32 {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.encoder().encode_value(&self.0);
    }
}

impl Decodable for Hash32 {
    fn decode(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
        rlp.decoder()
            .decode_value(|bytes| fixed_width::<32>(bytes).map(Hash32))
    }
}

impl Encodable for Address {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.encoder().encode_value(&self.0);
    }
}

impl Decodable for Address {
    fn decode(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
        rlp.decoder()
            .decode_value(|bytes| fixed_width::<20>(bytes).map(Address))
    }
}

fn fixed_width<const N: usize>(bytes: &[u8]) -> std::result::Result<[u8; N], DecoderError> {
    match bytes.len().cmp(&N) {
        Ordering::Less => Err(DecoderError::RlpIsTooShort),
        Ordering::Greater => Err(DecoderError::RlpIsTooBig),
        Ordering::Equal => {
            let mut arr = [0u8; N];
            arr.copy_from_slice(bytes);
            Ok(arr)
        }
    }
}

/// Require `rlp` to be a list of exactly `expected` items.
pub(crate) fn expect_list(rlp: &Rlp, expected: usize) -> std::result::Result<(), DecoderError> {
    if list_item_count(rlp)? != expected {
        return Err(DecoderError::RlpIncorrectListLen);
    }
    Ok(())
}

/// Decode a list item at `index` whose members are all `T`.
///
/// Unlike `Rlp::list_at`, a data item in list position is rejected rather than
/// read as an empty list.
pub(crate) fn strict_list_at<T: Decodable>(
    rlp: &Rlp,
    index: usize,
) -> std::result::Result<Vec<T>, DecoderError> {
    let list = rlp.at(index)?;
    let count = list_item_count(&list)?;
    let mut items = Vec::with_capacity(count);
    for i in 0..count {
        items.push(list.val_at(i)?);
    }
    Ok(items)
}

/// Count the items of a list whose items exactly fill its declared payload.
///
/// `Rlp::item_count` stops at the first unparseable item, so payload bytes
/// after the last item would otherwise go unnoticed.
fn list_item_count(rlp: &Rlp) -> std::result::Result<usize, DecoderError> {
    if !rlp.is_list() {
        return Err(DecoderError::RlpExpectedToBeList);
    }
    let count = rlp.item_count()?;
    let mut covered = 0;
    for i in 0..count {
        covered += rlp.at(i)?.as_raw().len();
    }
    if covered != rlp.payload_info()?.value_len {
        return Err(DecoderError::RlpInconsistentLengthAndData);
    }
    Ok(count)
}

/// Decode a whole buffer as exactly one `T`.
pub(crate) fn decode_exact<T: Decodable>(bytes: &[u8], record: RecordType) -> Result<T> {
    decode_exact_inner(bytes).map_err(|e| {
        tracing::debug!(
            record = record.name(),
            len = bytes.len(),
            error = %e,
            "rejected malformed encoding"
        );
        CollationError::MalformedEncoding(format!("{}: {}", record.name(), e))
    })
}

fn decode_exact_inner<T: Decodable>(bytes: &[u8]) -> std::result::Result<T, DecoderError> {
    if bytes.is_empty() {
        return Err(DecoderError::RlpIsTooShort);
    }
    let rlp = Rlp::new(bytes);
    let info = rlp.payload_info()?;
    match (info.header_len + info.value_len).cmp(&bytes.len()) {
        Ordering::Less => return Err(DecoderError::Custom("trailing bytes after item")),
        Ordering::Greater => return Err(DecoderError::RlpIsTooShort),
        Ordering::Equal => {}
    }
    rlp.as_val()
}

/// Re-frame the list in `encoded` with `extra` appended inside its payload.
#[cfg(test)]
pub(crate) fn reframe_list(encoded: &[u8], extra: &[u8]) -> Vec<u8> {
    let info = Rlp::new(encoded).payload_info().unwrap();
    let mut payload = encoded[info.header_len..].to_vec();
    payload.extend_from_slice(extra);

    let mut out = if payload.len() <= 55 {
        vec![0xc0 + payload.len() as u8]
    } else {
        let len = (payload.len() as u64).to_be_bytes();
        let skip = len.iter().take_while(|b| **b == 0).count();
        let mut header = vec![0xf7 + (len.len() - skip) as u8];
        header.extend_from_slice(&len[skip..]);
        header
    };
    out.extend_from_slice(&payload);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash32_encodes_as_32_byte_string() {
        let encoded = rlp::encode(&Hash32::from_bytes([0x11; 32]));
        assert_eq!(encoded.len(), 33);
        assert_eq!(encoded[0], 0xa0);
    }

    #[test]
    fn test_address_encodes_as_20_byte_string() {
        let encoded = rlp::encode(&Address::from_bytes([0x35; 20]));
        assert_eq!(encoded[0], 0x94);
        assert_eq!(&encoded[1..], &[0x35u8; 20]);
    }

    #[test]
    fn test_hash32_width_mismatch_rejected() {
        let short = rlp::encode(&vec![0u8; 31]);
        let long = rlp::encode(&vec![0u8; 33]);
        assert!(decode_exact::<Hash32>(&short, RecordType::CollationHeader).is_err());
        assert!(decode_exact::<Hash32>(&long, RecordType::CollationHeader).is_err());
    }

    #[test]
    fn test_address_width_mismatch_rejected() {
        let short = rlp::encode(&vec![0x35u8; 19]);
        let err = decode_exact::<Address>(&short, RecordType::CollationHeader).unwrap_err();
        assert!(matches!(err, CollationError::MalformedEncoding(_)));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = rlp::encode(&Hash32::ZERO).to_vec();
        bytes.push(0x00);
        assert!(decode_exact::<Hash32>(&bytes, RecordType::CollationHeader).is_err());
    }

    #[test]
    fn test_truncated_rejected() {
        let bytes = rlp::encode(&Hash32::ZERO).to_vec();
        assert!(decode_exact::<Hash32>(&bytes[..20], RecordType::CollationHeader).is_err());
        assert!(decode_exact::<Hash32>(&[], RecordType::CollationHeader).is_err());
    }

    #[test]
    fn test_expect_list_counts_items() {
        let mut s = RlpStream::new_list(2);
        s.append(&1u64);
        s.append(&2u64);
        let bytes = s.out();
        let rlp = Rlp::new(&bytes);

        assert!(expect_list(&rlp, 2).is_ok());
        assert_eq!(expect_list(&rlp, 3), Err(DecoderError::RlpIncorrectListLen));
    }

    #[test]
    fn test_strict_list_rejects_data_item() {
        let mut s = RlpStream::new_list(1);
        s.append(&vec![0x01u8, 0x02]);
        let bytes = s.out();
        let rlp = Rlp::new(&bytes);

        let result: std::result::Result<Vec<u64>, _> = strict_list_at(&rlp, 0);
        assert_eq!(result, Err(DecoderError::RlpExpectedToBeList));
    }

    #[test]
    fn test_reframe_list_keeps_canonical_form_without_extra() {
        let mut s = RlpStream::new_list(2);
        s.append(&1u64).append(&2u64);
        let bytes = s.out();
        assert_eq!(reframe_list(&bytes, &[]), bytes.to_vec());
    }

    #[test]
    fn test_expect_list_rejects_unparsed_payload() {
        let mut s = RlpStream::new_list(2);
        s.append(&1u64).append(&2u64);
        let bytes = reframe_list(&s.out(), &[0xb8]);
        let rlp = Rlp::new(&bytes);

        assert_eq!(rlp.item_count(), Ok(2));
        assert_eq!(
            expect_list(&rlp, 2),
            Err(DecoderError::RlpInconsistentLengthAndData)
        );
    }

    #[test]
    fn test_expect_list_rejects_extra_item() {
        let mut s = RlpStream::new_list(2);
        s.append(&1u64).append(&2u64);
        let bytes = reframe_list(&s.out(), &[0x80]);
        assert_eq!(
            expect_list(&Rlp::new(&bytes), 2),
            Err(DecoderError::RlpIncorrectListLen)
        );
    }

    #[test]
    fn test_strict_list_rejects_unparsed_payload() {
        let mut inner = RlpStream::new_list(1);
        inner.append(&7u64);
        let inner = reframe_list(&inner.out(), &[0xb8]);

        let mut s = RlpStream::new_list(1);
        s.append_raw(&inner, 1);
        let bytes = s.out();

        let result: std::result::Result<Vec<u64>, _> = strict_list_at(&Rlp::new(&bytes), 0);
        assert_eq!(result, Err(DecoderError::RlpInconsistentLengthAndData));
    }
}
