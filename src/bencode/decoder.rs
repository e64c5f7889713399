use super::error::DecodeError;
use super::BencodeValue;
use std::collections::BTreeMap;

/// Deepest list/dictionary nesting accepted before bailing out
const MAX_DEPTH: usize = 64;

/// `usize::MAX` has 20 decimal digits
const MAX_LENGTH_DIGITS: usize = 20;

/// Sign plus the 19 digits of `i64::MIN`
const MAX_INTEGER_CHARS: usize = 20;

/// Decode one bencoded value starting at `offset`.
///
/// Returns the value together with the number of bytes it occupied. Bytes
/// after the value are left untouched.
pub fn decode(data: &[u8], offset: usize) -> Result<(BencodeValue, usize), DecodeError> {
    let mut pos = offset;
    let value = decode_value(data, &mut pos, 0)?;
    Ok((value, pos - offset))
}

/// Decode a buffer that must hold exactly one bencoded value
pub fn decode_all(data: &[u8]) -> Result<BencodeValue, DecodeError> {
    let (value, consumed) = decode(data, 0)?;

    if consumed != data.len() {
        return Err(DecodeError::TrailingData { offset: consumed });
    }

    Ok(value)
}

fn decode_value(data: &[u8], pos: &mut usize, depth: usize) -> Result<BencodeValue, DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::NestingTooDeep { offset: *pos });
    }

    match data.get(*pos) {
        None => Err(DecodeError::UnexpectedEof { offset: *pos }),
        Some(b'i') => decode_integer(data, pos),
        Some(b'l') => decode_list(data, pos, depth),
        Some(b'd') => decode_dict(data, pos, depth),
        Some(b'0'..=b'9') => decode_byte_string(data, pos).map(BencodeValue::ByteString),
        Some(&tag) => Err(DecodeError::UnknownTag { offset: *pos, tag }),
    }
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<BencodeValue, DecodeError> {
    let start = *pos;
    let digits_start = start + 1; // Skip 'i'

    let end = data[digits_start..]
        .iter()
        .take(MAX_INTEGER_CHARS + 1)
        .position(|&b| b == b'e')
        .map(|i| digits_start + i)
        .ok_or(DecodeError::MalformedInteger { offset: start })?;

    let value = parse_integer(&data[digits_start..end])
        .ok_or(DecodeError::MalformedInteger { offset: start })?;

    *pos = end + 1; // Skip 'e'

    Ok(BencodeValue::Integer(value))
}

/// Parse `-?(0|[1-9][0-9]*)` into an `i64`, rejecting `-0` and overflow
fn parse_integer(span: &[u8]) -> Option<i64> {
    let (negative, digits) = match span.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, span),
    };

    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }

    if digits[0] == b'0' && (digits.len() > 1 || negative) {
        return None;
    }

    // Accumulate towards the sign so that i64::MIN parses
    digits.iter().try_fold(0i64, |acc, &d| {
        let d = i64::from(d - b'0');
        let acc = acc.checked_mul(10)?;
        if negative {
            acc.checked_sub(d)
        } else {
            acc.checked_add(d)
        }
    })
}

fn decode_byte_string(data: &[u8], pos: &mut usize) -> Result<Vec<u8>, DecodeError> {
    let start = *pos;

    let colon = data[start..]
        .iter()
        .take(MAX_LENGTH_DIGITS + 1)
        .position(|b| !b.is_ascii_digit())
        .map(|i| start + i)
        .filter(|&i| i > start && data[i] == b':')
        .ok_or(DecodeError::MalformedLength { offset: start })?;

    let digits = &data[start..colon];
    if digits.len() > 1 && digits[0] == b'0' {
        return Err(DecodeError::MalformedLength { offset: start });
    }

    let len = digits
        .iter()
        .try_fold(0usize, |acc, &d| {
            acc.checked_mul(10)?.checked_add(usize::from(d - b'0'))
        })
        .ok_or(DecodeError::MalformedLength { offset: start })?;

    let body_start = colon + 1; // Skip ':'
    let available = data.len() - body_start;

    if len > available {
        return Err(DecodeError::TruncatedString {
            offset: start,
            declared: len,
            available,
        });
    }

    *pos = body_start + len;

    Ok(data[body_start..*pos].to_vec())
}

fn decode_list(data: &[u8], pos: &mut usize, depth: usize) -> Result<BencodeValue, DecodeError> {
    let start = *pos;
    *pos += 1; // Skip 'l'

    let mut list = Vec::new();

    loop {
        match data.get(*pos) {
            None => return Err(DecodeError::UnterminatedList { offset: start }),
            Some(b'e') => break,
            Some(_) => list.push(decode_value(data, pos, depth + 1)?),
        }
    }

    *pos += 1; // Skip 'e'

    Ok(BencodeValue::List(list))
}

fn decode_dict(data: &[u8], pos: &mut usize, depth: usize) -> Result<BencodeValue, DecodeError> {
    let start = *pos;
    *pos += 1; // Skip 'd'

    let mut dict: BTreeMap<Vec<u8>, BencodeValue> = BTreeMap::new();

    loop {
        let key_offset = *pos;
        let key = match data.get(key_offset) {
            None => return Err(DecodeError::UnterminatedMap { offset: start }),
            Some(b'e') => break,
            Some(b'0'..=b'9') => decode_byte_string(data, pos)?,
            Some(_) => return Err(DecodeError::NonStringKey { offset: key_offset }),
        };

        // Keys must be strictly ascending; equal keys are duplicates
        if let Some((last, _)) = dict.last_key_value() {
            if key <= *last {
                return Err(DecodeError::UnsortedOrDuplicateKey { offset: key_offset });
            }
        }

        if *pos >= data.len() {
            return Err(DecodeError::UnterminatedMap { offset: start });
        }

        let value = decode_value(data, pos, depth + 1)?;
        dict.insert(key, value);
    }

    *pos += 1; // Skip 'e'

    Ok(BencodeValue::Dict(dict))
}
