use super::BencodeValue;

/// Encode a BencodeValue into its canonical byte representation
///
/// Dictionary entries come out in ascending key order because the value
/// model stores them sorted.
pub fn encode(value: &BencodeValue) -> Vec<u8> {
    let mut result = Vec::new();
    encode_into(value, &mut result);
    result
}

fn encode_into(value: &BencodeValue, output: &mut Vec<u8>) {
    match value {
        BencodeValue::Integer(i) => {
            output.push(b'i');
            output.extend_from_slice(i.to_string().as_bytes());
            output.push(b'e');
        }
        BencodeValue::ByteString(s) => encode_byte_string(s, output),
        BencodeValue::List(list) => {
            output.push(b'l');
            for item in list {
                encode_into(item, output);
            }
            output.push(b'e');
        }
        BencodeValue::Dict(dict) => {
            output.push(b'd');
            for (key, value) in dict {
                encode_byte_string(key, output);
                encode_into(value, output);
            }
            output.push(b'e');
        }
    }
}

fn encode_byte_string(bytes: &[u8], output: &mut Vec<u8>) {
    output.extend_from_slice(bytes.len().to_string().as_bytes());
    output.push(b':');
    output.extend_from_slice(bytes);
}
