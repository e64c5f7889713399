use std::collections::BTreeMap;

/// Represents a bencoded value
///
/// Dictionaries are kept in a `BTreeMap`, so keys are always held in
/// ascending byte order and encoding never has to sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BencodeValue {
    /// Integer: i<number>e
    Integer(i64),
    /// Byte string: <length>:<contents>
    ByteString(Vec<u8>),
    /// List: l<values>e
    List(Vec<BencodeValue>),
    /// Dictionary: d<key-value pairs>e
    Dict(BTreeMap<Vec<u8>, BencodeValue>),
}

impl BencodeValue {
    /// Try to get this value as an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            BencodeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a byte string
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            BencodeValue::ByteString(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a UTF-8 string
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Try to get this value as a list
    pub fn as_list(&self) -> Option<&[BencodeValue]> {
        match self {
            BencodeValue::List(l) => Some(l),
            _ => None,
        }
    }

    /// Try to get this value as a dictionary
    pub fn as_dict(&self) -> Option<&BTreeMap<Vec<u8>, BencodeValue>> {
        match self {
            BencodeValue::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Get a value from a dictionary by key
    pub fn dict_get(&self, key: &[u8]) -> Option<&BencodeValue> {
        self.as_dict()?.get(key)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            BencodeValue::Integer(_) => "integer",
            BencodeValue::ByteString(_) => "byte string",
            BencodeValue::List(_) => "list",
            BencodeValue::Dict(_) => "dictionary",
        }
    }

    /// Convert into a JSON value for display.
    ///
    /// Byte string values become JSON strings with invalid UTF-8 replaced by
    /// U+FFFD. Dictionary keys go through [`escape_key`] so distinct keys
    /// never collapse into one JSON member.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            BencodeValue::Integer(i) => serde_json::Value::from(*i),
            BencodeValue::ByteString(s) => {
                serde_json::Value::String(String::from_utf8_lossy(s).into_owned())
            }
            BencodeValue::List(l) => {
                serde_json::Value::Array(l.iter().map(BencodeValue::to_json).collect())
            }
            BencodeValue::Dict(d) => serde_json::Value::Object(
                d.iter()
                    .map(|(k, v)| (escape_key(k), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Render a dictionary key as text without losing information.
///
/// Invalid UTF-8 bytes become `\xNN` and a literal backslash becomes `\\`,
/// so the mapping is injective.
fn escape_key(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());

    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(&valid.replace('\\', "\\\\"));
                return out;
            }
            Err(err) => {
                let (valid, rest) = bytes.split_at(err.valid_up_to());
                let valid = std::str::from_utf8(valid).unwrap_or_default();
                out.push_str(&valid.replace('\\', "\\\\"));

                let bad_len = err.error_len().unwrap_or(rest.len());
                for byte in &rest[..bad_len] {
                    out.push_str(&format!("\\x{:02x}", byte));
                }
                bytes = &rest[bad_len..];
            }
        }
    }
}

impl From<i64> for BencodeValue {
    fn from(i: i64) -> Self {
        BencodeValue::Integer(i)
    }
}

impl From<&str> for BencodeValue {
    fn from(s: &str) -> Self {
        BencodeValue::ByteString(s.as_bytes().to_vec())
    }
}

impl From<&[u8]> for BencodeValue {
    fn from(b: &[u8]) -> Self {
        BencodeValue::ByteString(b.to_vec())
    }
}

impl From<Vec<u8>> for BencodeValue {
    fn from(b: Vec<u8>) -> Self {
        BencodeValue::ByteString(b)
    }
}

impl From<Vec<BencodeValue>> for BencodeValue {
    fn from(l: Vec<BencodeValue>) -> Self {
        BencodeValue::List(l)
    }
}

impl From<BTreeMap<Vec<u8>, BencodeValue>> for BencodeValue {
    fn from(d: BTreeMap<Vec<u8>, BencodeValue>) -> Self {
        BencodeValue::Dict(d)
    }
}
