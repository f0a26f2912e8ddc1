use bytes::Bytes;

/// Read-only view of the key-value store served over http.
///
/// A lookup must not have side effects; it is called at most once per request.
#[cfg_attr(test, mockall::automock)]
pub trait Store {
    fn lookup(&self, key: &[u8]) -> Lookup;
}

/// Result of a single store lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Absent,
    /// The key exists but holds a collection rather than a scalar.
    WrongType,
    Found(StoredValue),
}

/// A scalar value, either raw bytes or an integer kept in its compact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue {
    Raw(Bytes),
    Int(i64),
}

impl StoredValue {
    /// The canonical bytes of the value; integers render as decimal text.
    pub fn render(&self) -> Bytes {
        match self {
            StoredValue::Raw(bytes) => bytes.clone(),
            StoredValue::Int(n) => Bytes::from(n.to_string()),
        }
    }
}

impl From<Bytes> for StoredValue {
    fn from(bytes: Bytes) -> Self {
        StoredValue::Raw(bytes)
    }
}

impl From<i64> for StoredValue {
    fn from(n: i64) -> Self {
        StoredValue::Int(n)
    }
}
