use std::sync::Arc;

use subtle::ConstantTimeEq;

/// Process-wide shared secret every API request must carry in its `key` header.
///
/// Loaded once at startup, immutable afterwards, cheap to clone.
#[derive(Clone)]
pub struct ServiceKey(Arc<str>);

impl std::fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ServiceKey(<redacted>)")
    }
}

impl ServiceKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Byte-for-byte comparison in constant time (for equal lengths).
    pub fn matches(&self, presented: &[u8]) -> bool {
        if presented.is_empty() {
            return false;
        }
        self.0.as_bytes().ct_eq(presented).into()
    }
}
