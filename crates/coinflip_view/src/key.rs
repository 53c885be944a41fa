//! Node keys for view instances.
//!
//! Each `CoinFlipView` carries an `InstanceKey` and derives its node keys
//! from it. Keys are plain data: two views built the same way render equal
//! trees, and hosts showing several coins give each one its own key.

/// Key used when the host does not name the view
pub const DEFAULT_KEY: &str = "coinflip";

/// Prefix for the node keys of one view instance
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InstanceKey(String);

impl InstanceKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn get(&self) -> &str {
        &self.0
    }

    /// Key for a child node: `{key}_{suffix}`
    pub fn derive(&self, suffix: &str) -> String {
        format!("{}_{}", self.0, suffix)
    }
}

impl Default for InstanceKey {
    fn default() -> Self {
        Self::new(DEFAULT_KEY)
    }
}

impl std::fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
