//! Named symbolic unknowns.

use std::fmt;

/// The variable names handed out in order, matching the legacy generator.
pub const NAME_POOL: [&str; 6] = ["x", "y", "z", "w", "v", "u"];

/// A named unknown in a generated equation.
///
/// Identity is the name; unknowns are immutable and scoped to a single
/// generation call.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Unknown(String);

impl Unknown {
    /// Creates an unknown with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the first `count` unknowns from the standard name pool.
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds the pool size; configuration validation
    /// caps unknown counts well below it.
    #[must_use]
    pub fn pool(count: usize) -> Vec<Self> {
        assert!(count <= NAME_POOL.len(), "unknown count exceeds name pool");
        NAME_POOL[..count].iter().map(|n| Self::new(*n)).collect()
    }

    /// Returns true if `name` is one of the standard pool names.
    #[must_use]
    pub fn is_pool_name(name: &str) -> bool {
        NAME_POOL.contains(&name)
    }

    /// Returns the unknown's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown({})", self.0)
    }
}
