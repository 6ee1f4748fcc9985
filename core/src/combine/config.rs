//! combine/config.rs

/// How a combining stream treats the lengths its children declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthPolicy {
    /// A child is finished when its `read` returns 0. Declared lengths only feed `len()`.
    Trust,
    /// Declared lengths are authoritative: reads are capped at them and a child that runs
    /// dry early is an `UnexpectedEof` error.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombineConfig {
    pub length_policy: LengthPolicy,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            length_policy: LengthPolicy::Trust,
        }
    }
}

impl CombineConfig {
    pub fn new(length_policy: LengthPolicy) -> Self {
        Self { length_policy }
    }

    pub fn strict() -> Self {
        Self { length_policy: LengthPolicy::Strict }
    }
}
