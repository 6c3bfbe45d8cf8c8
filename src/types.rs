use serde::{Deserialize, Serialize};

/// Node index stored in connection and output genes
pub type IndexType = u16;

/// Upper bound on the arity of any catalog function
pub const MAX_FUNCTION_ARITY: usize = 2;

/// Half-open range `[lo, hi)` of node indices a gene may connect to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRange {
    pub lo: IndexType,
    pub hi: IndexType,
}

impl ConnectionRange {
    pub fn contains(&self, index: IndexType) -> bool {
        index >= self.lo && index < self.hi
    }

    pub fn len(&self) -> usize {
        usize::from(self.hi.saturating_sub(self.lo))
    }

    pub fn is_empty(&self) -> bool {
        self.hi <= self.lo
    }
}
