//! Timeline frames

/// One frame column of the timeline
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Frame {
    /// Zero-based frame index
    pub index: usize,
    /// One-based label shown in the frame ruler
    pub label: String,
}

impl Frame {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            label: (index + 1).to_string(),
        }
    }
}
