//! Per-source polling state.

/// Last observed existence and size of a source file.
///
/// Mutated only by the monitor that owns the source, once per poll tick.
/// Starts as absent with size 0 even when the file already exists: the
/// first tick that sees a non-empty file emits one MODIFY covering the
/// whole current content. Pre-boot history is never reconstructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonitorState {
    /// Whether the file existed at the last tick.
    pub exists: bool,
    /// File size observed at the last tick, in bytes.
    pub size: u64,
}

impl MonitorState {
    /// Bootstrap state: absent, size 0.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_state() {
        let state = MonitorState::new();
        assert!(!state.exists);
        assert_eq!(state.size, 0);
    }
}
