/// Upload tracker for CPU-side buffers.
///
/// Writers bump the version after a batch of edits; the renderer compares
/// against the last version it uploaded. A buffer is dirty whenever the two
/// disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeTracker {
    version: u64,
    uploaded: u64,
}

impl ChangeTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one batch of modifications.
    pub fn changed(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether there are modifications the renderer has not consumed yet.
    #[must_use]
    pub fn needs_upload(&self) -> bool {
        self.version != self.uploaded
    }

    /// Called by the consumer once the current version has been uploaded.
    pub fn mark_uploaded(&mut self) {
        self.uploaded = self.version;
    }
}
