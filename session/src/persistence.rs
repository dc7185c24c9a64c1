//! Persistence of the last-used currency codes.

/// Storage for the last-used source and target codes.
///
/// Read once when a session starts and written on every change. The storage
/// medium and format are up to the implementation.
pub trait CodeStore: Send {
    fn source_code(&self) -> Option<String>;

    fn target_code(&self) -> Option<String>;

    fn set_source_code(&mut self, code: &str);

    fn set_target_code(&mut self, code: &str);
}

/// In-memory code store.
#[derive(Debug, Clone, Default)]
pub struct MemoryCodeStore {
    source: Option<String>,
    target: Option<String>,
    writes: usize,
}

impl MemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with both codes.
    pub fn with_codes(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
            writes: 0,
        }
    }

    /// Number of writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl CodeStore for MemoryCodeStore {
    fn source_code(&self) -> Option<String> {
        self.source.clone()
    }

    fn target_code(&self) -> Option<String> {
        self.target.clone()
    }

    fn set_source_code(&mut self, code: &str) {
        self.source = Some(code.to_string());
        self.writes += 1;
    }

    fn set_target_code(&mut self, code: &str) {
        self.target = Some(code.to_string());
        self.writes += 1;
    }
}
