use pickupcore::host_interface::{CounterStore, PICKUP_COUNT_KEY};
use pickupcore::prelude::{HostError, HostResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Counter held in memory for bridge runs and tests.
pub struct InMemoryCounterStore {
    count: u64,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    #[cfg(test)]
    pub fn with_count(count: u64) -> Self {
        Self { count }
    }
}

impl Default for InMemoryCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterStore for InMemoryCounterStore {
    fn load(&self) -> HostResult<u64> {
        Ok(self.count)
    }

    fn store(&mut self, count: u64) -> HostResult<()> {
        self.count = count;
        Ok(())
    }
}

/// Counter persisted as a plain integer under `<dir>/pickupCount`.
///
/// An absent file reads as 0; unreadable content is a storage error so a
/// corrupted counter is never silently restarted.
pub struct FileCounterStore {
    path: PathBuf,
}

impl FileCounterStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(PICKUP_COUNT_KEY),
        }
    }
}

impl CounterStore for FileCounterStore {
    fn load(&self) -> HostResult<u64> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.trim().parse::<u64>().map_err(|err| {
                HostError::Storage(format!(
                    "unreadable counter {}: {}",
                    self.path.display(),
                    err
                ))
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(0),
            Err(err) => Err(HostError::Storage(err.to_string())),
        }
    }

    fn store(&mut self, count: u64) -> HostResult<()> {
        fs::write(&self.path, count.to_string())
            .map_err(|err| HostError::Storage(err.to_string()))
    }
}
