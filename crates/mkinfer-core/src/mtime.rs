use std::time::SystemTime;

///
/// Timestamp
///
/// Last-modified time of a file, as reported by the oracle.
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Timestamp(SystemTime);

impl Timestamp {
    #[must_use]
    pub const fn new(at: SystemTime) -> Self {
        Self(at)
    }

    #[must_use]
    pub const fn as_system_time(self) -> SystemTime {
        self.0
    }
}

///
/// Probe
///
/// Cached outcome of an mtime probe for one entity. `Unknown` (never
/// probed) is distinct from `Missing` (probed, file absent).
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Probe {
    #[default]
    Unknown,
    Missing,
    Modified(Timestamp),
}

impl Probe {
    /// Whether the oracle has already been consulted for this entity.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Whether the probed file exists on disk.
    #[must_use]
    pub const fn exists(self) -> bool {
        matches!(self, Self::Modified(_))
    }
}

///
/// MtimeOracle
///
/// Seam to the external timestamp source. The resolver consults the oracle
/// at most once per entity and caches the outcome in the registry.
///

pub trait MtimeOracle {
    fn probe(&self, name: &str) -> Option<Timestamp>;
}

///
/// FsOracle
///
/// Production oracle backed by the filesystem.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct FsOracle;

impl MtimeOracle for FsOracle {
    fn probe(&self, name: &str) -> Option<Timestamp> {
        std::fs::metadata(name)
            .and_then(|meta| meta.modified())
            .ok()
            .map(Timestamp::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_states_are_distinct() {
        assert_eq!(Probe::default(), Probe::Unknown);
        assert!(!Probe::Unknown.is_known());
        assert!(Probe::Missing.is_known());
        assert!(!Probe::Missing.exists());
        let at = Timestamp::new(SystemTime::UNIX_EPOCH);
        assert!(Probe::Modified(at).exists());
    }

    #[test]
    fn fs_oracle_probes_existing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("probe.txt");
        std::fs::write(&path, b"x").expect("write probe file");

        let found = FsOracle.probe(path.to_str().expect("utf-8 path"));
        assert!(found.is_some(), "existing file must probe to a timestamp");
    }

    #[test]
    fn fs_oracle_reports_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("absent.o");

        assert!(FsOracle.probe(path.to_str().expect("utf-8 path")).is_none());
    }
}
