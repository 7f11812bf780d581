//! Catalog and name-mapping types
//!
//! Handles are opaque to everything but the engine that issued them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to an open source workspace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkspaceHandle {
    id: u64,
    location: String,
}

impl WorkspaceHandle {
    /// Creates a handle. Only engines should call this.
    pub fn new(id: u64, location: impl Into<String>) -> Self {
        Self {
            id,
            location: location.into(),
        }
    }

    /// Engine-assigned identifier
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Where the workspace was opened from (connection descriptor)
    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Opaque reference to one dataset inside a workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatasetHandle {
    workspace: u64,
    index: usize,
}

impl DatasetHandle {
    pub fn new(workspace: u64, index: usize) -> Self {
        Self { workspace, index }
    }

    pub fn workspace(&self) -> u64 {
        self.workspace
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// A resolved feature class within the source workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    handle: DatasetHandle,
    name: String,
}

impl CatalogEntry {
    pub fn new(handle: DatasetHandle, name: impl Into<String>) -> Self {
        Self {
            handle,
            name: name.into(),
        }
    }

    pub fn handle(&self) -> DatasetHandle {
        self.handle
    }

    /// Catalog name exactly as the source reports it
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive name comparison used for resolution
    pub fn matches(&self, requested: &str) -> bool {
        self.name.eq_ignore_ascii_case(requested.trim())
    }
}

/// Identity of a scratch (staging) workspace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkspaceName(String);

impl WorkspaceName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One source dataset and the name it would take in the destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedDataset {
    pub source: CatalogEntry,
    pub target_name: String,
}

/// Mapping from resolved catalog entries to destination names
///
/// A mapping with conflicts must never reach the transfer service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMapping {
    target: WorkspaceName,
    datasets: Vec<MappedDataset>,
    conflicts: Vec<String>,
}

impl NameMapping {
    pub fn new(target: WorkspaceName, datasets: Vec<MappedDataset>, conflicts: Vec<String>) -> Self {
        Self {
            target,
            datasets,
            conflicts,
        }
    }

    /// Scratch workspace the mapping was generated against
    pub fn target(&self) -> &WorkspaceName {
        &self.target
    }

    pub fn datasets(&self) -> &[MappedDataset] {
        &self.datasets
    }

    pub fn conflicts(&self) -> &[String] {
        &self.conflicts
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entry_matches_case_insensitively() {
        let entry = CatalogEntry::new(DatasetHandle::new(1, 0), "T.TAB1");
        assert!(entry.matches("t.tab1"));
        assert!(entry.matches(" T.Tab1 "));
        assert!(!entry.matches("T.TAB2"));
    }

    #[test]
    fn test_name_mapping_conflict_flag() {
        let entry = CatalogEntry::new(DatasetHandle::new(1, 0), "T.TAB1");
        let mapped = MappedDataset {
            source: entry,
            target_name: "TAB1".to_string(),
        };
        let clean = NameMapping::new(WorkspaceName::new("scratch"), vec![mapped.clone()], vec![]);
        assert!(!clean.has_conflicts());
        assert_eq!(clean.len(), 1);

        let conflicting = NameMapping::new(
            WorkspaceName::new("scratch"),
            vec![mapped],
            vec!["TAB1".to_string()],
        );
        assert!(conflicting.has_conflicts());
    }
}
