use serde::Serialize;

/// Version identifier Lambda reports for the unpublished, mutable function.
pub const LATEST_VERSION: &str = "$LATEST";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FunctionRecord {
    pub name: String,
    pub arn: String,
    /// Version reported by the function listing; `$LATEST` for unqualified listings.
    pub current_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRecord {
    pub name: String,
    pub function_version: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VersionRecord {
    pub version: String,
    pub arn: String,
}

impl FunctionRecord {
    pub fn new(
        name: impl Into<String>,
        arn: impl Into<String>,
        current_version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            arn: arn.into(),
            current_version: current_version.into(),
        }
    }
}

impl AliasRecord {
    pub fn new(name: impl Into<String>, function_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            function_version: function_version.into(),
        }
    }
}

impl VersionRecord {
    pub fn new(version: impl Into<String>, arn: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            arn: arn.into(),
        }
    }
}

/// One page of a marker-paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_marker: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_marker: None,
        }
    }

    pub fn with_marker(items: Vec<T>, next_marker: impl Into<String>) -> Self {
        Self {
            items,
            next_marker: Some(next_marker.into()),
        }
    }
}

