//! Mapping request accumulator

/// Indices and types to fetch mappings for.
///
/// Built fresh for each run; names are deduplicated and keep the order they
/// were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingRequest {
    indices: Vec<String>,
    types: Vec<String>,
}

impl MappingRequest {
    /// Create an empty request (all indices, all types)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an index
    pub fn add_index(&mut self, index: impl Into<String>) {
        let index = index.into();
        if !self.indices.contains(&index) {
            self.indices.push(index);
        }
    }

    /// Add a mapping type
    pub fn add_type(&mut self, type_name: impl Into<String>) {
        let type_name = type_name.into();
        if !self.types.contains(&type_name) {
            self.types.push(type_name);
        }
    }

    /// Add an index (builder style)
    #[must_use]
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.add_index(index);
        self
    }

    /// Add a mapping type (builder style)
    #[must_use]
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.add_type(type_name);
        self
    }

    /// Forget all indices and types
    pub fn clear(&mut self) {
        self.indices.clear();
        self.types.clear();
    }

    /// Requested indices
    pub fn indices(&self) -> &[String] {
        &self.indices
    }

    /// Requested types
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Get-mapping endpoint path for this request
    pub fn endpoint(&self) -> String {
        let indices = self.indices.join(",");
        let types = self.types.join(",");

        match (self.indices.is_empty(), self.types.is_empty()) {
            (true, true) => "/_mapping".to_string(),
            (false, true) => format!("/{indices}/_mapping"),
            (true, false) => format!("/_all/_mapping/{types}"),
            (false, false) => format!("/{indices}/_mapping/{types}"),
        }
    }
}
