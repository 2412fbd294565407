use serde::{Deserialize, Serialize};

/// Execution-ordering requirements of a script or terminal block.
///
/// Stored on the wire as a JSON-object string in the block's `dependency` prop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    /// Ids of blocks that must run first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<String>,
    /// Variables that must be set first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<String>,
}

impl DependencySpec {
    /// Parse the wire string. Empty strings and `{}` mean no dependencies.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "{}" {
            return Ok(Self::default());
        }
        serde_json::from_str(raw)
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.variables.is_empty()
    }

    pub fn add_block(&mut self, block_id: impl Into<String>) {
        let block_id = block_id.into();
        if !self.blocks.contains(&block_id) {
            self.blocks.push(block_id);
        }
    }

    pub fn remove_block(&mut self, block_id: &str) {
        self.blocks.retain(|b| b != block_id);
    }

    pub fn add_variable(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.variables.contains(&name) {
            self.variables.push(name);
        }
    }

    pub fn remove_variable(&mut self, name: &str) {
        self.variables.retain(|v| v != name);
    }
}
