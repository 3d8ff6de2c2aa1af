//! Tool Registry

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use serde_json::Value as JsonValue;
use docfmt_core::{codes, FormatError};

use crate::context::ToolContext;
use crate::tools::{ToolMeta, ToolPlugin};

/// Central tool registry
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolPlugin>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    pub fn with_tool<T: ToolPlugin + 'static>(mut self, tool: T) -> Self {
        let name = tool.meta().name.to_lowercase();
        self.tools.insert(name, Arc::new(tool));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn ToolPlugin> {
        self.tools.get(&name.to_lowercase()).map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Metadata for every tool, sorted by name
    pub fn list(&self) -> Vec<ToolMeta> {
        let mut metas: Vec<ToolMeta> = self.tools.values().map(|t| t.meta()).collect();
        metas.sort_by_key(|m| m.name);
        metas
    }

    pub fn call_tool(&self, name: &str, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, FormatError> {
        match self.get(name) {
            Some(tool) => tool.call(args, ctx),
            None => {
                let mut err = FormatError::new(codes::UNKNOWN_TOOL, format!("Unknown tool: {}", name));
                let similar = self.find_similar(name);
                if !similar.is_empty() {
                    let suggestions: Vec<&str> = similar.iter().take(3).map(|s| s.as_str()).collect();
                    err = err.with_suggestion(format!(
                        "Similar: {}. Use tools/list for the full list.",
                        suggestions.join(", ")
                    ));
                }
                Err(err)
            }
        }
    }

    /// Tool names similar to the given name, best first
    fn find_similar(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(String, usize)> = self.tools.keys()
            .filter_map(|tool_name| {
                let score = Self::similarity_score(&name_lower, tool_name);
                (score > 0).then(|| (tool_name.clone(), score))
            })
            .collect();

        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    fn similarity_score(query: &str, candidate: &str) -> usize {
        let mut score = 0;

        if candidate.starts_with(query) {
            score += 100;
        } else if candidate.contains(query) {
            score += 50;
        } else if query.contains(candidate) {
            score += 30;
        }

        // Shared characters count for a little; unrelated names stay low
        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        let common = query_chars.intersection(&candidate_chars).count();
        if common * 2 >= candidate_chars.len() {
            score += common * 2;
        }

        let len_diff = query.len().abs_diff(candidate.len());
        if len_diff < 5 && score > 0 {
            score += 5 - len_diff;
        }

        score
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
