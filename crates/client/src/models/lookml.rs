//! LookML model and explore models.

use serde::{Deserialize, Serialize};

/// Explore summary as listed on a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookmlModelNavExplore {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

/// A LookML model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookmlModel {
    pub name: String,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub explores: Vec<LookmlModelNavExplore>,
}

/// A dimension or measure of an explore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookmlModelExploreField {
    /// Fully qualified `view.field` name.
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub view: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookmlModelExploreFieldset {
    #[serde(default)]
    pub dimensions: Vec<LookmlModelExploreField>,
    #[serde(default)]
    pub measures: Vec<LookmlModelExploreField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookmlModelExploreJoin {
    pub name: String,
}

/// Full explore definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookmlModelExplore {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub model_name: String,
    /// View the explore is built on; defaults to the explore name.
    #[serde(default)]
    pub view_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub fields: LookmlModelExploreFieldset,
    #[serde(default)]
    pub joins: Vec<LookmlModelExploreJoin>,
}

impl LookmlModelExplore {
    pub fn base_view(&self) -> &str {
        self.view_name.as_deref().unwrap_or(&self.name)
    }

    /// Names of visible dimensions and measures, sorted and deduplicated.
    pub fn visible_field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .fields
            .dimensions
            .iter()
            .chain(self.fields.measures.iter())
            .filter(|f| !f.hidden)
            .map(|f| f.name.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
