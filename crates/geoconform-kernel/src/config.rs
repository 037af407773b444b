//! Container configuration loaded from TOML.
//!
//! ```toml
//! max_depth = 64
//!
//! [defaults]
//! require_mandatory = true
//! enforce_forbidden = true
//! tolerance = 1e-6
//!
//! [categories.citation]
//! require_mandatory = false
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::ConfigError;
use crate::policy::Policy;

/// Default bound on nested dispatch.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Partial policy for one category. Unset fields inherit the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_mandatory: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce_forbidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

impl PolicyOverride {
    pub fn apply(&self, base: Policy) -> Policy {
        Policy {
            require_mandatory: self.require_mandatory.unwrap_or(base.require_mandatory),
            enforce_forbidden: self.enforce_forbidden.unwrap_or(base.enforce_forbidden),
            tolerance: self.tolerance.unwrap_or(base.tolerance),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerConfig {
    pub max_depth: usize,
    pub defaults: Policy,
    /// Keyed by category name (`naming`, `geometry`, …).
    pub categories: BTreeMap<String, PolicyOverride>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            defaults: Policy::strict(),
            categories: BTreeMap::new(),
        }
    }
}

impl ContainerConfig {
    /// Parses and validates a configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|source| ConfigError::Render { source })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth(self.max_depth));
        }
        check_tolerance("defaults", self.defaults.tolerance)?;
        for (name, policy) in &self.categories {
            name.parse::<Category>()
                .map_err(|_| ConfigError::UnknownCategory(name.clone()))?;
            if let Some(tolerance) = policy.tolerance {
                check_tolerance(name, tolerance)?;
            }
        }
        Ok(())
    }

    /// Effective policy of `category`.
    pub fn policy_for(&self, category: Category) -> Policy {
        self.categories
            .get(category.as_str())
            .map_or(self.defaults, |policy| policy.apply(self.defaults))
    }
}

fn check_tolerance(scope: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTolerance {
            scope: scope.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_the_default() {
        let config = ContainerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ContainerConfig::default());
        assert_eq!(config.policy_for(Category::Geometry), Policy::strict());
    }

    #[test]
    fn category_overrides_inherit_defaults() {
        let config = ContainerConfig::from_toml_str(
            r#"
max_depth = 16

[defaults]
tolerance = 1e-9

[categories.citation]
require_mandatory = false
"#,
        )
        .unwrap();
        assert_eq!(config.max_depth, 16);
        let citation = config.policy_for(Category::Citation);
        assert!(!citation.require_mandatory);
        assert!(citation.enforce_forbidden);
        assert_eq!(citation.tolerance, 1e-9);
        assert!(config.policy_for(Category::Crs).require_mandatory);
    }

    #[test]
    fn rejects_invalid_values() {
        let unknown = ContainerConfig::from_toml_str("[categories.geodesy]\ntolerance = 0.1\n");
        assert!(matches!(unknown, Err(ConfigError::UnknownCategory(name)) if name == "geodesy"));

        let negative = ContainerConfig::from_toml_str("[categories.extent]\ntolerance = -1.0\n");
        assert!(matches!(negative, Err(ConfigError::InvalidTolerance { .. })));

        let shallow = ContainerConfig::from_toml_str("max_depth = 0\n");
        assert!(matches!(shallow, Err(ConfigError::InvalidMaxDepth(0))));

        let typo = ContainerConfig::from_toml_str("[defaults]\nrequire_mandatroy = true\n");
        assert!(matches!(typo, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn renders_back_to_toml() {
        let mut config = ContainerConfig::default();
        config.categories.insert(
            "geometry".into(),
            PolicyOverride {
                tolerance: Some(1e-3),
                ..PolicyOverride::default()
            },
        );
        let text = config.to_toml_string().unwrap();
        assert_eq!(ContainerConfig::from_toml_str(&text).unwrap(), config);
    }
}
