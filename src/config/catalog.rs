use crate::adapters::{InMemoryContentDao, InMemoryTargetingGroupDao};
use crate::core::predicates::{ConstantPredicate, InversePredicate, RecognizedCustomerPredicate};
use crate::core::selection::SelectionStrategy;
use crate::core::{AdvertisementContent, TargetingGroup, TargetingPredicate};
use crate::utils::error::{AdError, Result};
use crate::utils::validation::{
    validate_click_through_rate, validate_non_empty_string, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub selection: Option<SelectionConfig>,
    #[serde(default)]
    pub content: Vec<ContentConfig>,
    #[serde(default, rename = "targeting_group")]
    pub targeting_groups: Vec<TargetingGroupConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub strategy: Option<SelectionStrategy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    pub content_id: String,
    pub marketplace_id: String,
    #[serde(default)]
    pub renderable_content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetingGroupConfig {
    pub targeting_group_id: String,
    pub content_id: String,
    pub click_through_rate: f64,
    #[serde(default)]
    pub predicates: Vec<PredicateConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PredicateConfig {
    Constant {
        value: bool,
        #[serde(default)]
        inverse: bool,
    },
    RecognizedCustomer {
        #[serde(default)]
        inverse: bool,
    },
}

impl PredicateConfig {
    pub fn build(&self) -> Arc<dyn TargetingPredicate> {
        match *self {
            PredicateConfig::Constant { value, inverse } => {
                with_inverse(ConstantPredicate::new(value.into()), inverse)
            }
            PredicateConfig::RecognizedCustomer { inverse } => {
                with_inverse(RecognizedCustomerPredicate, inverse)
            }
        }
    }
}

fn with_inverse<P: TargetingPredicate + 'static>(
    predicate: P,
    inverse: bool,
) -> Arc<dyn TargetingPredicate> {
    if inverse {
        Arc::new(InversePredicate::new(predicate))
    } else {
        Arc::new(predicate)
    }
}

impl CatalogConfig {
    /// 從 TOML 檔案載入廣告目錄
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析廣告目錄
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${AD_BANNER_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut known_content_ids = HashSet::new();

        for (index, content) in self.content.iter().enumerate() {
            validate_non_empty_string(
                &format!("content[{}].content_id", index),
                &content.content_id,
            )?;
            validate_non_empty_string(
                &format!("content[{}].marketplace_id", index),
                &content.marketplace_id,
            )?;

            // content id 在同一個 marketplace 內必須唯一
            if !seen.insert((content.marketplace_id.as_str(), content.content_id.as_str())) {
                return Err(AdError::InvalidConfigValueError {
                    field: format!("content[{}].content_id", index),
                    value: content.content_id.clone(),
                    reason: format!(
                        "Duplicate content id in marketplace {}",
                        content.marketplace_id
                    ),
                });
            }
            known_content_ids.insert(content.content_id.as_str());
        }

        for (index, group) in self.targeting_groups.iter().enumerate() {
            validate_non_empty_string(
                &format!("targeting_group[{}].targeting_group_id", index),
                &group.targeting_group_id,
            )?;
            validate_click_through_rate(
                &format!("targeting_group[{}].click_through_rate", index),
                group.click_through_rate,
            )?;

            if !known_content_ids.contains(group.content_id.as_str()) {
                return Err(AdError::InvalidConfigValueError {
                    field: format!("targeting_group[{}].content_id", index),
                    value: group.content_id.clone(),
                    reason: "Targeting group refers to unknown content".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn strategy(&self) -> Option<SelectionStrategy> {
        self.selection.as_ref().and_then(|s| s.strategy)
    }

    pub fn content_dao(&self) -> InMemoryContentDao {
        self.content
            .iter()
            .map(|c| {
                AdvertisementContent::new(
                    c.content_id.clone(),
                    c.marketplace_id.clone(),
                    c.renderable_content.clone(),
                )
            })
            .collect()
    }

    pub fn targeting_group_dao(&self) -> InMemoryTargetingGroupDao {
        self.targeting_groups
            .iter()
            .map(|g| TargetingGroup {
                targeting_group_id: g.targeting_group_id.clone(),
                content_id: g.content_id.clone(),
                click_through_rate: g.click_through_rate,
                targeting_predicates: g.predicates.iter().map(PredicateConfig::build).collect(),
            })
            .collect()
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
