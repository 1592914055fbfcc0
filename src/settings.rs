use crate::submitter::OverlapPolicy;
use config::ConfigError;
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub prompt_element: String,
    pub response_element: String,
    pub overlap_policy: OverlapPolicy,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load environment variables
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let overlap_policy = match lookup("OVERLAP_POLICY") {
            Some(value) => value.parse().map_err(ConfigError::Message)?,
            None => OverlapPolicy::default(),
        };

        Ok(Settings {
            prompt_element: lookup("PROMPT_ELEMENT_ID").unwrap_or_else(|| "prompt".to_string()),
            response_element: lookup("RESPONSE_ELEMENT_ID")
                .unwrap_or_else(|| "response".to_string()),
            overlap_policy,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            prompt_element: "prompt".to_string(),
            response_element: "response".to_string(),
            overlap_policy: OverlapPolicy::default(),
        }
    }
}
