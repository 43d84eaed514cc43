use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

use crate::common::rating_exception::{ErrCode, RatingError};

/// Key/value configuration that tracks which keys were consumed,
/// so that misspelled or unsupported keys are reported
#[derive(Debug, Default)]
pub struct ConfigWithCheck {
    conf: HashMap<String, Value>,
}

impl ConfigWithCheck {
    pub fn new(conf: HashMap<String, Value>) -> Self {
        Self { conf }
    }

    /// Take a key out of the configuration.
    /// Ok(None) when it was not given, an error when it has the wrong type
    pub fn take<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, RatingError> {
        match self.conf.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => serde_json::from_value(v.clone()).map(Some).map_err(|e| {
                RatingError::new(
                    format!("invalid value {} for {}: {}", v, key, e),
                    ErrCode::ConfigError,
                )
            }),
        }
    }

    /// Fail if any key was left unconsumed
    pub fn check(&self) -> Result<(), RatingError> {
        let mut unknown: Vec<&str> = self.conf.keys().map(String::as_str).collect();
        if unknown.is_empty() {
            return Ok(());
        }
        unknown.sort_unstable();
        Err(RatingError::new(
            format!("unknown para = {}", unknown.join(", ")),
            ErrCode::ConfigError,
        ))
    }
}
