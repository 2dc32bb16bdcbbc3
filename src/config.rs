use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path, str::FromStr};

use crate::{analyzer::core::Mode, Error, InternalResult};

/// Engine settings attached to a grammar at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cache rule results per (rule, offset, mode) within one input
    #[serde(default = "default_true")]
    pub memoize: bool,

    /// Mode used by [`Grammar::recognize`](crate::Grammar::recognize)
    #[serde(default)]
    pub default_mode: Mode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            memoize: default_true(),
            default_mode: Mode::default(),
        }
    }
}

impl EngineConfig {
    /// Reads the settings from a JSON file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> InternalResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::Config(format!("cannot open engine config {}: {}", path.display(), e))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            Error::Config(format!("invalid engine config {}: {}", path.display(), e))
        })
    }
}

impl FromStr for EngineConfig {
    type Err = Error;

    fn from_str(json: &str) -> InternalResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("invalid engine config: {}", e)))
    }
}

fn default_true() -> bool {
    true
}
