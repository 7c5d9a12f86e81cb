//! Optional `nook.toml` configuration.
//!
//! Only two knobs exist: the REPL prompt string and whether to print the
//! parsed AST instead of evaluating it. Anything not present in the
//! file, or no file at all, falls back to [`Config::default`].

use std::path::Path;

use serde::Deserialize;

use crate::error::NookError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub prompt: String,
    pub print_ast: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: ">> ".to_string(),
            print_ast: false,
        }
    }
}

impl Config {
    /// Loads configuration from `path` if given, otherwise from
    /// `./nook.toml` if it exists. A missing default file is not an
    /// error; a missing explicit `--config` path, or a file that fails
    /// to parse, is.
    pub fn load(explicit_path: Option<&Path>) -> Result<Config, NookError> {
        let path = match explicit_path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = Path::new("nook.toml");
                if !default_path.exists() {
                    return Ok(Config::default());
                }
                default_path.to_path_buf()
            }
        };

        let contents = std::fs::read_to_string(&path)?;
        toml::from_str(&contents)
            .map_err(|err| NookError::Config(format!("{}: {err}", path.display())))
    }
}
