//! Tunable encoding parameters and their defaults.
//!
//! Grounded on `storage-proofs-core`'s settings module: a `lazy_static`
//! value loaded once via the `config` crate, merging an optional TOML file
//! with environment overrides. Here the environment prefix is
//! `WINPOREP_` (`WINPOREP_WINDOW_SIZE`, `WINPOREP_DRG_PARENTS`,
//! `WINPOREP_DRG_STAGGER`) in place of the teacher's `FIL_PROOFS_` prefix.

use config::{Config, ConfigError, Environment, File};
use lazy_static::lazy_static;
use serde::Deserialize;
use std::sync::Mutex;

use crate::error::{Error, Result};

pub const DEFAULT_WINDOW_SIZE: usize = 1 << 14;
pub const DEFAULT_DRG_PARENTS: usize = 2;
pub const DEFAULT_DRG_STAGGER: usize = 2;

/// The three parameters that govern window layout and DRG shape
/// (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Params {
    pub window_size: usize,
    pub drg_parents: usize,
    pub drg_stagger: usize,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            window_size: DEFAULT_WINDOW_SIZE,
            drg_parents: DEFAULT_DRG_PARENTS,
            drg_stagger: DEFAULT_DRG_STAGGER,
        }
    }
}

impl Params {
    /// Rejects parameter combinations that would make the scheduler or the
    /// DRG ill-defined (a zero-sized window, a DRG with no parents).
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Error::DomainAssertion("window_size must be > 0".into()));
        }
        if self.drg_parents == 0 {
            return Err(Error::DomainAssertion("drg_parents must be > 0".into()));
        }
        if self.drg_stagger == 0 {
            return Err(Error::DomainAssertion("drg_stagger must be > 0".into()));
        }
        Ok(())
    }
}

lazy_static! {
    /// Process-wide defaults, loaded once from `winporep.config.toml` (if
    /// present in the working directory) and environment overrides. The
    /// CLI reads this to seed its flag defaults; callers embedding
    /// `winporep-porep` directly can ignore it entirely and pass their own
    /// `Params`.
    pub static ref SETTINGS: Mutex<Params> =
        Mutex::new(load_settings().unwrap_or_default());
}

fn load_settings() -> std::result::Result<Params, ConfigError> {
    let mut s = Config::new();
    s.merge(File::with_name("winporep.config").required(false))?;
    s.merge(Environment::with_prefix("WINPOREP"))?;
    s.try_into()
}
