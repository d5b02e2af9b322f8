//! HUD error types

use halo_core::ContextError;
use thiserror::Error;

use crate::id::HudId;

#[derive(Debug, Error)]
pub enum HudError {
    /// `try_show` was given an id that is already on the stack
    #[error("an overlay with id `{0}` is already presented")]
    DuplicateId(HudId),

    #[error("invalid HUD configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Context(#[from] ContextError),
}

pub type Result<T> = std::result::Result<T, HudError>;
