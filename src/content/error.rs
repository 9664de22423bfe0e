use thiserror::Error;

use super::bosses::BossKind;
use super::levels::LevelId;
use super::powers::PowerKind;

/// Lookup failures against the content tables.
///
/// These never crash the frame loop: callers log them and skip the action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("unknown power id `{0}`")]
    UnknownPower(String),
    #[error("power {0:?} is not in the power catalog")]
    MissingPower(PowerKind),
    #[error("boss {0:?} is not in the boss catalog")]
    MissingBoss(BossKind),
    #[error("level {0} is not defined")]
    UnknownLevel(LevelId),
    #[error("level {0} has no end platform")]
    NoEndPlatform(LevelId),
}
