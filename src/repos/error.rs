/**
 * Responsibility
 * - What a repo tells the layer above when a write cannot be applied
 */
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoError {
    #[error("conflict: {0}")]
    Conflict(&'static str),
}

pub type RepoResult<T> = Result<T, RepoError>;
