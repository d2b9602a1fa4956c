use thiserror::Error;

#[derive(Debug, Error)]
pub enum TwitterError {
    /// The invoked enrichment path is not implemented. This is a
    /// programming error in the caller, not a runtime condition.
    #[error("not implemented: {0}")]
    Unimplemented(&'static str),
}
