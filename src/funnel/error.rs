//! Errors raised while building a funnel.

/// A funnel definition that cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FunnelError {
    /// The stage pattern list is empty, so there is no stage 0 to seed the
    /// join chain from.
    #[error("Funnel has no stages: at least one stage pattern is required")]
    EmptyFunnel,
}

pub type FunnelResult<T> = Result<T, FunnelError>;
