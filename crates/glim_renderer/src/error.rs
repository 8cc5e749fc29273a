use thiserror::Error;

/// Fatal precondition violations reported by [`crate::RenderEngine`].
///
/// These are programmer errors in how the engine is driven, not runtime
/// render failures, so they are checked up front before any worker thread
/// is spawned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("render engine was not initialized before execute")]
    NotInitialized,
    #[error("scene has no camera")]
    MissingCamera,
    #[error("scene has no hittables")]
    EmptyScene,
}
