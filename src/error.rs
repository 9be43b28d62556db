//! Error types for the shapes viewer.

use thiserror::Error;

/// Errors raised while bringing up the window, GPU context and pipelines.
#[derive(Error, Debug)]
pub enum Error {
    /// The winit event loop could not be created or failed while running
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The OS refused to create the window
    #[error("window error: {0}")]
    Window(#[from] winit::error::OsError),

    /// The window could not be turned into a render surface
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No adapter is compatible with the render surface
    #[error("adapter error: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    /// The adapter refused to hand out a device
    #[error("device error: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// The surface reports no usable texture formats
    #[error("surface is not supported by the selected adapter")]
    UnsupportedSurface,

    /// A pipeline names a shader that was never loaded
    #[error("pipeline `{pipeline}` uses unknown shader `{shader}`")]
    MissingShader { pipeline: String, shader: String },
}

/// Errors raised when parsing a free-form color value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("color value is empty")]
    Empty,

    #[error("unknown color name `{0}`")]
    UnknownName(String),

    #[error("invalid hex color `{0}`")]
    InvalidHex(String),

    #[error("invalid rgb() color `{0}`")]
    InvalidRgb(String),
}

/// Result type alias using the crate's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
