//! Errors raised while bringing up the window and GPU.
//!
//! The sketch itself cannot fail; only acquiring the platform resources it
//! draws with can.

use std::fmt;

#[derive(Debug)]
pub enum GpuError {
    /// The windowing system refused to create a window.
    WindowCreation(winit::error::OsError),
    /// Failed to create a surface for the window.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the window surface.
    NoAdapter,
    /// Failed to create the GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The adapter cannot configure the surface.
    UnsupportedSurface,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::WindowCreation(e) => write!(f, "Failed to create window: {}", e),
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(
                f,
                "No compatible GPU adapter found. Ensure your system has a GPU with Vulkan/Metal/DX12 support."
            ),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::UnsupportedSurface => write!(f, "Surface not supported by adapter"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::WindowCreation(e) => Some(e),
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter | GpuError::UnsupportedSurface => None,
        }
    }
}

impl From<winit::error::OsError> for GpuError {
    fn from(e: winit::error::OsError) -> Self {
        GpuError::WindowCreation(e)
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_messages() {
        assert!(GpuError::NoAdapter.to_string().contains("No compatible GPU adapter"));
        assert_eq!(
            GpuError::UnsupportedSurface.to_string(),
            "Surface not supported by adapter"
        );
        assert!(GpuError::NoAdapter.source().is_none());
    }
}
