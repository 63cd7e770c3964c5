// Fixed logical-resolution camera for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Camera mapping the logical presentation area onto clip space
///
/// Logical space has its origin in the top-left corner with y pointing down,
/// matching tile and sprite coordinates. Fitting the logical area into the
/// window is done with a letterboxed viewport, not by this projection.
#[derive(Debug, Clone)]
pub struct Camera {
    view_proj: Mat4,
}

impl Camera {
    /// Create a camera covering `width` x `height` logical pixels
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            view_proj: Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0),
        }
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a camera
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
