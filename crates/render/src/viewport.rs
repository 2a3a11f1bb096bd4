use crate::camera::PerspectiveCamera;
use cubelab_common::ViewportSize;

/// Upper bound applied to the device pixel ratio.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Size of the drawing surface in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Tracks the window size and derives camera aspect and surface size from it.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    size: ViewportSize,
    pixel_ratio: f32,
}

impl Viewport {
    pub fn new(size: ViewportSize, device_pixel_ratio: f32) -> Self {
        Self {
            size,
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio),
        }
    }

    /// Handle a resize: store the new logical size, update the camera aspect
    /// and projection, reclamp the pixel ratio. Returns the new surface size.
    pub fn resize(
        &mut self,
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
        camera: &mut PerspectiveCamera,
    ) -> SurfaceSize {
        self.size = ViewportSize::new(width, height);
        camera.aspect = self.size.aspect();
        camera.update_projection_matrix();
        self.pixel_ratio = clamp_pixel_ratio(device_pixel_ratio);
        tracing::debug!(
            "viewport resized to {width}x{height} @ {:.2}",
            self.pixel_ratio
        );
        self.surface_size()
    }

    pub fn size(&self) -> ViewportSize {
        self.size
    }

    /// Effective pixel ratio (device ratio clamped to [`MAX_PIXEL_RATIO`]).
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize {
            width: ((self.size.width * self.pixel_ratio).floor() as u32).max(1),
            height: ((self.size.height * self.pixel_ratio).floor() as u32).max(1),
        }
    }
}

fn clamp_pixel_ratio(device_pixel_ratio: f32) -> f32 {
    device_pixel_ratio.min(MAX_PIXEL_RATIO)
}
