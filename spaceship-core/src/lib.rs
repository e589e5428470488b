//! Spaceship Core Library - 3D transform and rasterization pipeline
//!
//! This library provides the display-independent part of the renderer:
//! vector and matrix algebra, the camera/object pose, projection of a mesh
//! into screen segments and line rasterization onto a character grid.

pub mod config;
pub mod geometry;
pub mod input;
pub mod projection;
pub mod raster;
pub mod state;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use config::{ControlConfig, InvalidConfig, PhysicsConfig, RenderConfig};
pub use geometry::{Face, Mesh, MeshError, MeshKind};
pub use input::{InputEvent, InputSource};
pub use projection::{Frame, FrameStats, Viewport};
pub use raster::{CellGrid, Segment, Style, Surface};
pub use state::{Control, Player, Pose};
pub use transform::Mat4x4;
pub use vector::Vec3;

/// Run the per-frame pipeline for `pose` and draw the result onto `surface`.
///
/// The surface is cleared first. Returns `None` when the surface has no
/// area, in which case nothing is drawn.
pub fn render_frame<S: Surface + ?Sized>(
    surface: &mut S,
    mesh: &Mesh,
    pose: &Pose,
    config: &RenderConfig,
    glyph: char,
) -> Option<FrameStats> {
    surface.clear();
    let (width, height) = surface.size();
    let viewport = Viewport::new(width, height)?;
    let (segments, stats) = Frame::new(pose, config, viewport).project(mesh);
    raster::draw_segments(surface, &segments, glyph);
    Some(stats)
}
