/// Model/view/projection pipeline from mesh to screen segments
use crate::config::RenderConfig;
use crate::geometry::{Face, Mesh};
use crate::raster::{Segment, Style};
use crate::state::Pose;
use crate::transform::Mat4x4;
use crate::vector::Vec3;

/// Half-size of the guard band, in cells, that segments are clipped to
/// before rasterization
pub const MAX_SCREEN_COORD: f64 = 65_536.0;

/// Size of the character grid being drawn to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
}

impl Viewport {
    /// `None` when there is nothing to draw on
    pub fn new(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            log::trace!("Skipping frame for empty {}x{} viewport", width, height);
            return None;
        }
        Some(Self { width, height })
    }

    /// Projection aspect ratio, corrected for non-square cells
    pub fn aspect(&self, cell_aspect: f64) -> f64 {
        f64::from(self.width) / f64::from(self.height) * cell_aspect
    }

    /// Map normalized device coordinates to fractional screen coordinates;
    /// row 0 is the top
    fn to_screen(&self, ndc_x: f64, ndc_y: f64) -> (f64, f64) {
        (
            (ndc_x + 1.0) / 2.0 * f64::from(self.width),
            (1.0 - ndc_y) / 2.0 * f64::from(self.height),
        )
    }
}

/// The cell containing a screen position, rounding toward negative infinity
fn to_cell((x, y): (f64, f64)) -> (i32, i32) {
    (x.floor() as i32, y.floor() as i32)
}

/// Clip the segment `a`-`b` to the guard band (Liang-Barsky).
///
/// Returns `None` when no part of the segment lies inside the band.
fn clip_to_guard_band(a: (f64, f64), b: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
    let g = MAX_SCREEN_COORD;
    // Halved so the differences of finite endpoints cannot overflow
    let dx = b.0 * 0.5 - a.0 * 0.5;
    let dy = b.1 * 0.5 - a.1 * 0.5;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-dx, (a.0 + g) * 0.5),
        (dx, (g - a.0) * 0.5),
        (-dy, (a.1 + g) * 0.5),
        (dy, (g - a.1) * 0.5),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    let at = |t: f64| {
        if t <= 0.0 {
            a
        } else if t >= 1.0 {
            b
        } else {
            (a.0 + 2.0 * (t * dx), a.1 + 2.0 * (t * dy))
        }
    };
    Some((at(t0), at(t1)))
}

/// Primitive counts for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Primitives that passed culling and clipping
    pub drawn: usize,
    /// Triangles facing away from the camera
    pub culled: usize,
    /// Primitives rejected by the near plane or non-finite coordinates
    pub clipped: usize,
}

/// The matrices for a single frame
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub model: Mat4x4,
    pub view: Mat4x4,
    pub projection: Mat4x4,
    /// `view * model`, used for culling in camera space
    pub model_view: Mat4x4,
    /// `projection * view * model`
    pub mvp: Mat4x4,
    viewport: Viewport,
    near_epsilon: f64,
}

impl Frame {
    pub fn new(pose: &Pose, config: &RenderConfig, viewport: Viewport) -> Self {
        let model = Mat4x4::rotation_y(pose.spin) * Mat4x4::rotation_x(pose.spin);
        let view = pose.player.view_matrix();
        let projection = Mat4x4::perspective(
            config.fov,
            viewport.aspect(config.cell_aspect),
            config.near,
            config.far,
        );
        let model_view = view * model;
        Self {
            model,
            view,
            projection,
            model_view,
            mvp: projection * model_view,
            viewport,
            near_epsilon: config.near_epsilon,
        }
    }

    /// Fractional screen position of one object-space vertex, or `None` if it
    /// fails the clip test
    fn screen_point(&self, v: Vec3) -> Option<(f64, f64)> {
        let (clip, w) = self.mvp.transform_point(v);
        if !(clip.is_finite() && w.is_finite()) || w < self.near_epsilon {
            return None;
        }
        let (x, y) = self.viewport.to_screen(clip.x / w, clip.y / w);
        (x.is_finite() && y.is_finite()).then_some((x, y))
    }

    /// Project one object-space vertex to a cell, or `None` if it fails the
    /// clip test. Cells far outside the grid saturate at the `i32` range.
    pub fn project_point(&self, v: Vec3) -> Option<(i32, i32)> {
        self.screen_point(v).map(to_cell)
    }

    /// Queue the part of a projected segment that lies inside the guard band
    fn push_segment(segments: &mut Vec<Segment>, from: (f64, f64), to: (f64, f64), style: Style) {
        if let Some((from, to)) = clip_to_guard_band(from, to) {
            segments.push(Segment {
                from: to_cell(from),
                to: to_cell(to),
                style,
            });
        }
    }

    /// Whether a triangle faces away from the camera
    fn is_back_facing(&self, a: Vec3, b: Vec3, c: Vec3) -> bool {
        let (v1, _) = self.model_view.transform_point(a);
        let (v2, _) = self.model_view.transform_point(b);
        let (v3, _) = self.model_view.transform_point(c);
        let normal = (v2 - v1).cross(v3 - v1);
        // The camera sits at the origin, so v1 is also the view ray
        normal.dot(v1) >= 0.0
    }

    /// Project every face of `mesh` into screen segments
    pub fn project(&self, mesh: &Mesh) -> (Vec<Segment>, FrameStats) {
        let vertices = mesh.vertices();
        let mut segments = Vec::with_capacity(mesh.segment_count());
        let mut stats = FrameStats::default();

        for face in mesh.faces() {
            match *face {
                Face::Edge([a, b]) => {
                    match (
                        self.screen_point(vertices[a]),
                        self.screen_point(vertices[b]),
                    ) {
                        (Some(from), Some(to)) => {
                            Self::push_segment(&mut segments, from, to, Style::Edge);
                            stats.drawn += 1;
                        }
                        _ => stats.clipped += 1,
                    }
                }
                Face::Triangle([a, b, c]) => {
                    let (va, vb, vc) = (vertices[a], vertices[b], vertices[c]);
                    if self.is_back_facing(va, vb, vc) {
                        stats.culled += 1;
                        continue;
                    }
                    match (
                        self.screen_point(va),
                        self.screen_point(vb),
                        self.screen_point(vc),
                    ) {
                        (Some(p1), Some(p2), Some(p3)) => {
                            for (from, to) in [(p1, p2), (p2, p3), (p3, p1)] {
                                Self::push_segment(&mut segments, from, to, Style::Face);
                            }
                            stats.drawn += 1;
                        }
                        _ => stats.clipped += 1,
                    }
                }
            }
        }

        log::trace!(
            "Projected frame: {} drawn, {} culled, {} clipped",
            stats.drawn,
            stats.culled,
            stats.clipped
        );
        (segments, stats)
    }
}
