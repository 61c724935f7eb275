/// Orbit body: the moving center of mass and the vertices riding on it
use log::{debug, info};
use nalgebra::Point2;

use crate::canvas::Canvas;
use crate::geometry::{Point3D, PointRole, ProjectedPoint, Rgb, BLUE, GREEN, ORANGE, PURPLE, RED, YELLOW};
use crate::mesh;
use crate::projection::{project, Screen};
use crate::transform::{RotationState, Transform};

pub const BODY_BASE_RADIUS: f64 = 16.0;
pub const VERTEX_BASE_RADIUS: f64 = 16.0;
pub const BODY_COLOR: Rgb = RED;

/// Half the edge length of the seeded cube
pub const CUBE_HALF_EDGE: f64 = 64.0;

/// Depth offset given to vertices placed by a click
pub const CLICK_DEPTH_OFFSET: f64 = -64.0;
pub const CLICK_VERTEX_COLOR: Rgb = ORANGE;

/// Cube corners as unit signs, in seeding order, with their colors
const CUBE_CORNERS: [([f64; 3], Rgb); 8] = [
    ([1.0, 1.0, 1.0], GREEN),
    ([-1.0, -1.0, 1.0], GREEN),
    ([1.0, -1.0, 1.0], BLUE),
    ([-1.0, 1.0, 1.0], BLUE),
    ([1.0, 1.0, -1.0], PURPLE),
    ([-1.0, -1.0, -1.0], PURPLE),
    ([1.0, -1.0, -1.0], YELLOW),
    ([-1.0, 1.0, -1.0], YELLOW),
];

/// Identity of the body a vertex hangs from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// Position on the closed orbital path at wall-clock time `t` (seconds).
///
/// x and z move together around the screen center while y bobs with a
/// smaller amplitude.
pub fn orbit_position(t: f64, screen: &Screen) -> Point3D {
    let (sin_t, cos_t) = t.sin_cos();
    Point3D::new(
        screen.width / 2.0 + cos_t * screen.width / 4.0,
        screen.height / 2.0 + sin_t * screen.height / 6.0,
        screen.width / 2.0 + cos_t * screen.width / 4.0,
    )
}

/// Factor applied to rotated offsets so the vertex cloud shrinks with the
/// body's depth.
///
/// This is an approximation: offsets are scaled like radii instead of going
/// through a perspective divide, so the cloud is not a faithful 3D shape.
fn offset_scale(body_z: f64, screen: &Screen) -> f64 {
    if body_z != 0.0 {
        screen.focal_length() / body_z
    } else {
        1.0
    }
}

/// A point rigidly attached to a body through a fixed local offset
#[derive(Debug, Clone)]
pub struct Vertex {
    pub point: ProjectedPoint,
    local_offset: Point3D,
    parent: BodyId,
}

impl Vertex {
    /// Offset from the parent in the parent's unrotated frame
    pub fn local_offset(&self) -> Point3D {
        self.local_offset
    }

    pub fn parent(&self) -> BodyId {
        self.parent
    }
}

/// The center of mass. It owns its vertices and is the only thing that moves
/// them.
#[derive(Debug, Clone)]
pub struct OrbitBody {
    id: BodyId,
    pub point: ProjectedPoint,
    rotation: RotationState,
    children: Vec<Vertex>,
    screen: Screen,
}

impl OrbitBody {
    pub fn new(id: BodyId, position: Point3D, screen: Screen) -> Self {
        let mut point = ProjectedPoint::new(position, BODY_BASE_RADIUS, BODY_COLOR, PointRole::Body);
        project(&mut point, &screen);
        Self {
            id,
            point,
            rotation: RotationState::zero(),
            children: Vec::new(),
            screen,
        }
    }

    /// Body at the screen center, one focal length deep, carrying a cube
    pub fn with_cube(id: BodyId, screen: Screen) -> Self {
        let center = screen.center();
        let start = Point3D::new(center.x, center.y, screen.focal_length());
        let mut body = Self::new(id, start, screen);
        for (signs, color) in CUBE_CORNERS {
            let offset = Point3D::from(signs) * CUBE_HALF_EDGE;
            body.add_vertex(offset, color);
        }
        body
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn children(&self) -> &[Vertex] {
        &self.children
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The body followed by its vertices, in insertion order
    pub fn points(&self) -> impl Iterator<Item = &ProjectedPoint> {
        std::iter::once(&self.point).chain(self.children.iter().map(|v| &v.point))
    }

    /// Attach a vertex. It starts at `position + offset` until the next
    /// rotate places it properly.
    pub fn add_vertex(&mut self, local_offset: Point3D, color: Rgb) -> &Vertex {
        let mut point = ProjectedPoint::new(
            self.point.position + local_offset,
            VERTEX_BASE_RADIUS,
            color,
            PointRole::Vertex,
        );
        project(&mut point, &self.screen);

        let index = self.children.len();
        self.children.push(Vertex {
            point,
            local_offset,
            parent: self.id,
        });
        &self.children[index]
    }

    /// Attach a vertex under a clicked screen position, pushed back by
    /// [`CLICK_DEPTH_OFFSET`]
    pub fn add_click_vertex(&mut self, click: Point2<f64>) -> &Vertex {
        let offset = Point3D::new(
            click.x - self.point.position.x,
            click.y - self.point.position.y,
            CLICK_DEPTH_OFFSET,
        );
        info!(
            "vertex {} added at ({:.0}, {:.0}), offset ({:.1}, {:.1}, {:.1})",
            self.children.len(),
            click.x,
            click.y,
            offset.x,
            offset.y,
            offset.z
        );
        self.add_vertex(offset, CLICK_VERTEX_COLOR)
    }

    /// Place every vertex from the current angle, then advance the angle
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        let scale = offset_scale(self.point.position.z, &self.screen);
        for vertex in &mut self.children {
            let rotated = Transform::rotate_offset(&vertex.local_offset, &self.rotation);
            vertex.point.position = self.point.position + rotated * scale;
        }
        self.rotation.rotate(dx, dy, dz);
    }

    /// Recompute projection of the body and all of its vertices
    pub fn refresh(&mut self) {
        project(&mut self.point, &self.screen);
        for vertex in &mut self.children {
            project(&mut vertex.point, &self.screen);
        }
    }

    /// Move the body to its place on the orbit at time `t`. Vertices follow on
    /// the next [`OrbitBody::rotate`].
    pub fn advance_to(&mut self, t: f64) {
        self.point.position = orbit_position(t, &self.screen);
    }

    /// Reproject the body and its vertices, then draw the mesh.
    ///
    /// Returns the number of edges drawn.
    pub fn update<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> usize {
        self.refresh();
        let edges = mesh::draw_mesh(&self.children, canvas);
        debug!(
            "body {:?} at ({:.1}, {:.1}, {:.1}), {} edges",
            self.id, self.point.position.x, self.point.position.y, self.point.position.z, edges
        );
        edges
    }
}
