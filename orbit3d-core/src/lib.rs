/// orbit3d Core Library - Point-cloud projection and orbit logic
///
/// This library holds everything that does not touch a real display: the
/// perspective-scaling projection, the three-axis rotation of a body's
/// vertices, the orbital path, mesh edges and the per-frame scene step.
/// Drawing goes through the [`Canvas`] trait so any surface can host it.

pub mod canvas;
pub mod geometry;
pub mod mesh;
pub mod orbit;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use canvas::{Canvas, UiEvent};
pub use geometry::{Point3D, PointRole, ProjectedPoint, Rgb, ScreenRect};
pub use orbit::{orbit_position, BodyId, OrbitBody, Vertex};
pub use projection::{project, Screen};
pub use scene::{FrameStats, LoopState, Scene};
pub use transform::{RotationState, Transform};
