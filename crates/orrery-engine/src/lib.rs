pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod picking;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Simulation, SimConfig, EngineContext, Viewport};
pub use api::types::{NodeId, UiUpdate};
pub use components::node::Node;
pub use components::mesh::{MeshComponent, Shape, Color};
pub use core::scene::SceneGraph;
pub use core::time::{FrameClock, FrameLoop};
pub use core::rng::Rng;
pub use renderer::camera::{PerspectiveCamera, CameraSettings, CameraBlock};
pub use renderer::controls::{OrbitControls, ControlSettings};
pub use renderer::instance::{NodeInstance, TransformBuffer};
pub use picking::ray::{Ray, RayHit, SphereTarget, intersect_spheres};
pub use input::queue::{InputEvent, InputQueue, PointerButton};
pub use bridge::protocol::{FrameLayout, FrameBuffer};
pub use bridge::manifest::SceneManifest;
pub use systems::render::build_transform_buffer;
pub use systems::lighting::{LightRig, PointLight, AmbientLight};
