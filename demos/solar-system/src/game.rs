//! Solar System: animated 3D orrery with hover tooltips and click-to-inspect.
//!
//! Simulation state lives in the body registry; scene nodes are a thin
//! presentation mapping refreshed from it after every step.

use std::f32::consts::FRAC_PI_2;
use glam::{Vec2, Vec3};
use orrery_engine::*;

use crate::bodies::{self, Catalog};
use crate::controller::InteractionController;
use crate::decor;
use crate::error::ConfigError;
use crate::orbit::{self, GlobalAnimationState};
use crate::picking::{pickable_set, PickContext};
use crate::registry::BodyRegistry;

// ── Custom event kinds from the page ─────────────────────────────────

/// a = body index, b = multiplier.
pub const CUSTOM_SET_BODY_SPEED: u32 = 1;
/// a = multiplier.
pub const CUSTOM_SET_GLOBAL_SPEED: u32 = 2;
pub const CUSTOM_TOGGLE_PLAY: u32 = 3;
pub const CUSTOM_TOGGLE_THEME: u32 = 4;
pub const CUSTOM_RESET_CAMERA: u32 = 5;

// ── Lighting ─────────────────────────────────────────────────────────

const AMBIENT_COLOR: u32 = 0x404040;
const AMBIENT_INTENSITY: f32 = 0.1;
const SUN_LIGHT_INTENSITY: f32 = 2.0;
const SUN_LIGHT_DISTANCE: f32 = 200.0;
const SHADOW_MAP_SIZE: u32 = 2048;

/// Scene nodes standing in for one registry body.
#[derive(Debug, Clone)]
struct BodyNodes {
    body: NodeId,
    halo: Option<NodeId>,
    satellites: Vec<NodeId>,
    rings: Vec<NodeId>,
}

pub struct SolarSystem {
    catalog_json: String,
    registry: Option<BodyRegistry>,
    state: GlobalAnimationState,
    controller: InteractionController,
    /// Asteroid belt rotation about Y, radians.
    belt_angle: f64,
    nodes: Vec<BodyNodes>,
    belt_node: Option<NodeId>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::with_catalog_json(bodies::CATALOG_JSON)
    }

    /// Use a different catalog (JSON, same schema as the embedded one).
    pub fn with_catalog_json(json: impl Into<String>) -> Self {
        Self {
            catalog_json: json.into(),
            registry: None,
            state: GlobalAnimationState::default(),
            controller: InteractionController::new(),
            belt_angle: 0.0,
            nodes: Vec::new(),
            belt_node: None,
        }
    }

    pub fn registry(&self) -> Option<&BodyRegistry> {
        self.registry.as_ref()
    }

    pub fn state(&self) -> &GlobalAnimationState {
        &self.state
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Node standing in for the body with the given id.
    pub fn node_of(&self, id: &str) -> Option<NodeId> {
        let index = self.registry.as_ref()?.index_of(id)?;
        self.nodes.get(index).map(|n| n.body)
    }

    fn spawn_scenery(&mut self, ctx: &mut EngineContext, rng: &mut Rng) {
        let stars = decor::starfield(rng);
        let belt = decor::asteroid_belt(rng);
        let star_count = stars.len() as u32;
        let belt_count = belt.len() as u32;
        ctx.points = stars;
        ctx.points.extend(belt);

        let id = ctx.next_id();
        ctx.scene.spawn(Node::new(id).with_tag("stars").with_mesh(MeshComponent::new(
            Shape::Points { first: 0, count: star_count, size: decor::STAR_SIZE },
            Color::WHITE,
        )));

        let id = ctx.next_id();
        ctx.scene.spawn(
            Node::new(id).with_tag("asteroid-belt").with_mesh(
                MeshComponent::new(
                    Shape::Points { first: star_count, count: belt_count, size: decor::BELT_SIZE },
                    Color::from_hex(decor::BELT_COLOR),
                )
                .with_opacity(decor::BELT_OPACITY),
            ),
        );
        self.belt_node = Some(id);
    }

    fn spawn_bodies(&mut self, ctx: &mut EngineContext, registry: &BodyRegistry) {
        for body in registry.all() {
            let look = body.appearance;
            let mut mesh = MeshComponent::sphere(body.base_radius, Color::from_hex(look.color))
                .with_emissive(look.emissive)
                .with_opacity(look.opacity);
            if look.emissive == 0.0 {
                mesh = mesh.with_shadows();
            }
            let body_id = ctx.next_id();
            ctx.scene.spawn(
                Node::new(body_id)
                    .with_tag(body.id.as_str())
                    .with_pos(body.position)
                    .with_mesh(mesh),
            );

            let halo = look.halo_radius.map(|radius| {
                let id = ctx.next_id();
                ctx.scene.spawn(
                    Node::new(id)
                        .with_tag(format!("{}-halo", body.id))
                        .with_pos(body.position)
                        .with_mesh(MeshComponent::new(
                            Shape::Halo { radius },
                            Color::from_hex(look.color),
                        )),
                )
            });

            if body.is_orbiting() {
                let id = ctx.next_id();
                ctx.scene.spawn(
                    Node::new(id)
                        .with_tag(format!("{}-orbit", body.id))
                        .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
                        .with_mesh(decor::orbit_guide(body.orbit_radius)),
                );
            }

            let satellites = body
                .satellites
                .iter()
                .map(|moon| {
                    let id = ctx.next_id();
                    ctx.scene.spawn(
                        Node::new(id)
                            .with_tag(moon.id.as_str())
                            .with_pos(moon.position)
                            .with_mesh(
                                MeshComponent::sphere(moon.base_radius, Color::from_hex(moon.color))
                                    .with_shadows(),
                            ),
                    )
                })
                .collect();

            let rings = body
                .rings
                .iter()
                .enumerate()
                .map(|(i, ring)| {
                    let id = ctx.next_id();
                    ctx.scene.spawn(
                        Node::new(id)
                            .with_tag(format!("{}-ring-{i}", body.id))
                            .with_pos(body.position)
                            .with_mesh(
                                MeshComponent::ring(
                                    ring.inner,
                                    ring.outer,
                                    Color::from_hex(ring.color),
                                )
                                .with_opacity(ring.opacity),
                            ),
                    )
                })
                .collect();

            self.nodes.push(BodyNodes { body: body_id, halo, satellites, rings });
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy registry state onto the scene nodes.
fn sync_nodes(
    registry: &BodyRegistry,
    nodes: &[BodyNodes],
    belt: Option<(NodeId, f64)>,
    scene: &mut SceneGraph,
) {
    for (body, handles) in registry.all().iter().zip(nodes) {
        if let Some(node) = scene.get_mut(handles.body) {
            node.pos = body.position;
            node.rotation = Vec3::new(0.0, body.spin_angle as f32, 0.0);
        }
        if let Some(node) = handles.halo.and_then(|id| scene.get_mut(id)) {
            node.pos = body.position;
        }
        for (moon, &id) in body.satellites.iter().zip(&handles.satellites) {
            if let Some(node) = scene.get_mut(id) {
                node.pos = moon.position;
                node.rotation = Vec3::new(0.0, moon.spin_angle as f32, 0.0);
            }
        }
        for (ring, &id) in body.rings.iter().zip(&handles.rings) {
            if let Some(node) = scene.get_mut(id) {
                node.pos = body.position;
                node.rotation = Vec3::new(FRAC_PI_2, 0.0, ring.angle as f32);
            }
        }
    }
    if let Some((id, angle)) = belt {
        if let Some(node) = scene.get_mut(id) {
            node.rotation = Vec3::new(0.0, angle as f32, 0.0);
        }
    }
}

impl Simulation for SolarSystem {
    type Error = ConfigError;

    fn config(&self) -> SimConfig {
        SimConfig {
            max_nodes: 64,
            max_points: decor::STAR_COUNT + decor::BELT_COUNT,
            ..SimConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext, rng: &mut Rng) -> Result<(), ConfigError> {
        let catalog = Catalog::from_json(&self.catalog_json)?;
        let registry = BodyRegistry::initialize(&catalog, rng)?;

        self.state = GlobalAnimationState::default();
        self.controller = InteractionController::new();
        self.belt_angle = 0.0;
        self.nodes.clear();

        ctx.lights.set_ambient(Color::from_hex(AMBIENT_COLOR), AMBIENT_INTENSITY);
        ctx.lights.add(
            PointLight::new(Vec3::ZERO, Color::WHITE, SUN_LIGHT_INTENSITY, SUN_LIGHT_DISTANCE)
                .with_shadows(SHADOW_MAP_SIZE),
        );

        self.spawn_scenery(ctx, rng);
        self.spawn_bodies(ctx, &registry);

        for update in self.controller.initial_ui(&registry, &self.state) {
            ctx.push_ui(update);
        }

        self.registry = Some(registry);
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        let Some(registry) = self.registry.as_mut() else {
            return;
        };

        // ── Handle input ─────────────────────────────────────────────
        // Picks run against the positions currently on screen.
        for event in input.iter() {
            let updates = match *event {
                InputEvent::PointerMove { x, y } => {
                    let targets = pickable_set(registry);
                    let picker = PickContext {
                        camera: &ctx.camera,
                        viewport: ctx.viewport,
                        targets: &targets,
                    };
                    self.controller.pointer_move(Vec2::new(x, y), &picker, registry)
                }
                InputEvent::Click { x, y } => {
                    let targets = pickable_set(registry);
                    let picker = PickContext {
                        camera: &ctx.camera,
                        viewport: ctx.viewport,
                        targets: &targets,
                    };
                    self.controller.click(Vec2::new(x, y), &picker, registry)
                }
                InputEvent::Custom { kind, a, b, .. } => match kind {
                    CUSTOM_SET_BODY_SPEED => {
                        if a.is_finite() && a >= 0.0 {
                            self.controller.set_body_speed(registry, a as usize, b as f64)
                        } else {
                            log::warn!("speed change for invalid body index {a}");
                            Vec::new()
                        }
                    }
                    CUSTOM_SET_GLOBAL_SPEED => {
                        self.controller.set_global_speed(&mut self.state, a as f64)
                    }
                    CUSTOM_TOGGLE_PLAY => self.controller.toggle_play(&mut self.state),
                    CUSTOM_TOGGLE_THEME => self.controller.toggle_theme(),
                    CUSTOM_RESET_CAMERA => {
                        self.controller.reset_camera(&mut ctx.controls, &mut ctx.camera);
                        Vec::new()
                    }
                    other => {
                        log::debug!("unhandled custom event kind {other}");
                        Vec::new()
                    }
                },
                _ => Vec::new(),
            };
            for update in updates {
                ctx.push_ui(update);
            }
        }

        // ── Advance orbits ───────────────────────────────────────────
        orbit::step(registry, &mut self.belt_angle, dt as f64, &mut self.state);

        let belt = self.belt_node.map(|id| (id, self.belt_angle));
        sync_nodes(registry, &self.nodes, belt, &mut ctx.scene);
    }
}
