//! Interaction controller: hover tooltip, click selection and user parameter
//! changes, expressed as DOM updates for the host page.

use glam::Vec2;
use orrery_engine::{OrbitControls, PerspectiveCamera, UiUpdate};

use crate::orbit::GlobalAnimationState;
use crate::picking::PickContext;
use crate::registry::{BodyRegistry, CelestialBody};

// ── DOM element ids ──────────────────────────────────────────────────

pub const INFO_PANEL: &str = "selected-planet";
pub const PLAY_PAUSE: &str = "play-pause";
pub const THEME_TOGGLE: &str = "theme-toggle";
pub const GLOBAL_SPEED_VALUE: &str = "global-speed-value";
pub const LIGHT_THEME_CLASS: &str = "light-theme";

// ── Slider ranges ────────────────────────────────────────────────────

pub const BODY_SPEED_MIN: f64 = 0.1;
pub const BODY_SPEED_MAX: f64 = 3.0;
pub const GLOBAL_SPEED_MIN: f64 = 0.0;
pub const GLOBAL_SPEED_MAX: f64 = 5.0;
pub const SPEED_STEP: f64 = 0.1;

const TOOLTIP_OFFSET: Vec2 = Vec2::new(10.0, -30.0);

/// Readout element for one body's speed slider.
pub fn speed_readout_id(body_id: &str) -> String {
    format!("speed-value:{body_id}")
}

/// `1.0x` style readout.
pub fn format_speed(value: f64) -> String {
    format!("{value:.1}x")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverState {
    Idle,
    Showing(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    None,
    Selected(usize),
}

pub struct InteractionController {
    hover: HoverState,
    selection: SelectionState,
    dark_theme: bool,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            hover: HoverState::Idle,
            selection: SelectionState::None,
            dark_theme: true,
        }
    }

    pub fn hover(&self) -> HoverState {
        self.hover
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn is_dark_theme(&self) -> bool {
        self.dark_theme
    }

    /// Initial page state: one speed slider per orbiting body plus labels.
    pub fn initial_ui(
        &self,
        registry: &BodyRegistry,
        state: &GlobalAnimationState,
    ) -> Vec<UiUpdate> {
        let mut out: Vec<UiUpdate> = registry
            .all()
            .iter()
            .enumerate()
            .filter(|(_, body)| body.is_orbiting())
            .map(|(index, body)| UiUpdate::AddSpeedSlider {
                index: index as u32,
                id: body.id.clone(),
                label: format!("{} Speed", body.description.name),
                min: BODY_SPEED_MIN as f32,
                max: BODY_SPEED_MAX as f32,
                step: SPEED_STEP as f32,
                value: body.speed_multiplier as f32,
                readout: format_speed(body.speed_multiplier),
            })
            .collect();
        out.push(play_pause_label(state.is_animating));
        out.push(UiUpdate::text(GLOBAL_SPEED_VALUE, format_speed(state.global_speed_multiplier)));
        out.extend(self.theme_updates());
        out
    }

    /// Pointer moved: show the tooltip at the pointer or hide it.
    /// Emitted on every move so the tooltip follows the pointer.
    pub fn pointer_move(
        &mut self,
        client: Vec2,
        picker: &PickContext,
        registry: &BodyRegistry,
    ) -> Vec<UiUpdate> {
        let hit = picker.pick(client).and_then(|i| registry.get(i).map(|b| (i, b)));
        match hit {
            Some((index, body)) => {
                if self.hover != HoverState::Showing(index) {
                    log::debug!("hover {}", body.id);
                }
                self.hover = HoverState::Showing(index);
                let anchor = client + TOOLTIP_OFFSET;
                vec![
                    UiUpdate::ShowTooltip {
                        text: body.description.name.clone(),
                        left: anchor.x,
                        top: anchor.y,
                    },
                    UiUpdate::cursor("pointer"),
                ]
            }
            None => {
                self.hover = HoverState::Idle;
                vec![UiUpdate::HideTooltip, UiUpdate::cursor("default")]
            }
        }
    }

    /// Click: select the body under the pointer. Empty space keeps the
    /// current selection.
    pub fn click(
        &mut self,
        client: Vec2,
        picker: &PickContext,
        registry: &BodyRegistry,
    ) -> Vec<UiUpdate> {
        let Some(index) = picker.pick(client) else {
            return Vec::new();
        };
        let Some(body) = registry.get(index) else {
            return Vec::new();
        };
        log::debug!("selected {}", body.id);
        self.selection = SelectionState::Selected(index);
        vec![UiUpdate::html(INFO_PANEL, info_html(body))]
    }

    /// Per-body speed slider. Non-finite input is ignored.
    pub fn set_body_speed(
        &mut self,
        registry: &mut BodyRegistry,
        index: usize,
        value: f64,
    ) -> Vec<UiUpdate> {
        if !value.is_finite() {
            log::warn!("ignoring non-finite speed {value} for body {index}");
            return Vec::new();
        }
        let Some(stored) = registry.set_speed_multiplier(index, value) else {
            log::warn!("speed change for unknown body index {index}");
            return Vec::new();
        };
        let id = &registry.all()[index].id;
        log::debug!("{id} speed multiplier = {stored}");
        vec![UiUpdate::text(speed_readout_id(id), format_speed(stored))]
    }

    /// Global speed slider, clamped to the slider range. Non-finite input is
    /// ignored.
    pub fn set_global_speed(
        &mut self,
        state: &mut GlobalAnimationState,
        value: f64,
    ) -> Vec<UiUpdate> {
        if !value.is_finite() {
            log::warn!("ignoring non-finite global speed {value}");
            return Vec::new();
        }
        let stored = state.set_global_speed(value.clamp(GLOBAL_SPEED_MIN, GLOBAL_SPEED_MAX));
        log::debug!("global speed multiplier = {stored}");
        vec![UiUpdate::text(GLOBAL_SPEED_VALUE, format_speed(stored))]
    }

    pub fn toggle_play(&mut self, state: &mut GlobalAnimationState) -> Vec<UiUpdate> {
        let playing = state.toggle_animating();
        log::debug!("animation {}", if playing { "resumed" } else { "paused" });
        vec![play_pause_label(playing)]
    }

    /// Presentation only; simulation state is untouched.
    pub fn toggle_theme(&mut self) -> Vec<UiUpdate> {
        self.dark_theme = !self.dark_theme;
        self.theme_updates()
    }

    /// Back to the initial view with no leftover glide. Bodies are untouched.
    pub fn reset_camera(&mut self, controls: &mut OrbitControls, camera: &mut PerspectiveCamera) {
        controls.reset(camera);
        log::debug!("camera reset");
    }

    fn theme_updates(&self) -> Vec<UiUpdate> {
        let label = if self.dark_theme { "🌙 Dark Mode" } else { "🌞 Light Mode" };
        vec![
            UiUpdate::SetBodyClass {
                class: LIGHT_THEME_CLASS.to_string(),
                enabled: !self.dark_theme,
            },
            UiUpdate::text(THEME_TOGGLE, label),
        ]
    }
}

fn play_pause_label(playing: bool) -> UiUpdate {
    UiUpdate::text(PLAY_PAUSE, if playing { "Pause" } else { "Play" })
}

/// Escape text for HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Info panel markup for one body.
pub fn info_html(body: &CelestialBody) -> String {
    let mut facts: Vec<(String, String)> = Vec::new();
    if body.is_orbiting() {
        facts.push(("Distance from Sun".into(), format!("{} AU (scaled)", body.orbit_radius)));
        facts.push(("Orbital Speed".into(), format!("{} km/s (scaled)", body.base_angular_speed)));
    }
    facts.extend(body.description.facts.iter().map(|f| (f.label.clone(), f.value.clone())));

    let mut html = format!(
        "<h4>{}</h4><p>{}</p>",
        escape_html(&body.description.name),
        escape_html(&body.description.summary)
    );
    for (label, value) in facts {
        html.push_str(&format!(
            "<p><strong>{}:</strong> {}</p>",
            escape_html(&label),
            escape_html(&value)
        ));
    }
    html
}
