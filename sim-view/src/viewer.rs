//! Interactive 3D diffusion-limited aggregation viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the aggregation engine and
//! the list of placed cubes, and implements [`eframe::App`] to drive the
//! engine once per frame and draw the growing aggregate.

use dla_core::{Engine, error::Result};
use eframe::App;
use glam::{IVec3, Quat, Vec3};
use log::{error, info};

/// Lattice sizes offered by the size selector.
const SIZE_CHOICES: &[u32] = &[11, 21, 31, 41, 51, 61, 81];

/// Viewer tuning that is not part of the simulation itself.
///
/// ### Fields
/// - `default_size` - Lattice size used at start-up.
/// - `settle_delay` - Seconds to wait between stopping the loop and
///   rebuilding the engine on reset.
/// - `spin_speed` - Rotation of the aggregate about the vertical axis,
///   in radians per second.
/// - `default_zoom` - Pixels per lattice cell at start-up.
#[derive(Clone, Copy, Debug)]
pub struct ViewConfig {
    pub default_size: u32,
    pub settle_delay: f64,
    pub spin_speed: f32,
    pub default_zoom: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_size: 41,
            settle_delay: 0.2,
            spin_speed: 0.5,
            default_zoom: 8.0,
        }
    }
}

/// Main application state for the interactive viewer.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions / input.
/// 2. Finish a pending reset once its settling delay has passed.
/// 3. If `running` is `true`, call [`Viewer::step_once`] and advance the spin.
/// 4. Render the cubes back to front.
///
/// ### Fields
/// - `engine` - The aggregation engine being driven.
/// - `cubes` - Centered positions of every visible cube, seeds included.
/// - `view` - Viewer tuning.
///
/// - `selected_size` - Size chosen in the selector; only read on reset.
/// - `running` - Whether the engine is stepped every frame.
/// - `pending_reset` - Time stamp (egui time) at which a requested reset
///   rebuilds the engine.
///
/// - `yaw`, `pitch` - Orbit angles set by dragging.
/// - `spin` - Accumulated automatic rotation about the vertical axis.
/// - `zoom` - Pixels per lattice cell.
pub struct Viewer {
    engine: Engine,
    cubes: Vec<IVec3>,
    view: ViewConfig,

    selected_size: u32,
    running: bool,
    pending_reset: Option<f64>,

    yaw: f32,
    pitch: f32,
    spin: f32,
    zoom: f32,
}

impl Viewer {
    /// Creates a viewer with the default [`ViewConfig`], an engine of the
    /// default size and a single seed at the origin. The loop starts running.
    pub fn new() -> Result<Self> {
        Self::with_view(ViewConfig::default())
    }

    pub fn with_view(view: ViewConfig) -> Result<Self> {
        let engine = Engine::new(view.default_size)?;
        let mut viewer = Self {
            engine,
            cubes: Vec::new(),
            view,
            selected_size: view.default_size,
            running: true,
            pending_reset: None,
            yaw: 0.3,
            pitch: 0.3,
            spin: 0.0,
            zoom: view.default_zoom,
        };
        viewer.place_seed(IVec3::ZERO)?;
        Ok(viewer)
    }

    /// Marks a seed cell in the engine and shows a cube for it.
    fn place_seed(&mut self, pos: IVec3) -> Result<()> {
        self.engine.mark_occupied(pos)?;
        self.cubes.push(pos);
        Ok(())
    }

    /// Advances the engine by one call and shows the frozen cube, if any.
    fn step_once(&mut self) {
        if let Some(raw) = self.engine.step() {
            self.cubes.push(self.engine.to_centered(raw));
        }
    }

    /// Stops the loop and schedules a rebuild `settle_delay` seconds after `now`.
    fn request_reset(&mut self, now: f64) {
        self.running = false;
        self.pending_reset = Some(now + self.view.settle_delay);
    }

    /// Completes a pending reset whose deadline has passed.
    ///
    /// The engine is rebuilt at the selected size, the cubes are dropped,
    /// the origin is seeded again and the loop restarts.
    fn poll_reset(&mut self, now: f64) -> Result<()> {
        match self.pending_reset {
            Some(deadline) if now >= deadline => {
                self.pending_reset = None;
                self.engine.resize(self.selected_size)?;
                self.cubes.clear();
                self.place_seed(IVec3::ZERO)?;
                self.spin = 0.0;
                self.running = true;
                info!("restarted growth at size {}", self.selected_size);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Rotation applied to the aggregate before projecting.
    fn rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch) * Quat::from_rotation_y(self.yaw + self.spin)
    }

    /// Projects a centered lattice position orthographically into `rect`.
    ///
    /// ### Returns
    /// The screen position of the cube center and its depth (larger is
    /// closer to the viewer).
    fn project(&self, pos: IVec3, rot: Quat, rect: egui::Rect) -> (egui::Pos2, f32) {
        let v = rot * pos.as_vec3();
        let center = rect.center();
        (
            egui::pos2(center.x + v.x * self.zoom, center.y - v.y * self.zoom),
            v.z,
        )
    }

    /// Color derived from the direction of a cube from the origin.
    fn cube_color(pos: IVec3) -> egui::Color32 {
        let n = pos.as_vec3().normalize_or(Vec3::Z);
        let c = (n * 0.5 + Vec3::splat(0.5)) * 255.0;
        egui::Color32::from_rgb(c.x as u8, c.y as u8, c.z as u8)
    }

    /// Builds the top panel UI (run controls, size selection, reset, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let resetting = self.pending_reset.is_some();

                if ui
                    .add_enabled(
                        !resetting,
                        egui::Button::new(if self.running { "⏸ Pause" } else { "▶ Run" }),
                    )
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui
                    .add_enabled(!resetting, egui::Button::new("Step"))
                    .clicked()
                {
                    self.step_once();
                }

                ui.separator();
                egui::ComboBox::from_label("size")
                    .selected_text(self.selected_size.to_string())
                    .show_ui(ui, |ui| {
                        for &s in SIZE_CHOICES {
                            ui.selectable_value(&mut self.selected_size, s, s.to_string());
                        }
                    });

                if ui.button("Reset").clicked() {
                    let now = ctx.input(|i| i.time);
                    self.request_reset(now);
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 1.0..=40.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (size, cube count, state).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let state = if self.pending_reset.is_some() {
                    "resetting"
                } else if self.engine.is_finished() {
                    "finished"
                } else if self.running {
                    "growing"
                } else {
                    "paused"
                };
                ui.label(state);
                ui.separator();
                ui.label(format!("cubes = {}", self.cubes.len()));
                ui.label(format!(
                    "size = {} (margin {})",
                    self.engine.size(),
                    self.engine.margin()
                ));
            });
        });
    }

    /// Builds the central panel where the aggregate is drawn and orbited.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Orbit with drag.
            if response.dragged() {
                let delta = response.drag_delta();
                self.yaw += delta.x * 0.01;
                self.pitch = (self.pitch + delta.y * 0.01).clamp(-1.5, 1.5);
            }

            // Zoom with the scroll wheel.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 && response.hovered() {
                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(1.0, 40.0);
            }

            let now = ctx.input(|i| i.time);
            if let Err(e) = self.poll_reset(now) {
                error!("reset failed: {e}");
            }

            if self.running {
                self.step_once();
                let dt = ctx.input(|i| i.stable_dt);
                self.spin -= dt * self.view.spin_speed;
            }

            // Painter's algorithm: far cubes first.
            let rot = self.rotation();
            let mut projected: Vec<(egui::Pos2, f32, IVec3)> = self
                .cubes
                .iter()
                .map(|&c| {
                    let (p, depth) = self.project(c, rot, rect);
                    (p, depth, c)
                })
                .collect();
            projected.sort_by(|a, b| a.1.total_cmp(&b.1));

            let side = egui::vec2(self.zoom, self.zoom);
            let edge = egui::Stroke::new(1.0, egui::Color32::from_gray(0x77));
            for (p, _, c) in projected {
                let r = egui::Rect::from_center_size(p, side);
                painter.rect_filled(r, 0.0, Self::cube_color(c));
                painter.rect_stroke(r, 0.0, edge, egui::StrokeKind::Inside);
            }

            if self.running || self.pending_reset.is_some() {
                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    fn small_viewer() -> Viewer {
        Viewer::with_view(ViewConfig {
            default_size: 7,
            ..ViewConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn new_seeds_origin_and_runs() {
        let viewer = small_viewer();
        assert_eq!(viewer.cubes, vec![IVec3::ZERO]);
        assert_eq!(viewer.engine.occupied_count(), 1);
        assert_eq!(viewer.engine.margin(), 3);
        assert!(viewer.running);
        assert!(viewer.pending_reset.is_none());
    }

    #[test]
    fn step_once_places_cube_next_to_aggregate() {
        let mut viewer = small_viewer();

        // First call injects, second walks until it freezes.
        viewer.step_once();
        assert_eq!(viewer.cubes.len(), 1);
        viewer.step_once();
        assert_eq!(viewer.cubes.len(), 2);

        let placed = viewer.cubes[1];
        assert_eq!(placed.abs().element_sum(), 1);
    }

    #[test]
    fn reset_waits_for_settle_delay() {
        let mut viewer = small_viewer();
        viewer.step_once();
        viewer.step_once();
        viewer.selected_size = 11;

        viewer.request_reset(10.0);
        assert!(!viewer.running);

        // Too early: nothing changes.
        viewer.poll_reset(10.1).unwrap();
        assert_eq!(viewer.engine.size(), 7);
        assert_eq!(viewer.cubes.len(), 2);

        viewer.poll_reset(10.25).unwrap();
        assert!(viewer.pending_reset.is_none());
        assert!(viewer.running);
        assert_eq!(viewer.engine.size(), 11);
        assert_eq!(viewer.engine.margin(), 5);
        assert_eq!(viewer.engine.occupied_count(), 1);
        assert!(!viewer.engine.is_finished());
        assert_eq!(viewer.cubes, vec![IVec3::ZERO]);
    }

    #[test]
    fn origin_projects_to_rect_center() {
        let viewer = small_viewer();
        let rect = test_rect();
        let (p, depth) = viewer.project(IVec3::ZERO, viewer.rotation(), rect);
        assert_eq!(p, rect.center());
        assert_eq!(depth, 0.0);
    }

    #[test]
    fn unrotated_projection_scales_by_zoom() {
        let mut viewer = small_viewer();
        viewer.zoom = 4.0;
        let rect = test_rect();
        let (p, depth) = viewer.project(IVec3::new(2, 1, -3), Quat::IDENTITY, rect);
        assert_eq!(p, egui::pos2(408.0, 296.0));
        assert_eq!(depth, -3.0);
    }

    #[test]
    fn cube_color_follows_direction() {
        assert_eq!(
            Viewer::cube_color(IVec3::new(1, 0, 0)),
            egui::Color32::from_rgb(255, 127, 127)
        );
        // The origin has no direction and falls back to +z.
        assert_eq!(
            Viewer::cube_color(IVec3::ZERO),
            egui::Color32::from_rgb(127, 127, 255)
        );
    }
}
