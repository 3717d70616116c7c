use config::{FamilyKind, Settings};
use eframe::{
    egui::{self, pos2, CollapsingHeader, Color32, Frame, Pos2, Shadow, Slider},
    epaint::PathShape,
};
use editor::TileEditor;
use geom::{Pt, Transform};
use tiling::EdgeClass;

mod config;
mod edge;
mod editor;
mod geom;
mod tiling;

/// Physical editing unit in surface points; picks snap within half of this.
const PHYS_UNIT: f64 = 32.0;

/// Native main function
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        follow_system_theme: false,
        ..Default::default()
    };

    eframe::run_native(
        "Prototile",
        native_options,
        Box::new(|cc| Ok(Box::new(App::new(cc)))),
    )
}

/// Web main function
#[cfg(target_arch = "wasm32")]
fn main() {
    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let start_result = eframe::WebRunner::new()
            .start(
                "eframe_canvas",
                web_options,
                Box::new(|cc| Ok(Box::new(App::new(cc)))),
            )
            .await;

        // Remove the loading text and spinner:
        let loading_text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("loading_text"));
        if let Some(loading_text) = loading_text {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p> The app has crashed. See the developer console for details. </p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

struct App {
    settings: Settings,
    editor: TileEditor,
    pointer_down: bool,
}
impl App {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings = Settings::new();
        let mut editor = TileEditor::new(settings.family.create(), 800., 600., PHYS_UNIT);
        editor.set_curve_amount(settings.curve_amount);

        Self {
            settings,
            editor,
            pointer_down: false,
        }
    }
}
impl eframe::App for App {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(Frame::none())
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap();
                self.editor
                    .set_view_size(rect.width() as f64, rect.height() as f64);

                let r = ui.interact(
                    rect,
                    eframe::egui::Id::new("Editing"),
                    egui::Sense::click_and_drag(),
                );

                let origin = rect.min;
                let egui_to_surface = |pos: Pos2| {
                    Pt::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64)
                };
                let surface_to_egui =
                    |p: Pt| pos2(p.x as f32, p.y as f32) + origin.to_vec2();

                // Scroll zooming about the viewport center
                if r.hovered() {
                    let scroll_delta = ctx.input(|i| i.smooth_scroll_delta.y);
                    if scroll_delta.abs() > 0.001 {
                        let factor = (scroll_delta as f64 / 200.).exp();
                        let cx = 0.5 * rect.width() as f64;
                        let cy = 0.5 * rect.height() as f64;
                        let zoom = Transform::translate(cx, cy)
                            * Transform::new(factor, 0., 0., 0., factor, 0.)
                            * Transform::translate(-cx, -cy);
                        self.editor
                            .set_editor_transform(zoom * self.editor.editor_transform());
                    }
                }

                // Pointer-driven curve editing
                let now = ui.input(|i| i.time);
                if r.is_pointer_button_down_on() {
                    if let Some(mpos) = r.interact_pointer_pos() {
                        let pt = egui_to_surface(mpos);
                        if !self.pointer_down {
                            let do_del = ui.input(|i| i.modifiers.alt);
                            self.editor.begin_edit(pt, do_del, now);
                            self.pointer_down = true;
                        } else {
                            self.editor.update_edit(pt);
                        }
                    }
                } else if self.pointer_down {
                    self.editor.end_edit();
                    self.pointer_down = false;
                }
                self.editor.tick(now);
                if self.editor.dragging() {
                    ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
                }
                if self.editor.deletion_armed() {
                    // Keep frames coming so the long-press timer can fire.
                    ctx.request_repaint_after(std::time::Duration::from_millis(50));
                }

                // Tile outline
                let t = self.editor.editor_transform();
                let points: Vec<Pos2> = self
                    .editor
                    .outline()
                    .iter()
                    .map(|&p| surface_to_egui(t * p))
                    .collect();
                ui.painter().add(PathShape {
                    points,
                    closed: true,
                    fill: Color32::from_rgb(35, 75, 110),
                    stroke: (2., Color32::WHITE).into(),
                });

                // Control point handles
                if self.settings.show_handles {
                    for part in self.editor.family().boundary() {
                        let curve = self.editor.edge(part.id);
                        if curve.class() == EdgeClass::Plain {
                            continue;
                        }
                        let place = t * part.transform;
                        let col = match curve.class() {
                            EdgeClass::Generic => Color32::GOLD,
                            EdgeClass::PointSymmetric => Color32::LIGHT_RED,
                            EdgeClass::MirrorSymmetric => Color32::LIGHT_BLUE,
                            EdgeClass::Plain => unreachable!(),
                        };
                        let col = if part.second {
                            col.gamma_multiply(0.5)
                        } else {
                            col
                        };
                        for &cp in curve.points() {
                            ui.painter()
                                .circle_filled(surface_to_egui(place * cp), 4., col);
                        }
                    }
                }

                // Settings menu
                Frame::popup(ui.style())
                    .outer_margin(10.)
                    .shadow(Shadow::NONE)
                    .show(ui, |ui| {
                        CollapsingHeader::new("Settings").show(ui, |ui| {
                            egui::ComboBox::from_label("Shape family")
                                .selected_text(self.settings.family.label())
                                .show_ui(ui, |ui| {
                                    for kind in FamilyKind::ALL {
                                        if ui
                                            .selectable_value(
                                                &mut self.settings.family,
                                                kind,
                                                kind.label(),
                                            )
                                            .changed()
                                        {
                                            self.editor.set_family(kind.create());
                                        }
                                    }
                                });

                            ui.horizontal(|ui| {
                                if ui
                                    .add(Slider::new(
                                        &mut self.settings.curve_amount,
                                        0.0..=1.5,
                                    ))
                                    .changed()
                                {
                                    self.editor.set_curve_amount(self.settings.curve_amount);
                                }
                                ui.label("Curve Amount");
                            });

                            for i in 0..self.editor.param_count() {
                                ui.horizontal(|ui| {
                                    let mut v = self.editor.param(i);
                                    if ui.add(Slider::new(&mut v, -1.0..=2.0)).changed() {
                                        self.editor.set_param(i, v);
                                    }
                                    ui.label(format!("Parameter {i}"));
                                });
                            }

                            ui.checkbox(&mut self.settings.show_handles, "Show control points");

                            if ui.button("Refit View").clicked() {
                                self.editor.refit();
                            }
                        })
                    });
            });
    }
}
