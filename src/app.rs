//! Main application state and UI.
//!
//! Each frame drains finished background work into the explorer, paints the
//! chart, cloud and search panels, and dispatches whatever the user clicked.

use crate::api::ApiClient;
use crate::cloud::{KeywordCloud, SpiralLayout};
use crate::explorer::{Effect, Explorer, UiEvent};
use crate::settings::{CloudSettings, Settings};
use crate::surface::{Anchor, Hit, Shape, Surface};
use crate::theme;
use crate::timeline::types::Year;
use crate::worker::{Completion, Worker};
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use std::sync::Arc;
use std::time::Duration;

/// Cloud words fade in over this long after a layout lands
const FADE_IN: Duration = Duration::from_secs(1);

pub struct ExplorerApp {
    explorer: Explorer,
    worker: Worker,
    cloud_settings: CloudSettings,

    // Zoom input, synced back from the timeline after every dispatch
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
}

impl ExplorerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let backend = Arc::new(ApiClient::new(settings.api_base_url.clone()));
        let layout = Arc::new(SpiralLayout::new(&settings.cloud));

        let mut app = Self {
            explorer: Explorer::new(&settings),
            worker: Worker::new(backend, layout),
            cloud_settings: settings.cloud.clone(),
            zoom: settings.pixel_scale,
            min_zoom: settings.min_pixel_scale,
            max_zoom: settings.max_pixel_scale,
        };

        tracing::info!("Fetching timeline from {}", settings.api_base_url);
        app.worker.fetch_dataset();
        app
    }

    fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.worker.run(effect);
        }
    }

    fn dispatch(&mut self, events: Vec<UiEvent>) {
        for event in events {
            let effects = self.explorer.dispatch(event);
            self.run(effects);
        }
        self.zoom = self.explorer.timeline().pixel_scale();
    }

    /// Feed finished background work into the explorer
    fn drain_worker(&mut self) {
        for completion in self.worker.poll() {
            let effects = match completion {
                Completion::Dataset(result) => self.explorer.on_dataset(result),
                Completion::Search(response) => {
                    self.explorer.on_search_response(response);
                    Vec::new()
                }
                Completion::Cloud(layout) => {
                    self.explorer.on_cloud_layout(layout);
                    Vec::new()
                }
            };
            self.run(effects);
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        ui.horizontal(|ui| {
            ui.heading("Keyword Timeline");
            ui.separator();

            ui.label("Zoom:");
            let zoom = egui::DragValue::new(&mut self.zoom)
                .range(self.min_zoom..=self.max_zoom)
                .speed(1.0)
                .suffix(" px/year");
            if ui.add(zoom).changed() {
                events.push(UiEvent::ZoomChanged(self.zoom));
            }

            ui.separator();
            let timeline = self.explorer.timeline();
            if timeline.is_loaded() {
                ui.colored_label(
                    theme::text::SECONDARY,
                    format!("{} years", timeline.data().len()),
                );
            } else if self.worker.pending() > 0 {
                ui.spinner();
                ui.colored_label(theme::text::SECONDARY, "Loading timeline...");
            } else {
                ui.colored_label(Color32::RED, "● No timeline data");
            }

            if self.worker.pending() > 0 && timeline.is_loaded() {
                ui.spinner();
            }
        });
    }

    fn render_chart(&mut self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        if self.explorer.timeline().chart().is_none() {
            return;
        }
        let surface = self.explorer.surface();
        egui::ScrollArea::horizontal()
            .id_salt("chart")
            .show(ui, |ui| {
                if let Some(Hit::MarkerLabel(index)) = paint_surface(ui, surface) {
                    events.push(UiEvent::MarkerLabelClicked(index));
                }
            });
    }

    fn render_cloud(&mut self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        let cloud = self.explorer.cloud();
        match cloud.year() {
            Some(year) => ui.label(egui::RichText::new(format!("Keywords in {}", year)).strong()),
            None => ui.colored_label(theme::text::MUTED, "No keywords yet"),
        };

        let size = Vec2::new(self.cloud_settings.width, self.cloud_settings.height);
        if let Some(word) = paint_cloud(ui, cloud, size) {
            events.push(UiEvent::CloudWordClicked(word));
        }
    }

    fn render_search(&mut self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        let years = self.explorer.timeline().year_options().to_vec();
        let form = self.explorer.query_mut().form_mut();

        ui.horizontal(|ui| {
            let edit = ui.add(
                egui::TextEdit::singleline(&mut form.word)
                    .hint_text("Keyword")
                    .desired_width(200.0),
            );
            let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            egui::ComboBox::from_id_salt("year")
                .selected_text(year_label(&form.year))
                .show_ui(ui, |ui| {
                    for year in years {
                        let label = year_label(&year);
                        ui.selectable_value(&mut form.year, year, label);
                    }
                });

            if ui.button("Search").clicked() || entered {
                events.push(UiEvent::FormSubmitted);
            }
        });

        ui.add_space(8.0);

        let query = self.explorer.query();
        let results = query.results();
        if results.is_empty() {
            if query.active().is_some() {
                ui.colored_label(theme::text::MUTED, "No documents found");
            }
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt("results")
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for item in results.items() {
                    ui.horizontal_wrapped(|ui| {
                        ui.hyperlink_to(
                            egui::RichText::new(&item.name).strong().color(theme::text::PRIMARY),
                            &item.href,
                        );
                        ui.colored_label(theme::text::SECONDARY, item.year.as_str());
                    });
                    if !item.authors.is_empty() {
                        ui.colored_label(theme::text::MUTED, &item.authors);
                    }
                    ui.horizontal_wrapped(|ui| {
                        for term in &item.terms {
                            let chip = egui::Button::new(egui::RichText::new(term).small())
                                .fill(theme::bg::CHIP);
                            if ui.add(chip).clicked() {
                                events.push(UiEvent::ResultTermClicked(term.clone()));
                            }
                        }
                    });
                    if !item.desc.is_empty() {
                        ui.label(&item.desc);
                    }
                    ui.separator();
                }

                let pager = query.pager();
                if !pager.is_hidden() {
                    ui.horizontal_wrapped(|ui| {
                        for button in pager.buttons() {
                            let text = egui::RichText::new(button.page.to_string());
                            let text = if button.active {
                                text.color(theme::ACTIVE)
                            } else {
                                text
                            };
                            if ui.add(egui::Button::new(text).selected(button.active)).clicked() {
                                events.push(UiEvent::PageClicked(button.page));
                            }
                        }
                    });
                }
            });
    }

    /// Cloud words are still fading in
    fn fading(&self) -> bool {
        self.explorer
            .cloud()
            .placed_at()
            .map_or(false, |t| t.elapsed() < FADE_IN)
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_worker();

        ctx.set_visuals(egui::Visuals::dark());
        let mut events = Vec::new();

        egui::TopBottomPanel::top("controls")
            .frame(
                egui::Frame::none()
                    .fill(theme::bg::PANEL)
                    .inner_margin(egui::Margin::symmetric(12.0, 8.0)),
            )
            .show(ctx, |ui| {
                self.render_controls(ui, &mut events);
            });

        egui::SidePanel::left("cloud")
            .resizable(false)
            .exact_width(self.cloud_settings.width + 16.0)
            .frame(
                egui::Frame::none()
                    .fill(theme::bg::PANEL)
                    .inner_margin(egui::Margin::same(8.0)),
            )
            .show(ctx, |ui| {
                self.render_cloud(ui, &mut events);
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(theme::bg::CHART)
                    .inner_margin(egui::Margin::same(8.0)),
            )
            .show(ctx, |ui| {
                self.render_chart(ui, &mut events);
                ui.separator();
                self.render_search(ui, &mut events);
            });

        self.dispatch(events);

        // Keep polling while work is in flight or words are fading in
        if self.worker.pending() > 0 || self.fading() {
            ctx.request_repaint();
        }
    }
}

/// Paint the surface's draw list; returns the hit under a click, if any
fn paint_surface(ui: &mut egui::Ui, surface: &Surface) -> Option<Hit> {
    let (width, height) = surface.size();
    let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::click());
    let origin = response.rect.min + surface.origin();
    let at = |p: Pos2| origin + p.to_vec2();

    let pointer = response.hover_pos();
    let click = if response.clicked() {
        response.interact_pointer_pos()
    } else {
        None
    };
    let mut clicked = None;

    for command in surface.commands() {
        match &command.shape {
            Shape::Line { from, to, color } => {
                painter.line_segment([at(*from), at(*to)], Stroke::new(1.0, *color));
            }
            Shape::Polyline { points, color } => {
                let points = points.iter().map(|p| at(*p)).collect();
                painter.add(egui::Shape::line(points, Stroke::new(1.5, *color)));
            }
            Shape::Circle {
                center,
                radius,
                fill,
            } => {
                painter.circle_filled(at(*center), *radius, *fill);
            }
            Shape::Text {
                pos,
                text,
                size,
                color,
                anchor,
            } => {
                let hovered = command.hit.is_some()
                    && pointer.map_or(false, |p| text_rect(&painter, at(*pos), text, *size, *anchor).contains(p));
                let color = if hovered { theme::ACTIVE } else { *color };
                let rect = painter.text(
                    at(*pos),
                    text_align(*anchor),
                    text,
                    FontId::proportional(*size),
                    color,
                );
                if let (Some(hit), Some(p)) = (&command.hit, click) {
                    if rect.contains(p) {
                        clicked = Some(hit.clone());
                    }
                }
                if hovered {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
            }
        }
    }

    clicked
}

fn text_rect(painter: &egui::Painter, pos: Pos2, text: &str, size: f32, anchor: Anchor) -> Rect {
    let galley = painter.layout_no_wrap(text.to_string(), FontId::proportional(size), Color32::WHITE);
    text_align(anchor).anchor_size(pos, galley.size())
}

/// Surface text is positioned at its baseline
fn text_align(anchor: Anchor) -> Align2 {
    match anchor {
        Anchor::Start => Align2::LEFT_BOTTOM,
        Anchor::Middle => Align2::CENTER_BOTTOM,
    }
}

/// Paint the placed cloud words centered in a canvas of `size`; returns the
/// clicked word, if any
fn paint_cloud(ui: &mut egui::Ui, cloud: &KeywordCloud, size: Vec2) -> Option<String> {
    let (response, painter) = ui.allocate_painter(size, Sense::click());
    let center = response.rect.center();
    let alpha = cloud
        .placed_at()
        .map_or(0.0, |t| fade_alpha(t.elapsed()));

    let pointer = response.hover_pos();
    let click = if response.clicked() {
        response.interact_pointer_pos()
    } else {
        None
    };
    let mut clicked = None;

    for (i, word) in cloud.words().iter().enumerate() {
        let galley = painter.layout_no_wrap(
            word.text.clone(),
            FontId::proportional(word.size),
            Color32::WHITE,
        );
        let word_center = center + Vec2::new(word.x, word.y);
        let rect = word_rect(word_center, galley.size(), word.rotate);
        let hovered = pointer.map_or(false, |p| rect.contains(p));

        let color = if hovered {
            theme::ACTIVE
        } else {
            theme::category(i)
        };
        let color = color.gamma_multiply(alpha);

        let angle = word.rotate.to_radians();
        let shape = egui::epaint::TextShape::new(
            text_origin(word_center, galley.size(), word.rotate),
            galley,
            color,
        )
        .with_override_text_color(color)
        .with_angle(angle);
        painter.add(shape);

        if hovered {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        if click.map_or(false, |p| rect.contains(p)) {
            clicked = Some(word.text.clone());
        }
    }

    clicked
}

/// Opacity `elapsed` into the fade-in
fn fade_alpha(elapsed: Duration) -> f32 {
    (elapsed.as_secs_f32() / FADE_IN.as_secs_f32()).clamp(0.0, 1.0)
}

/// Screen box of a word centered on `center`, rotated by `rotate` degrees
fn word_rect(center: Pos2, galley: Vec2, rotate: f32) -> Rect {
    if rotate == 0.0 {
        Rect::from_center_size(center, galley)
    } else {
        Rect::from_center_size(center, Vec2::new(galley.y, galley.x))
    }
}

/// Top-left of an unrotated galley so that, after rotating about that point,
/// it ends up centered on `center`
fn text_origin(center: Pos2, galley: Vec2, rotate: f32) -> Pos2 {
    if rotate == 0.0 {
        center - galley / 2.0
    } else {
        // Rotated a quarter turn clockwise: the galley hangs left of its origin
        Pos2::new(center.x + galley.y / 2.0, center.y - galley.x / 2.0)
    }
}

fn year_label(year: &Year) -> String {
    if year.is_any() {
        "All years".to_string()
    } else {
        year.to_string()
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
