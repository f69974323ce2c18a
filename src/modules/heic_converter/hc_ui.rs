use eframe::egui;
use crate::modules::helpers::notices::NoticeBoard;
use crate::style::{self, ColorPalette, ThemeMode};
use super::hc_main::{ConversionState, HeicConverter};

impl HeicConverter {
    pub fn ui(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, notices: &mut NoticeBoard) {
        let theme = if ui.visuals().dark_mode { ThemeMode::Dark } else { ThemeMode::Light };

        self.poll_events(notices);
        self.handle_dropped_files(ctx, notices);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(8.0);
                self.render_header(ui, theme);

                ui.add_space(8.0);
                self.render_file_list(ui, theme, notices);

                ui.add_space(12.0);
                self.render_output_directory(ui, theme);

                ui.add_space(12.0);
                self.render_quality_settings(ui, theme);

                ui.add_space(12.0);
                self.render_progress(ui, theme);

                ui.add_space(12.0);
                self.render_action_buttons(ui, ctx, theme);

                ui.add_space(16.0);
            });

        if self.is_converting() {
            ctx.request_repaint();
        }
    }

    fn render_header(&self, ui: &mut egui::Ui, theme: ThemeMode) {
        let (title_color, subtitle_color) = match theme {
            ThemeMode::Dark => (ColorPalette::ZINC_100, ColorPalette::ZINC_400),
            ThemeMode::Light => (ColorPalette::ZINC_900, ColorPalette::ZINC_600),
        };

        ui.label(egui::RichText::new("HEIC to JPG Converter").size(24.0).color(title_color));
        ui.add_space(4.0);
        ui.label(
            egui::RichText::new("Drag and drop your HEIC files here:")
                .size(13.0)
                .color(subtitle_color)
        );
        ui.add_space(12.0);
    }

    fn render_file_list(&mut self, ui: &mut egui::Ui, theme: ThemeMode, notices: &mut NoticeBoard) {
        let (panel_bg, border_color, text_color, weak_color) = style::panel_colors(theme);

        egui::Frame::new()
            .fill(panel_bg)
            .stroke(egui::Stroke::new(1.0, border_color))
            .corner_radius(8.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!("Files ({})", self.pending.len()))
                            .size(14.0)
                            .color(text_color)
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Add Files").clicked() {
                            self.pick_files(notices);
                        }
                    });
                });

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                if self.pending.is_empty() {
                    let (drop_bg, drop_border) = match (self.drag_hover, theme) {
                        (true, ThemeMode::Dark) => (ColorPalette::ZINC_700, ColorPalette::BLUE_500),
                        (true, ThemeMode::Light) => (ColorPalette::GRAY_200, ColorPalette::BLUE_500),
                        (false, ThemeMode::Dark) => (ColorPalette::ZINC_900, ColorPalette::ZINC_600),
                        (false, ThemeMode::Light) => (egui::Color32::WHITE, ColorPalette::GRAY_400),
                    };

                    let (rect, response) = ui.allocate_exact_size(
                        egui::vec2(ui.available_width(), 150.0),
                        egui::Sense::click(),
                    );

                    ui.painter().rect_filled(rect, 6.0, drop_bg);
                    ui.painter().rect_stroke(
                        rect,
                        6.0,
                        egui::Stroke::new(2.0, drop_border),
                        egui::StrokeKind::Outside,
                    );
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Drop HEIC files here or click to browse",
                        egui::FontId::proportional(14.0),
                        weak_color,
                    );

                    if response.clicked() {
                        self.pick_files(notices);
                    }
                } else {
                    let item_bg = match theme {
                        ThemeMode::Dark => ColorPalette::ZINC_900,
                        ThemeMode::Light => egui::Color32::WHITE,
                    };

                    egui::ScrollArea::vertical()
                        .id_salt("pending_files")
                        .max_height(220.0)
                        .show(ui, |ui| {
                            for path in self.pending.paths() {
                                egui::Frame::new()
                                    .fill(item_bg)
                                    .stroke(egui::Stroke::new(1.0, border_color))
                                    .corner_radius(6.0)
                                    .inner_margin(8.0)
                                    .show(ui, |ui| {
                                        ui.set_width(ui.available_width());
                                        ui.label(
                                            egui::RichText::new(path.to_string_lossy())
                                                .color(text_color)
                                                .size(12.0)
                                        );
                                    });
                                ui.add_space(4.0);
                            }
                        });
                }
            });
    }

    fn render_output_directory(&mut self, ui: &mut egui::Ui, theme: ThemeMode) {
        let (panel_bg, border_color, text_color, label_color) = style::panel_colors(theme);

        egui::Frame::new()
            .fill(panel_bg)
            .stroke(egui::Stroke::new(1.0, border_color))
            .corner_radius(8.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Output Directory").size(14.0).color(text_color));
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(self.destination.label()).color(label_color));
                    if self.destination.is_default() {
                        ui.label(egui::RichText::new("(default)").size(11.0).color(label_color));
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Choose Folder").clicked() {
                            self.choose_destination();
                        }
                    });
                });
            });
    }

    fn render_quality_settings(&mut self, ui: &mut egui::Ui, theme: ThemeMode) {
        let (panel_bg, border_color, text_color, label_color) = style::panel_colors(theme);

        egui::Frame::new()
            .fill(panel_bg)
            .stroke(egui::Stroke::new(1.0, border_color))
            .corner_radius(8.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Quality Settings").size(14.0).color(text_color));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let toggle_text = if self.show_advanced { "Hide" } else { "Show" };
                        if ui.button(toggle_text).clicked() {
                            self.show_advanced = !self.show_advanced;
                        }
                    });
                });

                if self.show_advanced {
                    ui.add_space(12.0);
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("JPEG Quality:").color(label_color));
                        ui.add_enabled(
                            !self.is_converting(),
                            egui::Slider::new(&mut self.jpeg_quality, 1..=100).suffix("%"),
                        );
                    });
                }
            });
    }

    fn render_progress(&self, ui: &mut egui::Ui, theme: ThemeMode) {
        if self.state == ConversionState::Idle {
            return;
        }

        let (panel_bg, border_color, text_color, weak_color) = style::panel_colors(theme);

        egui::Frame::new()
            .fill(panel_bg)
            .stroke(egui::Stroke::new(1.0, border_color))
            .corner_radius(8.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Conversion Progress").size(14.0).color(text_color));
                ui.add_space(8.0);

                let fraction = (self.progress_percent / 100.0).clamp(0.0, 1.0);
                let progress_bg = match theme {
                    ThemeMode::Dark => ColorPalette::ZINC_700,
                    ThemeMode::Light => ColorPalette::GRAY_200,
                };
                let progress_fill = match self.state {
                    ConversionState::Converting => ColorPalette::BLUE_500,
                    ConversionState::Completed => ColorPalette::GREEN_500,
                    ConversionState::Failed => ColorPalette::RED_500,
                    ConversionState::Idle => ColorPalette::ZINC_500,
                };

                let (rect, _) = ui.allocate_exact_size(
                    egui::vec2(ui.available_width(), 24.0),
                    egui::Sense::hover(),
                );
                ui.painter().rect_filled(rect, 4.0, progress_bg);
                let fill_rect = egui::Rect::from_min_size(
                    rect.min,
                    egui::vec2(rect.width() * fraction, rect.height()),
                );
                ui.painter().rect_filled(fill_rect, 4.0, progress_fill);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    format!("{:.0}%", self.progress_percent),
                    egui::FontId::proportional(12.0),
                    egui::Color32::WHITE,
                );

                ui.add_space(8.0);
                ui.label(egui::RichText::new(&self.message).size(12.0).color(text_color));

                if let Some(summary) = &self.last_summary {
                    if !self.is_converting() {
                        ui.label(
                            egui::RichText::new(format!(
                                "Finished at {} in {}",
                                summary.finished_at.format("%H:%M:%S"),
                                summary.destination.display()
                            ))
                            .size(11.0)
                            .color(weak_color)
                        );
                    }
                }
            });
    }

    fn render_action_buttons(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, theme: ThemeMode) {
        let affordances = self.pending.affordances();
        let can_convert = affordances.convert && !self.is_converting();

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let enabled = ui.add_enabled_ui(can_convert, |ui| {
                style::primary_button(ui, "Convert to JPG", theme)
            }).inner;
            if enabled.clicked() {
                self.start_conversion(ctx);
            }

            let cleared = ui.add_enabled_ui(affordances.clear, |ui| {
                style::secondary_button(ui, "Clear Files", theme)
            }).inner;
            if cleared.clicked() {
                self.clear_files();
            }
        });
    }
}
