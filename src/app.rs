use eframe::egui;
use crate::style::ColorPalette;
use super::style::{self, ThemeMode};
use super::modules::heic_converter::HeicConverter;
use super::modules::helpers::jpeg_export::DEFAULT_JPEG_QUALITY;
use super::modules::helpers::notices::NoticeBoard;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub enum ThemePreference { System, Light, Dark }

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
struct AppSettings { theme_preference: ThemePreference, jpeg_quality: u8 }

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_preference: ThemePreference::System,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl AppSettings {
    fn load() -> Self {
        let config_path = Self::get_config_path();
        match fs::read_to_string(&config_path) {
            Ok(contents) => Self::from_json(&contents),
            Err(_) => Self::default(),
        }
    }

    fn from_json(contents: &str) -> Self {
        match serde_json::from_str::<AppSettings>(contents) {
            Ok(mut settings) => {
                settings.jpeg_quality = settings.jpeg_quality.clamp(1, 100);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings file: {}", e);
                Self::default()
            }
        }
    }

    fn save(&self) {
        let config_path = Self::get_config_path();
        if let Some(parent) = config_path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(&config_path, json) {
                    log::warn!("Could not save settings to {}: {}", config_path.display(), e);
                }
            }
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }

    fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("heic_converter");
        path.push("app_settings.json");
        path
    }
}

pub struct HeicConverterApp {
    converter: HeicConverter,
    notices: NoticeBoard,
    theme_mode: ThemeMode,
    theme_preference: ThemePreference,
    saved_quality: u8,
}

impl HeicConverterApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = AppSettings::load();

        let system_theme = match cc.egui_ctx.theme() {
            egui::Theme::Dark => ThemeMode::Dark,
            egui::Theme::Light => ThemeMode::Light,
        };

        let initial_theme = match settings.theme_preference {
            ThemePreference::System => system_theme,
            ThemePreference::Light => ThemeMode::Light,
            ThemePreference::Dark => ThemeMode::Dark,
        };

        style::apply_theme(&cc.egui_ctx, initial_theme);

        Self {
            converter: HeicConverter::new(settings.jpeg_quality),
            notices: NoticeBoard::new(),
            theme_mode: initial_theme,
            theme_preference: settings.theme_preference,
            saved_quality: settings.jpeg_quality,
        }
    }

    fn save_settings(&mut self) {
        let settings = AppSettings {
            theme_preference: self.theme_preference,
            jpeg_quality: self.converter.jpeg_quality(),
        };
        settings.save();
        self.saved_quality = settings.jpeg_quality;
    }

    fn set_theme_preference(&mut self, ctx: &egui::Context, preference: ThemePreference) {
        self.theme_preference = preference;
        self.theme_mode = match preference {
            ThemePreference::System => match ctx.theme() {
                egui::Theme::Dark => ThemeMode::Dark,
                egui::Theme::Light => ThemeMode::Light,
            },
            ThemePreference::Light => ThemeMode::Light,
            ThemePreference::Dark => ThemeMode::Dark,
        };
        style::apply_theme(ctx, self.theme_mode);
        self.save_settings();
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        let mut chosen = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("HEIC to JPG Converter").size(14.0).strong());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.selectable_label(matches!(self.theme_preference, ThemePreference::Dark), "Dark").clicked() {
                        chosen = Some(ThemePreference::Dark);
                    }
                    if ui.selectable_label(matches!(self.theme_preference, ThemePreference::Light), "Light").clicked() {
                        chosen = Some(ThemePreference::Light);
                    }
                    if ui.selectable_label(matches!(self.theme_preference, ThemePreference::System), "System").clicked() {
                        chosen = Some(ThemePreference::System);
                    }
                    ui.label("Theme:");
                });
            });
            ui.add_space(4.0);
        });

        if let Some(preference) = chosen {
            self.set_theme_preference(ctx, preference);
        }
    }

    fn render_notices(&mut self, ctx: &egui::Context) {
        if self.notices.is_empty() {
            return;
        }

        let (bg, border, text) = if matches!(self.theme_mode, ThemeMode::Dark) {
            (ColorPalette::ZINC_800, ColorPalette::ZINC_700, ColorPalette::SLATE_200)
        } else {
            (egui::Color32::WHITE, ColorPalette::GRAY_300, ColorPalette::GRAY_800)
        };

        let mut dismissed = Vec::new();
        let mut dismiss_all = false;

        egui::TopBottomPanel::bottom("notices_panel")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(format!("Messages ({})", self.notices.len())).size(13.0).color(text));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss All").clicked() {
                            dismiss_all = true;
                        }
                    });
                });
                ui.add_space(4.0);

                egui::ScrollArea::vertical()
                    .id_salt("notices")
                    .max_height(160.0)
                    .show(ui, |ui| {
                        for notice in self.notices.iter() {
                            let accent = style::notice_accent(notice.level, self.theme_mode);
                            egui::Frame::new()
                                .fill(bg)
                                .stroke(egui::Stroke::new(1.0, border))
                                .corner_radius(6.0)
                                .inner_margin(8.0)
                                .show(ui, |ui| {
                                    ui.set_width(ui.available_width());
                                    ui.horizontal(|ui| {
                                        ui.label(egui::RichText::new(notice.level.title()).strong().color(accent));
                                        ui.label(egui::RichText::new(&notice.message).color(text));
                                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                            if ui.small_button("OK").clicked() {
                                                dismissed.push(notice.id);
                                            }
                                        });
                                    });
                                });
                            ui.add_space(4.0);
                        }
                    });
                ui.add_space(6.0);
            });

        if dismiss_all {
            self.notices.dismiss_all();
        }
        for id in dismissed {
            self.notices.dismiss(id);
        }
    }
}

impl eframe::App for HeicConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if matches!(self.theme_preference, ThemePreference::System) {
            let system_theme = match ctx.theme() {
                egui::Theme::Dark => ThemeMode::Dark,
                egui::Theme::Light => ThemeMode::Light,
            };

            if self.theme_mode != system_theme {
                self.theme_mode = system_theme;
                style::apply_theme(ctx, self.theme_mode);
            }
        }

        self.top_bar(ctx);
        self.render_notices(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.converter.ui(ui, ctx, &mut self.notices);
        });

        if self.converter.jpeg_quality() != self.saved_quality && !ctx.input(|i| i.pointer.any_down()) {
            self.save_settings();
        }
    }
}
