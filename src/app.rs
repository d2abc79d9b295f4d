use crate::config::{write_config, Config, CONFIG_PATH};
use crate::gateway::LocalFs;
use crate::notify::DialogNotifier;
use crate::session::Controller;
use eframe::egui;
use egui::{Color32, Key, RichText};
use log::{info, warn};
use std::path::{Path, PathBuf};

const ORANGE: Color32 = Color32::from_rgb(255, 165, 0);

pub fn visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = Color32::BLACK;
    visuals.extreme_bg_color = Color32::from_rgb(0x1a, 0x1a, 0x1a);
    visuals.override_text_color = Some(ORANGE);
    visuals.selection.bg_fill = ORANGE;
    visuals.selection.stroke.color = Color32::BLACK;
    visuals
}

fn path_text(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// One radio button per vocabulary entry. Returns the clicked position.
fn label_selector(ui: &mut egui::Ui, labels: &[String], selected: Option<&str>) -> Option<usize> {
    let mut clicked = None;
    for (i, label) in labels.iter().enumerate() {
        let is_selected = selected == Some(label.as_str());
        let text = if is_selected {
            RichText::new(label).color(Color32::BLACK).background_color(ORANGE)
        } else {
            RichText::new(label)
        };
        if ui.radio(is_selected, text).clicked() {
            clicked = Some(i);
        }
    }
    clicked
}

pub struct AuditApp {
    controller: Controller<LocalFs, DialogNotifier>,
    config: Config,
    image_dir_input: String,
    labels_file_input: String,
    texture: Option<egui::TextureHandle>,
    // path the current texture was built from, even if decoding failed
    shown: Option<PathBuf>,
}

impl AuditApp {
    pub fn new(config: Config) -> Self {
        let controller = Controller::new(LocalFs, DialogNotifier, config.extensions.clone());
        Self {
            controller,
            image_dir_input: path_text(&config.last_image_dir),
            labels_file_input: path_text(&config.last_labels_file),
            config,
            texture: None,
            shown: None,
        }
    }

    fn browse_image_dir(&mut self) {
        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
            self.image_dir_input = dir.to_string_lossy().into_owned();
            info!("selected image directory: {}", dir.display());
        }
    }

    fn browse_labels_file(&mut self) {
        if let Some(file) = rfd::FileDialog::new()
            .add_filter("Text Files", &["txt"])
            .pick_file()
        {
            self.labels_file_input = file.to_string_lossy().into_owned();
            info!("selected labels file: {}", file.display());
        }
    }

    fn load(&mut self) {
        let dir = PathBuf::from(self.image_dir_input.trim());
        let labels = PathBuf::from(self.labels_file_input.trim());
        if self.controller.load(&dir, &labels).is_err() {
            return;
        }
        self.config.last_image_dir = Some(dir);
        self.config.last_labels_file = Some(labels);
        if let Err(e) = write_config(CONFIG_PATH, &self.config) {
            warn!("cannot write {}: {}", CONFIG_PATH, e);
        }
    }

    /// Rebuilds the preview when the cursor points at a different file.
    fn refresh_preview(&mut self, ctx: &egui::Context) {
        let path = self.controller.session().current_path();
        if path == self.shown {
            return;
        }
        self.shown = path.clone();
        self.texture = None;
        let path = match path {
            Some(p) => p,
            None => return,
        };
        if let Ok(Some(dynimg)) = self.controller.open_current() {
            let edge = self.config.preview_size;
            let rgba = dynimg.thumbnail(edge, edge).to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
            let tex = ctx.load_texture(path.to_string_lossy(), image, egui::TextureOptions::LINEAR);
            self.texture = Some(tex);
            info!("displayed image: {}", path.display());
        }
    }

    fn path_row(ui: &mut egui::Ui, caption: &str, value: &mut String) -> bool {
        ui.label(caption);
        ui.add(egui::TextEdit::singleline(value).desired_width(400.0));
        let browse = ui.button("Browse").clicked();
        ui.end_row();
        browse
    }
}

impl eframe::App for AuditApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !ctx.wants_keyboard_input() {
            let (left, right) = ctx.input(|i| {
                (
                    i.key_pressed(Key::ArrowLeft),
                    i.key_pressed(Key::ArrowRight),
                )
            });
            if left {
                self.controller.prev();
            }
            if right {
                self.controller.next();
            }
        }

        egui::TopBottomPanel::top("paths_panel").show(ctx, |ui| {
            egui::Grid::new("paths_grid").num_columns(3).show(ui, |ui| {
                if Self::path_row(ui, "Image Dir:", &mut self.image_dir_input) {
                    self.browse_image_dir();
                }
                if Self::path_row(ui, "Labels File:", &mut self.labels_file_input) {
                    self.browse_labels_file();
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Load").clicked() {
                    self.load();
                }
                if ui.button("Save").clicked() {
                    // reported by the controller
                    let _ = self.controller.save_labels();
                }
            });
        });

        egui::TopBottomPanel::bottom("nav_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Prev").clicked() {
                    self.controller.prev();
                }
                if ui.button("Next").clicked() {
                    self.controller.next();
                }
                if ui.button("Delete").clicked() {
                    // reported by the controller
                    let _ = self.controller.delete_current();
                }
                ui.separator();
                let session = self.controller.session();
                let position = session.current.map_or(0, |i| i + 1);
                ui.label(format!("Image {}/{}", position, session.image_files.len()));
                if let Some(name) = session.current_file() {
                    ui.label(name);
                }
            });
        });

        egui::SidePanel::left("files_panel").show(ctx, |ui| {
            ui.heading("Images");
            let mut clicked_idx: Option<usize> = None;
            egui::ScrollArea::vertical().show(ui, |ui| {
                let session = self.controller.session();
                for (i, name) in session.image_files.iter().enumerate() {
                    if ui.selectable_label(session.current == Some(i), name.as_str()).clicked() {
                        clicked_idx = Some(i);
                    }
                }
            });
            if let Some(i) = clicked_idx {
                self.controller.select_index(i);
            }
        });

        egui::SidePanel::right("labels_panel").show(ctx, |ui| {
            ui.heading("Select Class");
            let session = self.controller.session();
            let picked = label_selector(ui, &session.labels, session.selected_label.as_deref())
                .map(|i| session.labels[i].clone());
            if let Some(name) = picked {
                self.controller.select_label(&name);
            }
        });

        self.refresh_preview(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.controller.session().is_empty() {
                ui.label("No images loaded. Choose an image directory and a labels file, then press Load.");
                return;
            }
            match &self.texture {
                Some(tex) => {
                    ui.centered_and_justified(|ui| {
                        ui.add(egui::Image::new(tex).fit_to_exact_size(tex.size_vec2()));
                    });
                }
                None if self.shown.is_none() => {
                    ui.label("Select an image from the list.");
                }
                None => {
                    let name = self.shown.as_deref().and_then(Path::file_name);
                    ui.label(format!(
                        "Cannot display {}",
                        name.map(|n| n.to_string_lossy()).unwrap_or_default()
                    ));
                }
            }
        });
    }
}
