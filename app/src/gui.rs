use std::time::Instant;

use eframe::{App, Frame, NativeOptions, egui, run_native};
use egui::{ColorImage, TextureHandle, Vec2};
use landmass_core::random::time_seed;
use landmass_core::render::{format_symbols, heights_to_rgb, symbols_to_image, symbols_to_rgb};
use landmass_core::{Landmass, RandomSource, Terrain, TerrainParams, generate};
use landmass_storage::TextStore;
use log::info;

use crate::AppError;

// Pixels per cell in saved PNG previews
const PNG_SCALE: u32 = 8;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
enum PreviewKind {
    #[default]
    Bands,
    Heights,
}

struct TerrainApp {
    // parameters
    params: TerrainParams,
    seed: u64,
    view: PreviewKind,

    // last generated landmass and its texture
    landmass: Option<Landmass>,
    terrain_texture: Option<TextureHandle>,
    symbol_text: String,

    // status line
    status_message: String,
}

impl TerrainApp {
    fn new(seed: u64) -> Self {
        Self {
            params: TerrainParams::default(),
            seed,
            view: PreviewKind::default(),
            landmass: None,
            terrain_texture: None,
            symbol_text: String::new(),
            status_message: String::new(),
        }
    }

    fn run_generation(&mut self, ctx: &egui::Context) {
        let start = Instant::now();
        match generate(&self.params, &mut RandomSource::new(self.seed)) {
            Ok(landmass) => {
                let ms = start.elapsed().as_secs_f32() * 1000.0;
                info!("generated {}x{} landmass in {ms:.2} ms", self.params.width, self.params.height);
                self.symbol_text = format_symbols(&landmass.symbols);
                self.landmass = Some(landmass);
                self.status_message = format!("Generated in {ms:.2} ms (seed {})", self.seed);
                self.refresh_texture(ctx);
            }
            Err(e) => {
                self.landmass = None;
                self.terrain_texture = None;
                self.symbol_text.clear();
                self.status_message = format!("Error: {e}");
            }
        }
    }

    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let Some(landmass) = &self.landmass else {
            return;
        };
        let size = [landmass.symbols.width(), landmass.symbols.height()];
        let rgb = match self.view {
            PreviewKind::Bands => symbols_to_rgb(&landmass.symbols),
            PreviewKind::Heights => heights_to_rgb(&landmass.normalized),
        };
        let color_image = ColorImage::from_rgb(size, &rgb);
        self.terrain_texture =
            Some(ctx.load_texture("landmass", color_image, egui::TextureOptions::NEAREST));
        ctx.request_repaint();
    }

    fn save_text(&mut self) {
        let Some(landmass) = &self.landmass else {
            return;
        };
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };
        self.status_message = match TextStore::init(dir) {
            Ok(store) => {
                let report = store.save_landmass(landmass);
                if report.all_saved() {
                    format!("Saved 3 maps to {}", store.dir().display())
                } else {
                    let (path, e) = &report.failed[0];
                    format!("Failed to save the map to {}: {e}", path.display())
                }
            }
            Err(e) => format!("Failed to save: {e}"),
        };
    }

    fn save_png(&mut self) {
        let Some(landmass) = &self.landmass else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("landmass_{}.png", self.seed))
            .add_filter("PNG", &["png"])
            .save_file()
        else {
            return;
        };
        self.status_message = match symbols_to_image(&landmass.symbols, PNG_SCALE).save(&path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => format!("Failed to save {}: {e}", path.display()),
        };
    }
}

impl App for TerrainApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("Landmass");
            ui.separator();

            ui.label("Grid");
            ui.add(egui::Slider::new(&mut self.params.width, 8..=256).text("width"));
            ui.add(egui::Slider::new(&mut self.params.height, 8..=256).text("height"));

            ui.label("Water level");
            ui.add(egui::Slider::new(&mut self.params.water_level, 40..=200));

            ui.label("Dirt balls");
            ui.add(egui::Slider::new(&mut self.params.radius, 2..=32).text("radius"));
            // power may not drop below the radius
            let min_power = self.params.radius;
            self.params.power = self.params.power.max(min_power);
            ui.add(egui::Slider::new(&mut self.params.power, min_power..=255).text("power"));
            ui.add(egui::Slider::new(&mut self.params.deposits, 0..=2000).text("count"));

            // Seed
            ui.label("Seed");
            ui.horizontal(|ui| {
                ui.add(egui::DragValue::new(&mut self.seed).speed(1.0));
                if ui.button("From clock").clicked() {
                    self.seed = time_seed();
                }
            });

            ui.separator();
            ui.label("Preview");
            let mut view_changed = false;
            view_changed |= ui
                .radio_value(&mut self.view, PreviewKind::Bands, "Terrain bands")
                .changed();
            view_changed |= ui
                .radio_value(&mut self.view, PreviewKind::Heights, "Normalized heights")
                .changed();
            if view_changed {
                self.refresh_texture(ctx);
            }

            ui.separator();

            if ui.button("Generate Terrain").clicked() {
                self.run_generation(ctx);
            }

            ui.add_enabled_ui(self.landmass.is_some(), |ui| {
                if ui.button("Save text maps…").clicked() {
                    self.save_text();
                }
                if ui.button("Save PNG…").clicked() {
                    self.save_png();
                }
            });

            ui.separator();
            ui.label(&self.status_message);

            ui.separator();
            ui.label("Legend");
            for t in Terrain::ALL {
                let [r, g, b] = t.preview_rgb();
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(r, g, b), "■");
                    ui.monospace(format!("{} {}", t.symbol(), t.name()));
                });
            }
        });

        // central display
        egui::CentralPanel::default().show(ctx, |ui| {
            let (Some(tex), Some(landmass)) = (&self.terrain_texture, &self.landmass) else {
                ui.centered_and_justified(|ui| {
                    ui.label("Click “Generate Terrain” to start");
                });
                return;
            };

            // keep cells square
            let available = ui.available_size() * Vec2::new(1.0, 0.6);
            let (w, h) = (landmass.symbols.width() as f32, landmass.symbols.height() as f32);
            let cell = (available.x / w).min(available.y / h).max(1.0);
            ui.image((tex.id(), Vec2::new(w * cell, h * cell)));

            ui.separator();
            egui::ScrollArea::both().show(ui, |ui| {
                ui.monospace(self.symbol_text.as_str());
            });
        });
    }
}

pub fn run_gui(seed: u64) -> Result<(), AppError> {
    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    run_native(
        "Landmass",
        opts,
        Box::new(move |_cc| Ok(Box::new(TerrainApp::new(seed)))),
    )?;
    Ok(())
}
