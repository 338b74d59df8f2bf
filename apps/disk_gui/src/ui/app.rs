use std::time::{Duration, Instant};

use arboard::Clipboard;
use cipher::DiskState;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::WorkerCommand;
use crate::controller::events::{err_label, UiEvent};
use crate::controller::orchestration::dispatch_worker_command;
use crate::ui::disk::{paint_disk, DiskGeometry, DiskStyle};

const COPY_FEEDBACK_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CopyTarget {
    Plaintext,
    Ciphertext,
}

pub struct CipherDiskApp {
    cmd_tx: Sender<WorkerCommand>,
    ui_rx: Receiver<UiEvent>,
    disk: DiskState,
    geometry: DiskGeometry,
    /// Local mirrors of the two linked buffers, fed to the text widgets
    /// and written back through [`DiskState`] on every edit.
    plaintext_buffer: String,
    ciphertext_buffer: String,
    status: String,
    /// Manifest paths reported by the last completed install.
    cached_assets: Vec<String>,
    probe_path: String,
    copy_feedback: Option<(CopyTarget, Instant)>,
}

fn activation_status(removed: &[String]) -> String {
    if removed.is_empty() {
        "Offline cache active".to_string()
    } else {
        format!(
            "Offline cache active; removed stale generations: {}",
            removed.join(", ")
        )
    }
}

fn probe_status(path: &str, bytes: usize, from_cache: bool) -> String {
    let origin = if from_cache { "cache" } else { "source" };
    format!("'{path}': {bytes} B served from {origin}")
}

impl CipherDiskApp {
    pub fn new(cmd_tx: Sender<WorkerCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            disk: DiskState::new(),
            geometry: DiskGeometry::new(),
            plaintext_buffer: String::new(),
            ciphertext_buffer: String::new(),
            status: "Starting...".to_string(),
            cached_assets: Vec::new(),
            probe_path: String::new(),
            copy_feedback: None,
        }
    }

    fn refresh_buffers(&mut self) {
        self.plaintext_buffer = self.disk.plaintext().to_string();
        self.ciphertext_buffer = self.disk.ciphertext().to_string();
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::CacheInstalled { assets } => {
                    self.status = format!("Offline cache installed ({} assets)", assets.len());
                    self.cached_assets = assets;
                    if self.probe_path.is_empty() {
                        if let Some(first) = self.cached_assets.first() {
                            self.probe_path = first.clone();
                        }
                    }
                    // A finished install makes the new generation current;
                    // older generations can go.
                    dispatch_worker_command(
                        &self.cmd_tx,
                        WorkerCommand::Activate,
                        &mut self.status,
                    );
                }
                UiEvent::CacheActivated { removed } => {
                    self.status = activation_status(&removed);
                }
                UiEvent::ProbeLoaded {
                    path,
                    bytes,
                    from_cache,
                } => {
                    self.status = probe_status(&path, bytes, from_cache);
                }
                UiEvent::Error(err) => {
                    self.status = format!("{} error: {}", err_label(err.category()), err.message());
                }
            }
        }
    }

    fn copy_to_clipboard(&mut self, target: CopyTarget) {
        let text = match target {
            CopyTarget::Plaintext => self.disk.plaintext(),
            CopyTarget::Ciphertext => self.disk.ciphertext(),
        };
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string())) {
            Ok(()) => {
                self.copy_feedback = Some((target, Instant::now()));
            }
            Err(err) => {
                self.status = format!("Clipboard error: {err}");
            }
        }
    }

    fn copy_feedback_visible(&self, target: CopyTarget) -> bool {
        matches!(
            self.copy_feedback,
            Some((t, at)) if t == target && at.elapsed() < COPY_FEEDBACK_DURATION
        )
    }

    fn show_disk_column(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let side = ui.available_width().min(440.0);
            let (response, painter) =
                ui.allocate_painter(egui::vec2(side, side), egui::Sense::hover());
            let visuals = ui.visuals();
            let style = DiskStyle {
                letter_color: visuals.strong_text_color(),
                reference_color: egui::Color32::from_rgb(204, 60, 50),
                tick_stroke: egui::Stroke::new(1.0, visuals.weak_text_color()),
                rim_stroke: egui::Stroke::new(1.5, visuals.text_color()),
            };
            paint_disk(
                &painter,
                response.rect,
                &self.geometry,
                self.disk.cumulative_angle(),
                &style,
            );

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                    if ui.button("\u{27f2} Left").clicked() {
                        self.disk.rotate(-1);
                        self.refresh_buffers();
                    }
                    if ui.button("Right \u{27f3}").clicked() {
                        self.disk.rotate(1);
                        self.refresh_buffers();
                    }
                    ui.label(format!("Shift: {}", self.disk.shift()));
                    if ui.button("Reset").clicked() {
                        self.disk.reset();
                        self.refresh_buffers();
                    }
                });
            });
        });
    }

    fn show_text_pair(&mut self, ui: &mut egui::Ui) {
        self.show_text_area(ui, CopyTarget::Plaintext);
        ui.add_space(10.0);
        self.show_text_area(ui, CopyTarget::Ciphertext);
    }

    fn show_text_area(&mut self, ui: &mut egui::Ui, target: CopyTarget) {
        let (heading, salt) = match target {
            CopyTarget::Plaintext => ("Plaintext", "plaintext_area"),
            CopyTarget::Ciphertext => ("Ciphertext", "ciphertext_area"),
        };

        ui.horizontal(|ui| {
            ui.strong(heading);
            if ui.button("Copy").clicked() {
                self.copy_to_clipboard(target);
            }
            if self.copy_feedback_visible(target) {
                ui.colored_label(egui::Color32::from_rgb(80, 160, 80), "OK!");
            }
            let buffer_non_empty = match target {
                CopyTarget::Plaintext => !self.plaintext_buffer.is_empty(),
                CopyTarget::Ciphertext => !self.ciphertext_buffer.is_empty(),
            };
            if buffer_non_empty && ui.button("Clear").clicked() {
                // Either clear button empties both sides.
                self.disk.clear();
                self.refresh_buffers();
            }
        });

        let buffer = match target {
            CopyTarget::Plaintext => &mut self.plaintext_buffer,
            CopyTarget::Ciphertext => &mut self.ciphertext_buffer,
        };
        let edit = egui::TextEdit::multiline(buffer)
            .id_salt(salt)
            .desired_rows(5)
            .desired_width(f32::INFINITY);
        if ui.add(edit).changed() {
            match target {
                CopyTarget::Plaintext => {
                    let text = self.plaintext_buffer.clone();
                    self.disk.edit_plaintext(text);
                }
                CopyTarget::Ciphertext => {
                    let text = self.ciphertext_buffer.clone();
                    self.disk.edit_ciphertext(text);
                }
            }
            self.refresh_buffers();
        }
    }

    fn show_cache_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(&self.status);
        });
        ui.horizontal(|ui| {
            ui.label("Asset:");
            egui::ComboBox::from_id_salt("probe_asset")
                .selected_text(if self.probe_path.is_empty() {
                    "(no cached assets)"
                } else {
                    self.probe_path.as_str()
                })
                .show_ui(ui, |ui| {
                    for path in &self.cached_assets {
                        ui.selectable_value(&mut self.probe_path, path.clone(), path);
                    }
                });
            if ui.button("Fetch").clicked() && !self.probe_path.is_empty() {
                dispatch_worker_command(
                    &self.cmd_tx,
                    WorkerCommand::Probe {
                        path: self.probe_path.clone(),
                    },
                    &mut self.status,
                );
            }
            if ui.button("Reinstall cache").clicked() {
                dispatch_worker_command(&self.cmd_tx, WorkerCommand::Install, &mut self.status);
            }
        });
    }
}

impl eframe::App for CipherDiskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("cache_bar").show(ctx, |ui| {
            self.show_cache_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Cipher Disk");
            ui.add_space(4.0);
            ui.columns(2, |columns| {
                self.show_disk_column(&mut columns[0]);
                self.show_text_pair(&mut columns[1]);
            });
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
