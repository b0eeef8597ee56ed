use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use eframe::egui;

use crate::config::ViewerConfig;
use crate::data::ingest::{self, IngestError, IngestResult, Ingested};
use crate::export::{self, ExportError, ExportKind};
use crate::state::notification::Notifications;
use crate::state::theme::Theme;
use crate::state::viewer::ViewerState;
use crate::ui::chart_panel::{self, ChartView, ToolbarAction};
use crate::ui::json_tree;
use crate::ui::settings_panel::{self, FieldPickerState};
use crate::ui::toast;
use crate::ui::upload_panel::{self, UploadAction};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pending background file read.
struct PendingLoad {
    source: String,
    result: Arc<Mutex<Option<IngestResult<Ingested>>>>,
}

/// The main viewer application.
pub struct TrainerVizApp {
    config: ViewerConfig,
    theme: Theme,
    viewer: ViewerState,
    view: ChartView,
    field_picker: FieldPickerState,
    notifications: Notifications,
    /// File read in progress.
    pending_load: Option<PendingLoad>,
    /// Export waiting for the screenshot requested last frame.
    pending_capture: Option<ExportKind>,
    /// Screen rect of the chart frame (set each frame for screenshot cropping).
    chart_rect: Option<egui::Rect>,
}

impl TrainerVizApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig) -> Self {
        let app = Self::with_config(config);

        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::proportional(15.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::proportional(22.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Monospace,
            egui::FontId::monospace(13.5),
        );
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        ctx.set_style(style);
        ctx.set_visuals(app.theme.visuals());
        app
    }

    fn with_config(config: ViewerConfig) -> Self {
        let notifications = Notifications::new(config.notification_duration());
        Self {
            config,
            theme: Theme::default(),
            viewer: ViewerState::new(),
            view: ChartView::default(),
            field_picker: FieldPickerState::default(),
            notifications,
            pending_load: None,
            pending_capture: None,
            chart_rect: None,
        }
    }

    /// Open a native file dialog and, on success, read the file.
    fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .add_filter("All Files", &["*"])
            .pick_file()
        {
            self.load_file(&path);
        }
    }

    /// Read and validate a file on a worker thread so the UI stays responsive.
    /// The result is installed by [`Self::poll_pending_load`].
    fn load_file(&mut self, path: &Path) {
        let path_buf = path.to_path_buf();
        let source = display_name(path);
        let result: Arc<Mutex<Option<IngestResult<Ingested>>>> = Arc::new(Mutex::new(None));
        let result_clone = Arc::clone(&result);

        tracing::info!("Reading {:?}", path_buf);
        std::thread::spawn(move || {
            let loaded = ingest::read_log_file(&path_buf);
            if let Ok(mut slot) = result_clone.lock() {
                *slot = Some(loaded);
            }
        });

        self.pending_load = Some(PendingLoad { source, result });
    }

    fn poll_pending_load(&mut self) {
        let Some(pending) = &self.pending_load else {
            return;
        };
        let finished = match pending.result.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => Some(Err(IngestError::Io(std::io::Error::other(
                "file reader thread panicked",
            )))),
        };
        let Some(result) = finished else {
            return;
        };

        let source = pending.source.clone();
        self.pending_load = None;
        if let Err(IngestError::Io(e)) = &result {
            tracing::error!("Failed to read {source}: {e}");
        }
        self.viewer.finish_load(source, result);
        self.view = ChartView::Chart;
        self.field_picker = FieldPickerState::default();
    }

    fn reset(&mut self) {
        tracing::info!("Reset viewer");
        // A read still in flight must not land after the reset.
        self.pending_load = None;
        self.viewer.reset();
        self.view = ChartView::Chart;
        self.field_picker = FieldPickerState::default();
        self.chart_rect = None;
    }

    fn request_capture(&mut self, ctx: &egui::Context, kind: ExportKind) {
        if self.chart_rect.is_none() {
            return;
        }
        self.pending_capture = Some(kind);
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
    }

    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        let Some(kind) = self.pending_capture else {
            return;
        };
        let mut screenshot: Option<Arc<egui::ColorImage>> = None;
        ctx.input(|i| {
            for event in &i.raw.events {
                if let egui::Event::Screenshot { image, .. } = event {
                    screenshot = Some(image.clone());
                }
            }
        });
        let Some(screenshot) = screenshot else {
            return;
        };
        self.pending_capture = None;

        match self.export_capture(kind, &screenshot, ctx.pixels_per_point()) {
            Ok(true) => {
                tracing::info!("{}", kind.success_message());
                self.notifications.success(kind.success_message());
            }
            Ok(false) => {}
            Err(e) => {
                tracing::error!("{}: {e}", kind.failure_message());
                self.notifications.error(kind.failure_message());
            }
        }
    }

    /// Returns `Ok(false)` when the user cancelled the save dialog.
    fn export_capture(
        &self,
        kind: ExportKind,
        screenshot: &egui::ColorImage,
        pixels_per_point: f32,
    ) -> Result<bool, ExportError> {
        let rect = self.chart_rect.ok_or(ExportError::EmptyCapture)?;
        let image = export::crop_rgba(screenshot, rect, pixels_per_point)?;
        let image =
            export::scale_to_pixel_ratio(image, pixels_per_point, self.config.export_pixel_ratio);

        match kind {
            ExportKind::Clipboard => {
                export::copy_to_clipboard(&image)?;
                Ok(true)
            }
            ExportKind::Jpeg => {
                let Some(path) = rfd::FileDialog::new()
                    .set_file_name(&self.config.export_file_name)
                    .add_filter("JPEG Image", &["jpg", "jpeg"])
                    .save_file()
                else {
                    return Ok(false);
                };
                export::save_jpeg(&image, self.config.jpeg_quality, &path)?;
                tracing::info!("Saved chart to {:?}", path);
                Ok(true)
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let mut dropped_paths: Vec<PathBuf> = Vec::new();
        let mut dropped_bytes: Vec<(String, Arc<[u8]>)> = Vec::new();
        ctx.input(|i| {
            for file in &i.raw.dropped_files {
                if let Some(path) = &file.path {
                    dropped_paths.push(path.clone());
                } else if let Some(bytes) = &file.bytes {
                    dropped_bytes.push((file.name.clone(), bytes.clone()));
                }
            }
        });

        // Only the last dropped file wins; each load supersedes the previous.
        if let Some(path) = dropped_paths.last() {
            self.load_file(path);
        } else if let Some((name, bytes)) = dropped_bytes.last() {
            self.pending_load = None;
            self.viewer.load_bytes(name.clone(), bytes);
        }
    }

    fn show_loaded(&mut self, ui: &mut egui::Ui) -> ToolbarAction {
        let action = ui
            .horizontal(|ui| {
                if let Some(loaded) = self.viewer.loaded() {
                    ui.label(egui::RichText::new(&loaded.source).weak());
                }
                chart_panel::show_toolbar(ui)
            })
            .inner;

        self.chart_rect = Some(chart_panel::show_chart_section(
            ui,
            &self.viewer,
            &mut self.view,
            &self.config,
        ));

        ui.add_space(16.0);
        let changes = settings_panel::show_settings_panel(ui, &self.viewer, &mut self.field_picker);
        settings_panel::apply_changes(&mut self.viewer, changes);

        ui.add_space(20.0);
        ui.heading("Uploaded JSON");
        ui.add_space(4.0);
        if let Some(loaded) = self.viewer.loaded() {
            ui.scope(|ui| {
                ui.visuals_mut().override_text_color = Some(self.theme.muted_text());
                json_tree::show_json_tree(ui, &loaded.document, self.config.json_expand_depth);
            });
        }

        action
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl eframe::App for TrainerVizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.theme.visuals());

        // ------------------------------------------------------------------
        // 0. Screenshot from an export requested last frame
        // ------------------------------------------------------------------
        self.handle_screenshot(ctx);

        // ------------------------------------------------------------------
        // 1. New input files
        // ------------------------------------------------------------------
        self.handle_dropped_files(ctx);
        self.poll_pending_load();

        // --- Header panel ---
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 8)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Trainer State Visualizer");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(self.theme.toggle_label()).clicked() {
                            self.theme = self.theme.toggle();
                        }
                        ui.separator();
                        ui.small(format!("v{VERSION}"));
                    });
                });
            });

        // ------------------------------------------------------------------
        // 2. Main content
        // ------------------------------------------------------------------
        let mut upload_action = UploadAction::None;
        let mut toolbar_action = ToolbarAction::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if self.viewer.is_loaded() {
                    toolbar_action = self.show_loaded(ui);
                } else {
                    self.chart_rect = None;
                    upload_action =
                        upload_panel::show_upload_panel(ui, self.viewer.error(), &self.theme);
                }
            });
        });

        match upload_action {
            UploadAction::OpenFile => self.open_file_dialog(),
            UploadAction::Reset => self.reset(),
            UploadAction::None => {}
        }
        match toolbar_action {
            ToolbarAction::Copy => self.request_capture(ctx, ExportKind::Clipboard),
            ToolbarAction::Export => self.request_capture(ctx, ExportKind::Jpeg),
            ToolbarAction::Reset => self.reset(),
            ToolbarAction::None => {}
        }

        // Show loading indicator
        if self.pending_load.is_some() {
            egui::Window::new("Loading")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading file...");
                    });
                });
            ctx.request_repaint();
        }

        // ------------------------------------------------------------------
        // 3. Transient notification
        // ------------------------------------------------------------------
        let now = Instant::now();
        if let Some(notification) = self.notifications.active(now) {
            if toast::show_toast(ctx, notification) {
                self.notifications.dismiss();
            }
        }
        if let Some(remaining) = self.notifications.remaining(now) {
            ctx.request_repaint_after(remaining);
        }
    }
}
