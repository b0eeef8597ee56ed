use egui::Color32;

use crate::data::ingest::{self, Ingested, IngestResult};
use crate::data::log::{is_reserved, Document, LogHistory, XKey};
use crate::data::reshape::{self, PlotTable};
use crate::state::palette::color_for_index;

/// A successfully ingested upload.
#[derive(Debug, Clone)]
pub struct LoadedLog {
    pub document: Document,
    pub log_history: LogHistory,
    /// File name the log came from, for display.
    pub source: String,
}

/// Everything the viewer shows, derived from the loaded log and the two user
/// choices (x-axis and field selection). The plot table is rebuilt from scratch
/// whenever any of those three inputs change.
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    loaded: Option<LoadedLog>,
    error: Option<String>,
    x_key: XKey,
    available_fields: Vec<String>,
    selected_fields: Vec<String>,
    plot_table: PlotTable,
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current log with the one in `raw`.
    ///
    /// Old state is cleared before validation, so a rejected upload leaves the
    /// viewer empty with an error message rather than showing the stale log.
    pub fn load_text(&mut self, source: impl Into<String>, raw: &str) -> bool {
        self.finish_load(source, ingest::ingest(raw))
    }

    /// Like [`Self::load_text`] for raw file bytes, which must be UTF-8.
    pub fn load_bytes(&mut self, source: impl Into<String>, bytes: &[u8]) -> bool {
        self.finish_load(source, ingest::ingest_bytes(bytes))
    }

    /// Install the outcome of an ingestion that ran elsewhere (e.g. a worker
    /// thread reading from disk). Returns whether a log is now loaded.
    pub fn finish_load(&mut self, source: impl Into<String>, result: IngestResult<Ingested>) -> bool {
        let source = source.into();
        self.reset();

        match result {
            Ok(Ingested {
                log_history,
                document,
            }) => {
                tracing::info!(
                    "Loaded {} with {} log_history entries",
                    source,
                    log_history.len()
                );
                self.install(LoadedLog {
                    document,
                    log_history,
                    source,
                });
                true
            }
            Err(e) => {
                tracing::warn!("Rejected {source}: {e}");
                self.error = Some(e.to_string());
                false
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn install(&mut self, loaded: LoadedLog) {
        let fields = reshape::derive_field_set(&loaded.log_history);
        let defaults = reshape::derive_defaults(&loaded.log_history, &fields);
        self.available_fields = fields;
        self.selected_fields = defaults.selected_fields;
        self.x_key = defaults.x_key;
        self.loaded = Some(loaded);
        self.error = None;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.plot_table = match &self.loaded {
            Some(loaded) => {
                reshape::reshape(&loaded.log_history, self.x_key, &self.selected_fields)
            }
            None => PlotTable::new(),
        };
        tracing::debug!(
            "Reshaped to {} rows on {} with {} fields",
            self.plot_table.len(),
            self.x_key,
            self.selected_fields.len()
        );
    }

    pub fn set_x_key(&mut self, x_key: XKey) {
        if self.x_key != x_key {
            self.x_key = x_key;
            self.recompute();
        }
    }

    /// Replace the selection. Order is display order; reserved names and
    /// duplicates are dropped.
    pub fn set_selected_fields(&mut self, fields: Vec<String>) {
        let mut selected: Vec<String> = Vec::with_capacity(fields.len());
        for field in fields {
            if !is_reserved(&field) && !selected.contains(&field) {
                selected.push(field);
            }
        }
        if selected != self.selected_fields {
            self.selected_fields = selected;
            self.recompute();
        }
    }

    pub fn select_field(&mut self, field: &str) {
        let mut fields = self.selected_fields.clone();
        fields.push(field.to_string());
        self.set_selected_fields(fields);
    }

    pub fn deselect_field(&mut self, field: &str) {
        let fields = self
            .selected_fields
            .iter()
            .filter(|f| f.as_str() != field)
            .cloned()
            .collect();
        self.set_selected_fields(fields);
    }

    pub fn loaded(&self) -> Option<&LoadedLog> {
        self.loaded.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn x_key(&self) -> XKey {
        self.x_key
    }

    pub fn available_fields(&self) -> &[String] {
        &self.available_fields
    }

    pub fn selected_fields(&self) -> &[String] {
        &self.selected_fields
    }

    pub fn plot_table(&self) -> &PlotTable {
        &self.plot_table
    }

    /// Selected fields paired with their line colour.
    pub fn series(&self) -> impl Iterator<Item = (&str, Color32)> {
        self.selected_fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.as_str(), color_for_index(i)))
    }
}
