use std::time::Duration;

/// Tunables for the viewer window, chart, notifications and image export.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Chart height in points.
    pub chart_height: f32,
    pub line_width: f32,
    pub point_radius: f32,
    /// Nesting levels of the raw JSON tree that start expanded.
    pub json_expand_depth: usize,
    pub notification_millis: u64,
    /// Output pixels per logical point for exported images.
    pub export_pixel_ratio: f32,
    pub jpeg_quality: u8,
    pub export_file_name: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_size: [1200.0, 900.0],
            min_window_size: [640.0, 480.0],
            chart_height: 400.0,
            line_width: 2.0,
            point_radius: 3.0,
            json_expand_depth: 3,
            notification_millis: 3000,
            export_pixel_ratio: 2.0,
            jpeg_quality: 95,
            export_file_name: "chart.jpg".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_millis)
    }
}
