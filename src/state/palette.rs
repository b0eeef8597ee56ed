use egui::Color32;

/// Line colours, assigned by position in the field selection.
pub const PALETTE: [Color32; 16] = [
    Color32::from_rgb(0x88, 0x84, 0xd8),
    Color32::from_rgb(0x82, 0xca, 0x9d),
    Color32::from_rgb(0xff, 0xc6, 0x58),
    Color32::from_rgb(0xff, 0x73, 0x00),
    Color32::from_rgb(0x41, 0x3e, 0xa0),
    Color32::from_rgb(0xff, 0x00, 0x00),
    Color32::from_rgb(0x00, 0xff, 0x00),
    Color32::from_rgb(0x00, 0x00, 0xff),
    Color32::from_rgb(0xff, 0xa5, 0x00),
    Color32::from_rgb(0x80, 0x00, 0x80),
    Color32::from_rgb(0x00, 0x80, 0x80),
    Color32::from_rgb(0xdc, 0x14, 0x3c),
    Color32::from_rgb(0x20, 0xb2, 0xaa),
    Color32::from_rgb(0xff, 0x00, 0xff),
    Color32::from_rgb(0x80, 0x80, 0x00),
    Color32::from_rgb(0x00, 0xce, 0xd1),
];

pub fn color_for_index(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}
