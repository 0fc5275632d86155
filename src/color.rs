use eframe::egui::Color32;

// ---------------------------------------------------------------------------
// Named chart colours
// ---------------------------------------------------------------------------

pub const SKY_BLUE: Color32 = Color32::from_rgb(0x87, 0xce, 0xeb);
pub const LIGHT_GREEN: Color32 = Color32::from_rgb(0x90, 0xee, 0x90);
// Blue at half opacity, premultiplied.
pub const SCATTER_BLUE: Color32 = Color32::from_rgba_premultiplied(0x00, 0x00, 0x80, 0x80);
pub const FIT_RED: Color32 = Color32::from_rgb(0xff, 0x00, 0x00);
pub const EDGE: Color32 = Color32::BLACK;

/// Pie slice colours, in slice order.
const SLICE_BASE: [Color32; 2] = [
    Color32::from_rgb(0xff, 0x99, 0x99),
    Color32::from_rgb(0x66, 0xb3, 0xff),
];

/// Colours for `n` pie slices in slice order, repeating the base pair.
pub fn slice_colors(n: usize) -> Vec<Color32> {
    SLICE_BASE.iter().copied().cycle().take(n).collect()
}
