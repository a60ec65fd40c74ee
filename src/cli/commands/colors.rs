//! `list-colors`: print the colors the Hue bridge client can show.

use anyhow::Result;
use comfy_table::{Cell, Color};
use serde::Serialize;

use crate::cli::display::{list_table, output, render_list, CommandOutput};
use crate::domain::models::LightColor;
use crate::infrastructure::hue::HueClient;

/// Supported colors, in listing order.
#[derive(Debug, Serialize)]
pub struct ColorList {
    /// Color tokens with their chromaticity
    pub colors: Vec<ColorEntry>,
}

/// One listed color.
#[derive(Debug, Serialize)]
pub struct ColorEntry {
    /// The color, serialized as its configuration token
    #[serde(rename = "name")]
    pub color: LightColor,
    /// CIE 1931 chromaticity sent to the bridge
    pub xy: [f32; 2],
}

impl ColorList {
    /// List `colors` in the given order
    pub fn new(colors: &[LightColor]) -> Self {
        Self {
            colors: colors
                .iter()
                .map(|&color| ColorEntry {
                    color,
                    xy: color.xy(),
                })
                .collect(),
        }
    }
}

impl CommandOutput for ColorList {
    fn to_human(&self) -> String {
        let mut table = list_table(&["color", "x", "y"]);
        for entry in &self.colors {
            table.add_row(vec![
                Cell::new(entry.color.token()).fg(terminal_color(entry.color)),
                Cell::new(format!("{:.4}", entry.xy[0])),
                Cell::new(format!("{:.4}", entry.xy[1])),
            ]);
        }
        render_list("color", &table, self.colors.len())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self
            .colors
            .iter()
            .map(|entry| entry.color.token())
            .collect::<Vec<_>>())
    }
}

const fn terminal_color(color: LightColor) -> Color {
    match color {
        LightColor::Red => Color::Red,
        LightColor::Green => Color::Green,
        LightColor::Blue => Color::Blue,
        LightColor::White => Color::White,
        LightColor::Yellow => Color::Yellow,
        LightColor::Orange => Color::DarkYellow,
        LightColor::Purple => Color::DarkMagenta,
        LightColor::Pink => Color::Magenta,
        LightColor::Cyan => Color::Cyan,
    }
}

/// Print the supported colors.
///
/// Needs no configuration: the color set is fixed by the light backend.
pub fn execute(json_mode: bool) -> Result<()> {
    output(&ColorList::new(HueClient::SUPPORTED_COLORS), json_mode);
    Ok(())
}
