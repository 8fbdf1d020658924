use iced_layershell::reexport::{Anchor, KeyboardInteractivity, Layer, NewLayerShellSettings};

use crate::motion::{Position, Size};
use crate::util;

const FALLBACK_SCREEN: Size = Size {
    width: 1920,
    height: 1080,
};

fn make_output_option(output: Option<&str>) -> iced_layershell::reexport::OutputOption {
    match output {
        Some(name) => iced_layershell::reexport::OutputOption::OutputName(name.to_string()),
        None => iced_layershell::reexport::OutputOption::None,
    }
}

/// Layer-shell margins `(top, right, bottom, left)` that put the top-left
/// corner of a top-left anchored surface at `pos`.
pub(crate) fn margin_for(pos: Position) -> (i32, i32, i32, i32) {
    (pos.y, 0, 0, pos.x)
}

/// A fixed-size overlay surface anchored to the top-left corner; its margins
/// act as the window position.
pub(crate) fn widget_settings(
    window: Size,
    pos: Position,
    output: Option<&str>,
) -> NewLayerShellSettings {
    NewLayerShellSettings {
        layer: Layer::Overlay,
        anchor: Anchor::Top | Anchor::Left,
        keyboard_interactivity: KeyboardInteractivity::None,
        exclusive_zone: Some(-1),
        size: Some((window.width.max(1) as u32, window.height.max(1) as u32)),
        margin: Some(margin_for(pos)),
        events_transparent: false,
        output_option: make_output_option(output),
        ..Default::default()
    }
}

/// Logical size of the target output (or the first one with a current mode).
/// Tries cosmic-randr first, then wlr-randr; falls back to 1920x1080.
pub(crate) fn probe_screen(output: Option<&str>) -> Size {
    let result = std::process::Command::new("cosmic-randr")
        .arg("list")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .or_else(|| {
            std::process::Command::new("wlr-randr")
                .output()
                .ok()
                .filter(|o| o.status.success())
        });
    let Some(result) = result else {
        log::warn!(
            "no randr tool found (tried cosmic-randr, wlr-randr); assuming {}x{}",
            FALLBACK_SCREEN.width,
            FALLBACK_SCREEN.height
        );
        return FALLBACK_SCREEN;
    };
    let stdout = String::from_utf8_lossy(&result.stdout);
    match parse_screen_size(&stdout, output) {
        Some(size) => {
            log::info!("screen size {}x{}", size.width, size.height);
            size
        }
        None => {
            log::warn!("could not read current mode from randr output; assuming 1920x1080");
            FALLBACK_SCREEN
        }
    }
}

#[derive(Default)]
struct OutputBlock {
    name: String,
    mode: Option<(i32, i32)>,
    scale: f32,
    rotated: bool,
}

impl OutputBlock {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scale: 1.0,
            ..Default::default()
        }
    }

    fn logical_size(&self) -> Option<Size> {
        let (w, h) = self.mode?;
        let scale = if self.scale > 0.0 { self.scale } else { 1.0 };
        let (w, h) = if self.rotated { (h, w) } else { (w, h) };
        Some(Size {
            width: (w as f32 / scale).round() as i32,
            height: (h as f32 / scale).round() as i32,
        })
    }
}

/// Parse `wlr-randr` / `cosmic-randr list` output. Output headers start at
/// column 0; modes, scale and transform are indented below them.
fn parse_screen_size(stdout: &str, target: Option<&str>) -> Option<Size> {
    let mut blocks: Vec<OutputBlock> = Vec::new();
    for raw in stdout.lines() {
        let line = util::strip_ansi(raw);
        if line.trim().is_empty() {
            continue;
        }
        if !line.starts_with(' ') && !line.starts_with('\t') {
            if let Some(name) = line.split_whitespace().next() {
                blocks.push(OutputBlock::new(name));
            }
            continue;
        }
        let Some(block) = blocks.last_mut() else {
            continue;
        };
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("Scale:") {
            block.scale = parse_scale(rest.trim()).unwrap_or(1.0);
        } else if let Some(rest) = trimmed.strip_prefix("Transform:") {
            let t = rest.trim();
            block.rotated = t.contains("90") || t.contains("270");
        } else if block.mode.is_none() && trimmed.contains("current") {
            block.mode = trimmed.split_whitespace().find_map(parse_mode);
        }
    }

    blocks
        .iter()
        .filter(|b| target.is_none_or(|t| b.name == t))
        .find_map(OutputBlock::logical_size)
}

fn parse_mode(token: &str) -> Option<(i32, i32)> {
    let (w, h) = token.split_once('x')?;
    let w = w.parse::<i32>().ok()?;
    let h = h.parse::<i32>().ok()?;
    (w > 0 && h > 0).then_some((w, h))
}

fn parse_scale(s: &str) -> Option<f32> {
    match s.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f32>().ok().map(|p| p / 100.0),
        None => s.parse::<f32>().ok(),
    }
}
