//! Peak envelope extraction and the bar-chart waveform layout drawn from it.

use crate::types::{Rgba, TrimWindow};

pub const BAR_WIDTH: f32 = 2.0;
pub const BAR_GAP: f32 = 1.0;
pub const MIN_BAR_HEIGHT: f32 = 2.0;
pub const HEIGHT_SCALE: f32 = 0.9;
pub const HANDLE_WIDTH: f32 = 2.0;

/// zinc-700
pub const DIMMED: Rgba = Rgba::rgb(0x3f, 0x3f, 0x46);
pub const OVERLAY: Rgba = Rgba {
    r: 0xff,
    g: 0xff,
    b: 0xff,
    a: 0.1,
};
pub const HANDLE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);

/// Reduce `samples` to `bar_count` peak amplitudes.
///
/// The input is cut into `bar_count` chunks of `len / bar_count` samples
/// (a trailing partial chunk is ignored) and each chunk yields its maximum
/// absolute value. When there are fewer samples than bars every peak is `0`.
pub fn extract_envelope(samples: &[f32], bar_count: usize) -> Vec<f32> {
    if bar_count == 0 {
        return Vec::new();
    }
    let chunk = samples.len() / bar_count;
    if chunk == 0 {
        return vec![0.0; bar_count];
    }

    samples
        .chunks_exact(chunk)
        .take(bar_count)
        .map(|c| {
            c.iter().fold(0.0f32, |max, &s| {
                let a = s.abs();
                // NaN compares false and never wins
                if a > max {
                    a
                } else {
                    max
                }
            })
        })
        .collect()
}

/// Number of bars that fit a canvas `width` pixels wide.
pub fn bar_count_for_width(width: u32) -> usize {
    (width as f32 / (BAR_WIDTH + BAR_GAP)).floor() as usize
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub rect: Rect,
    pub peak: f32,
    pub fill: Rgba,
    pub dimmed: bool,
}

/// Canvas size and the color used for bars inside the trim window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveformStyle {
    pub width: u32,
    pub height: u32,
    pub color: Rgba,
}

impl WaveformStyle {
    pub fn new(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            color,
        }
    }
}

/// Everything needed to paint a waveform, in draw order: bars, then overlays, then handles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaveformLayout {
    pub bars: Vec<Bar>,
    pub overlays: Vec<Rect>,
    pub handles: Vec<Rect>,
}

pub fn layout_waveform(samples: &[f32], style: &WaveformStyle, trim: &TrimWindow) -> WaveformLayout {
    let width = style.width as f32;
    let height = style.height as f32;
    let total = bar_count_for_width(style.width);
    let peaks = extract_envelope(samples, total);

    log::debug!(
        "waveform layout: {} samples -> {} bars on {}x{}",
        samples.len(),
        total,
        style.width,
        style.height
    );

    let bars = peaks
        .iter()
        .enumerate()
        .map(|(i, &peak)| {
            let h = (peak * height * HEIGHT_SCALE)
                .max(MIN_BAR_HEIGHT)
                .min(height)
                .max(0.0);
            let progress = i as f32 / total as f32;
            let dimmed = !trim.contains(progress);
            Bar {
                rect: Rect {
                    x: i as f32 * (BAR_WIDTH + BAR_GAP),
                    y: (height - h) / 2.0,
                    width: BAR_WIDTH,
                    height: h,
                },
                peak,
                fill: if dimmed { DIMMED } else { style.color },
                dimmed,
            }
        })
        .collect();

    let mut overlays = Vec::new();
    let mut handles = Vec::new();

    if trim.start() > 0.0 {
        let edge = width * trim.start();
        overlays.push(Rect {
            x: 0.0,
            y: 0.0,
            width: edge,
            height,
        });
        handles.push(clip_to_canvas(
            Rect {
                x: edge,
                y: 0.0,
                width: HANDLE_WIDTH,
                height,
            },
            width,
        ));
    }

    if trim.end() < 1.0 {
        let edge = width * trim.end();
        overlays.push(Rect {
            x: edge,
            y: 0.0,
            width: width * (1.0 - trim.end()),
            height,
        });
        handles.push(clip_to_canvas(
            Rect {
                x: edge - HANDLE_WIDTH,
                y: 0.0,
                width: HANDLE_WIDTH,
                height,
            },
            width,
        ));
    }

    WaveformLayout {
        bars,
        overlays,
        handles,
    }
}

fn clip_to_canvas(rect: Rect, canvas_width: f32) -> Rect {
    let x = rect.x.clamp(0.0, canvas_width);
    let right = (rect.x + rect.width).clamp(0.0, canvas_width);
    Rect {
        x,
        width: right - x,
        ..rect
    }
}
