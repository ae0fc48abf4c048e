//! PNG and animated PNG previews of logical frames, for host builds.
//!
//! Each LED is drawn as a soft-edged disc on black, so previews look like the lit panel
//! rather than a grid of squares.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder, ScaledFloat};

use crate::led2d::Frame2d;
use crate::led_strip::RGB8;

type PreviewResult<T> = core::result::Result<T, Box<dyn Error>>;

/// How previews are sized and tone-mapped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewOptions {
    /// Upper bound on the image's larger dimension, in pixels.
    pub max_dimension: u32,
    /// Exponent turning 8-bit LED values into linear light. LEDs look brighter than their
    /// values suggest; 2.2 approximates that.
    pub inverse_gamma: f32,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            max_dimension: 640,
            inverse_gamma: 2.2,
        }
    }
}

/// Write one frame as a PNG. Returns the image's `(width, height)`.
///
/// # Errors
///
/// Returns I/O and encoder errors.
pub fn write_frame_png<const W: usize, const H: usize>(
    frame: &Frame2d<W, H>,
    output_path: impl AsRef<Path>,
    options: PreviewOptions,
) -> PreviewResult<(u32, u32)> {
    let geometry = Geometry::fit(W, H, options.max_dimension)?;
    let pixels = geometry.rasterize(frame, options.inverse_gamma);

    let mut encoder = new_encoder(output_path.as_ref(), &geometry)?;
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    Ok((geometry.width, geometry.height))
}

/// Write `frames` as a looping animated PNG, each shown for `frame_delay_ms`.
///
/// # Errors
///
/// Returns I/O and encoder errors, or an error for an empty frame list.
pub fn write_frames_apng<const W: usize, const H: usize>(
    frames: &[Frame2d<W, H>],
    output_path: impl AsRef<Path>,
    options: PreviewOptions,
    frame_delay_ms: u16,
) -> PreviewResult<(u32, u32)> {
    if frames.is_empty() {
        return Err("an animation needs at least one frame".into());
    }
    let geometry = Geometry::fit(W, H, options.max_dimension)?;

    let mut encoder = new_encoder(output_path.as_ref(), &geometry)?;
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    encoder.set_animated(u32::try_from(frames.len())?, 0)?;
    let mut writer = encoder.write_header()?;
    for frame in frames {
        writer.set_frame_delay(frame_delay_ms, 1000)?;
        writer.write_image_data(&geometry.rasterize(frame, options.inverse_gamma))?;
    }
    writer.finish()?;
    Ok((geometry.width, geometry.height))
}

fn new_encoder(
    output_path: &Path,
    geometry: &Geometry,
) -> PreviewResult<Encoder<'static, BufWriter<File>>> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), geometry.width, geometry.height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    Ok(encoder)
}

/// Cell layout of a preview image: one `cell`-sized square per LED plus a border.
struct Geometry {
    columns: u32,
    rows: u32,
    cell: u32,
    radius: u32,
    width: u32,
    height: u32,
}

impl Geometry {
    fn fit(columns: usize, rows: usize, max_dimension: u32) -> PreviewResult<Self> {
        let columns = u32::try_from(columns)?;
        let rows = u32::try_from(rows)?;
        // Largest cell size whose image fits; a disc needs a cell of at least 4.
        let mut cell = max_dimension / columns.max(rows).max(1);
        while cell >= 4 {
            let geometry = Self::with_cell(columns, rows, cell);
            if geometry.width.max(geometry.height) <= max_dimension {
                return Ok(geometry);
            }
            cell -= 1;
        }
        Err("max_dimension too small for a preview".into())
    }

    const fn with_cell(columns: u32, rows: u32, cell: u32) -> Self {
        let margin = if cell / 8 > 1 { cell / 8 } else { 1 };
        let radius = (cell - margin * 2) / 2;
        Self {
            columns,
            rows,
            cell,
            radius,
            width: columns * cell + radius * 2,
            height: rows * cell + radius * 2,
        }
    }

    /// 16-bit big-endian RGB samples, row by row.
    fn rasterize<const W: usize, const H: usize>(
        &self,
        frame: &Frame2d<W, H>,
        inverse_gamma: f32,
    ) -> Vec<u8> {
        let mut bytes = vec![0u8; (self.width * self.height * 6) as usize];
        let center = (self.cell as f32 - 1.0) / 2.0;
        let outer = self.radius as f32;
        let inner = outer * 2.0 / 3.0;

        for row in 0..self.rows {
            for column in 0..self.columns {
                let color = frame.0[row as usize][column as usize];
                if color == RGB8::default() {
                    continue;
                }
                let linear = [color.r, color.g, color.b]
                    .map(|channel| (f32::from(channel) / 255.0).powf(inverse_gamma));

                for local_y in 0..self.cell {
                    for local_x in 0..self.cell {
                        let dx = local_x as f32 - center;
                        let dy = local_y as f32 - center;
                        let distance = (dx * dx + dy * dy).sqrt();
                        if distance > outer {
                            continue;
                        }
                        let intensity = if distance <= inner {
                            1.0
                        } else {
                            1.0 - (distance - inner) / (outer - inner)
                        };
                        let x = self.radius + column * self.cell + local_x;
                        let y = self.radius + row * self.cell + local_y;
                        let offset = ((y * self.width + x) * 6) as usize;
                        for (channel_index, value) in linear.iter().enumerate() {
                            let sample =
                                ((value * intensity).clamp(0.0, 1.0) * 65535.0).round() as u16;
                            let at = offset + channel_index * 2;
                            bytes[at..at + 2].copy_from_slice(&sample.to_be_bytes());
                        }
                    }
                }
            }
        }
        bytes
    }
}
