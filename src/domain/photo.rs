//! Photo editing: resizing, sticker and text stamping

use crate::error::{DiaryError, Result};
use ab_glyph::{FontArc, PxScale};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgba};
use imageproc::drawing::{draw_text_mut, text_size};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Gap between a corner-placed stamp and the photo edge, in pixels
const STICKER_MARGIN: i64 = 16;

/// DejaVu Sans, see assets/fonts/LICENSE
const EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

const STAMP_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Where a sticker or stamped text lands on the photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StickerPlacement {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
    Center,
    /// Explicit offset of the sticker's top-left corner
    At { x: i64, y: i64 },
}

impl StickerPlacement {
    /// Resolve to the sticker's top-left offset on a photo of the given size
    fn offset(&self, photo: (u32, u32), sticker: (u32, u32)) -> (i64, i64) {
        let (pw, ph) = (i64::from(photo.0), i64::from(photo.1));
        let (sw, sh) = (i64::from(sticker.0), i64::from(sticker.1));
        let right = (pw - sw - STICKER_MARGIN).max(0);
        let bottom = (ph - sh - STICKER_MARGIN).max(0);

        match *self {
            StickerPlacement::TopLeft => (STICKER_MARGIN, STICKER_MARGIN),
            StickerPlacement::TopRight => (right, STICKER_MARGIN),
            StickerPlacement::BottomLeft => (STICKER_MARGIN, bottom),
            StickerPlacement::BottomRight => (right, bottom),
            StickerPlacement::Center => ((pw - sw) / 2, (ph - sh) / 2),
            StickerPlacement::At { x, y } => (x, y),
        }
    }
}

impl FromStr for StickerPlacement {
    type Err = DiaryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "top-left" => Ok(StickerPlacement::TopLeft),
            "top-right" => Ok(StickerPlacement::TopRight),
            "bottom-left" => Ok(StickerPlacement::BottomLeft),
            "bottom-right" => Ok(StickerPlacement::BottomRight),
            "center" => Ok(StickerPlacement::Center),
            other => {
                let (x, y) = other
                    .split_once(',')
                    .ok_or_else(|| DiaryError::InvalidPlacement(s.to_string()))?;
                let x = x.trim().parse::<i64>();
                let y = y.trim().parse::<i64>();
                match (x, y) {
                    (Ok(x), Ok(y)) => Ok(StickerPlacement::At { x, y }),
                    _ => Err(DiaryError::InvalidPlacement(s.to_string())),
                }
            }
        }
    }
}

/// Decode an image file from disk
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    Ok(image::open(path)?)
}

/// Downscale so the width is at most `max_width`, keeping the aspect ratio.
/// Narrower images come back unchanged.
pub fn fit_width(image: DynamicImage, max_width: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    if max_width == 0 || width <= max_width {
        return image;
    }

    let scaled_height = (u64::from(height) * u64::from(max_width) / u64::from(width)).max(1);
    let scaled_height = u32::try_from(scaled_height).unwrap_or(u32::MAX);
    image.resize_exact(max_width, scaled_height, FilterType::Lanczos3)
}

/// Alpha-composite `sticker` onto `photo`. Parts falling outside the photo are clipped.
pub fn apply_sticker(
    photo: &DynamicImage,
    sticker: &DynamicImage,
    placement: StickerPlacement,
) -> DynamicImage {
    let mut canvas = photo.to_rgba8();
    let stamp = sticker.to_rgba8();
    let (x, y) = placement.offset(canvas.dimensions(), stamp.dimensions());

    imageops::overlay(&mut canvas, &stamp, x, y);
    DynamicImage::ImageRgba8(canvas)
}

/// Font used for stamped text
#[derive(Debug, Clone)]
pub enum StampFont {
    /// Loaded from the requested font file
    Custom(FontArc),
    /// Built-in default: no file was requested, or it could not be loaded
    Embedded(FontArc),
}

impl StampFont {
    pub fn font(&self) -> &FontArc {
        match self {
            StampFont::Custom(font) | StampFont::Embedded(font) => font,
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, StampFont::Embedded(_))
    }
}

/// Load the font at `path`, falling back to the embedded font when the file
/// is missing or unparsable.
pub fn load_font(path: Option<&Path>) -> Result<StampFont> {
    if let Some(path) = path {
        match read_font(path) {
            Ok(font) => return Ok(StampFont::Custom(font)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "font unavailable, using the built-in font");
            }
        }
    }

    FontArc::try_from_slice(EMBEDDED_FONT)
        .map(StampFont::Embedded)
        .map_err(|e| DiaryError::Font(format!("built-in font: {}", e)))
}

fn read_font(path: &Path) -> Result<FontArc> {
    let bytes = fs::read(path)?;
    FontArc::try_from_vec(bytes).map_err(|e| DiaryError::Font(format!("{}: {}", path.display(), e)))
}

/// Text height for a photo: a tenth of its height, within 16..=96 px
fn text_scale(photo_height: u32) -> PxScale {
    PxScale::from((photo_height as f32 / 10.0).clamp(16.0, 96.0))
}

/// Draw `text` (emoji included, as far as the font covers them) onto the photo
/// in white. Text running off the photo is clipped.
pub fn stamp_text(
    photo: &DynamicImage,
    text: &str,
    placement: StickerPlacement,
    font_path: Option<&Path>,
) -> Result<DynamicImage> {
    if text.trim().is_empty() {
        return Ok(photo.clone());
    }

    let font = load_font(font_path)?;
    let mut canvas = photo.to_rgba8();
    let scale = text_scale(canvas.height());
    let (x, y) = placement.offset(canvas.dimensions(), text_size(scale, font.font(), text));

    draw_text_mut(
        &mut canvas,
        STAMP_COLOR,
        clamp_i32(x),
        clamp_i32(y),
        scale,
        font.font(),
        text,
    );
    Ok(DynamicImage::ImageRgba8(canvas))
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
