use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{ImageFormat, Rgb, RgbImage};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::symbol::Symbol;

/// Largest width or height in pixels any tool will draw.
pub const MAX_IMAGE_SIDE: u32 = 20_000;

/// `cells * cell + 2 * margin`, or an error past [`MAX_IMAGE_SIDE`].
pub(crate) fn image_side(cells: usize, cell: u32, margin: u32) -> Result<u32> {
    u32::try_from(cells)
        .ok()
        .and_then(|cells| cells.checked_mul(cell))
        .and_then(|inner| margin.checked_mul(2)?.checked_add(inner))
        .filter(|&side| side <= MAX_IMAGE_SIDE)
        .ok_or_else(too_large)
}

fn too_large() -> Error {
    Error::InvalidArgument(format!(
        "image would be larger than {} pixels on a side",
        MAX_IMAGE_SIDE
    ))
}

/// Pixel geometry and colors used to draw a [`Symbol`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Width in pixels of one module (and height, for matrix symbols).
    pub module_size: u32,
    /// Height in pixels of the bars of a linear symbol.
    pub bar_height: u32,
    /// Light padding in pixels on every side.
    pub margin: u32,
    pub dark: Color,
    pub light: Color,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            module_size: 2,
            bar_height: 100,
            margin: 10,
            dark: Color::BLACK,
            light: Color::WHITE,
        }
    }
}

impl Style {
    fn cell_height(&self, symbol: &Symbol) -> u32 {
        if symbol.is_linear() {
            self.bar_height
        } else {
            self.module_size
        }
    }

    /// Size in pixels of the drawn symbol including margins.
    ///
    /// Fails when either side would exceed [`MAX_IMAGE_SIDE`].
    pub fn dimensions(&self, symbol: &Symbol) -> Result<(u32, u32)> {
        let width = image_side(symbol.width(), self.module_size, self.margin)?;
        let height = image_side(symbol.height(), self.cell_height(symbol), self.margin)?;
        Ok((width, height))
    }

    /// Height of the caption line; glyphs are 8 modules tall.
    fn caption_height(&self) -> u32 {
        self.module_size.saturating_mul(8)
    }

    /// Full canvas height, with room for a caption under the symbol if there is one.
    fn canvas_height(&self, symbol_height: u32, caption: Option<&str>) -> Result<u32> {
        match caption {
            Some(_) => symbol_height
                .checked_add(self.caption_height())
                .filter(|&h| h <= MAX_IMAGE_SIDE)
                .ok_or_else(too_large),
            None => Ok(symbol_height),
        }
    }

    /// Top edge of the caption glyphs, half a margin below the symbol.
    fn caption_top(&self, symbol_height: u32) -> u32 {
        symbol_height - self.margin / 2
    }
}

/// The two formats the dedicated EAN-13 and QR tools offer on `-f/--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FileFormat {
    Png,
    Svg,
}

impl FileFormat {
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Png => "png",
            FileFormat::Svg => "svg",
        }
    }
}

impl From<FileFormat> for OutputFormat {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Png => OutputFormat::Raster(ImageFormat::Png),
            FileFormat::Svg => OutputFormat::Svg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Raster(ImageFormat),
}

impl OutputFormat {
    /// Infer the output format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;

        if ext.eq_ignore_ascii_case("svg") {
            return Ok(OutputFormat::Svg);
        }

        match ImageFormat::from_extension(ext.to_ascii_lowercase()) {
            Some(format) if format.writing_enabled() => Ok(OutputFormat::Raster(format)),
            _ => Err(Error::UnsupportedFormat(ext.to_string())),
        }
    }
}

/// Render `symbol` to a raster image.
///
/// A `caption` is drawn centered below the symbol with an 8x8 bitmap font,
/// scaled to the module size.
pub fn render_image(symbol: &Symbol, style: &Style, caption: Option<&str>) -> Result<RgbImage> {
    let (width, symbol_height) = style.dimensions(symbol)?;
    let height = style.canvas_height(symbol_height, caption)?;
    let mut image = RgbImage::from_pixel(width, height, style.light.to_rgb());
    let dark = style.dark.to_rgb();
    let cell_w = style.module_size;
    let cell_h = style.cell_height(symbol);

    for y in 0..symbol.height() {
        for x in 0..symbol.width() {
            if !symbol.is_dark(x, y) {
                continue;
            }
            let x0 = style.margin + x as u32 * cell_w;
            let y0 = style.margin + y as u32 * cell_h;
            for py in y0..y0 + cell_h {
                for px in x0..x0 + cell_w {
                    image.put_pixel(px, py, dark);
                }
            }
        }
    }

    if let Some(text) = caption {
        let top = style.caption_top(symbol_height);
        draw_text(&mut image, text, top, style.module_size, dark);
    }

    Ok(image)
}

/// Draw `text` horizontally centered with its top edge at `top`.
///
/// Characters missing from the font are left blank; pixels off the canvas are clipped.
fn draw_text(image: &mut RgbImage, text: &str, top: u32, scale: u32, color: Rgb<u8>) {
    let glyph_w = scale.saturating_mul(8);
    let count = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
    let left = image.width().saturating_sub(glyph_w.saturating_mul(count)) / 2;

    for (i, c) in text.chars().enumerate() {
        let Some(rows) = BASIC_FONTS.get(c) else {
            continue;
        };
        let x0 = left.saturating_add((i as u32).saturating_mul(glyph_w));
        for (row, bits) in rows.iter().enumerate() {
            let y0 = top.saturating_add(row as u32 * scale);
            // bit 0 is the leftmost column
            for col in (0..8u32).filter(|col| bits & (1 << col) != 0) {
                let x = x0.saturating_add(col * scale);
                for py in y0..y0.saturating_add(scale) {
                    for px in x..x.saturating_add(scale) {
                        if let Some(pixel) = image.get_pixel_mut_checked(px, py) {
                            *pixel = color;
                        }
                    }
                }
            }
        }
    }
}

/// Render `symbol` as a standalone SVG document.
///
/// Dark modules are merged into horizontal runs and emitted as a single path.
/// A `caption` is centered below the symbol in the dark color.
pub fn render_svg(symbol: &Symbol, style: &Style, caption: Option<&str>) -> Result<String> {
    let (width, bars_height) = style.dimensions(symbol)?;
    let height = style.canvas_height(bars_height, caption)?;
    let font_size = style.caption_height();
    let cell_w = style.module_size;
    let cell_h = style.cell_height(symbol);

    let mut svg = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        svg,
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" ",
            "width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" shape-rendering=\"crispEdges\">\n",
            "<rect width=\"{w}\" height=\"{h}\" fill=\"{light}\"/>\n",
            "<path fill=\"{dark}\" d=\""
        ),
        w = width,
        h = height,
        light = style.light.to_hex(),
        dark = style.dark.to_hex(),
    );

    for y in 0..symbol.height() {
        let top = style.margin + y as u32 * cell_h;
        for (start, len) in symbol.dark_runs(y) {
            let left = style.margin + start as u32 * cell_w;
            let run_w = len as u32 * cell_w;
            let _ = write!(svg, "M{left},{top}h{run_w}v{cell_h}h-{run_w}z");
        }
    }
    svg.push_str("\"/>\n");

    if let Some(text) = caption {
        let _ = writeln!(
            svg,
            "<text x=\"{}\" y=\"{}\" font-family=\"monospace\" font-size=\"{}\" text-anchor=\"middle\" fill=\"{}\">{}</text>",
            width / 2,
            style.caption_top(bars_height) + font_size / 2,
            font_size,
            style.dark.to_hex(),
            escape_xml(text),
        );
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Create the parent directory of `path` if it has one.
pub(crate) fn prepare_output(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub(crate) fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Draw `symbol` and write it to `path` in the given format.
///
/// Nothing is written when the image would be too large.
pub fn write_symbol(
    symbol: &Symbol,
    style: &Style,
    caption: Option<&str>,
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    style.dimensions(symbol)?;
    prepare_output(path)?;

    match format {
        OutputFormat::Svg => {
            let svg = render_svg(symbol, style, caption)?;
            write_text(path, &svg)?;
        }
        OutputFormat::Raster(image_format) => {
            let image = render_image(symbol, style, caption)?;
            debug!(
                width = image.width(),
                height = image.height(),
                "rendered raster image"
            );
            image.save_with_format(path, image_format)?;
        }
    }

    info!(path = %path.display(), "wrote barcode");
    Ok(())
}
