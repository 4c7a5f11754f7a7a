//! Best-effort pixel dimension sniffing
//!
//! A fetched image body is offered to an ordered table of sniffers. Each
//! sniffer recognizes its format by signature and reads only as far as the
//! header needs. A body no sniffer recognizes has no dimensions; that is not
//! an error.

use image::{ImageFormat, ImageReader};
use std::io::Cursor;

/// Pixel dimensions of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A strategy that can read dimensions from one family of image formats
pub trait DimensionSniffer: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Returns the dimensions when `bytes` carries this sniffer's signature
    /// and a readable header
    fn sniff(&self, bytes: &[u8]) -> Option<Dimensions>;
}

/// Raster formats decoded through the `image` crate
const RASTER_FORMATS: &[(ImageFormat, &str)] = &[
    (ImageFormat::Jpeg, "jpeg"),
    (ImageFormat::Png, "png"),
    (ImageFormat::Gif, "gif"),
    (ImageFormat::Bmp, "bmp"),
    (ImageFormat::WebP, "webp"),
    (ImageFormat::Tiff, "tiff"),
    (ImageFormat::Ico, "ico"),
];

/// Reads dimensions with the `image` crate's decoder for a single format
pub struct RasterSniffer {
    format: ImageFormat,
    name: &'static str,
}

impl RasterSniffer {
    pub fn new(format: ImageFormat, name: &'static str) -> Self {
        Self { format, name }
    }
}

impl DimensionSniffer for RasterSniffer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn sniff(&self, bytes: &[u8]) -> Option<Dimensions> {
        if image::guess_format(bytes).ok()? != self.format {
            return None;
        }

        let (width, height) = ImageReader::with_format(Cursor::new(bytes), self.format)
            .into_dimensions()
            .ok()?;
        Some(Dimensions { width, height })
    }
}

/// Header-only fallback for formats the raster decoders do not cover
/// (PSD, AVIF/HEIF, QOI, ...)
pub struct HeaderSniffer;

impl DimensionSniffer for HeaderSniffer {
    fn name(&self) -> &'static str {
        "header"
    }

    fn sniff(&self, bytes: &[u8]) -> Option<Dimensions> {
        let size = imagesize::blob_size(bytes).ok()?;
        Some(Dimensions {
            width: u32::try_from(size.width).ok()?,
            height: u32::try_from(size.height).ok()?,
        })
    }
}

/// Ordered sniffer table: raster decoders first, header parsing last
pub fn default_sniffers() -> Vec<Box<dyn DimensionSniffer>> {
    let mut sniffers: Vec<Box<dyn DimensionSniffer>> = Vec::new();
    for &(format, name) in RASTER_FORMATS {
        sniffers.push(Box::new(RasterSniffer::new(format, name)));
    }
    sniffers.push(Box::new(HeaderSniffer));
    sniffers
}

/// Tries each sniffer in order, returning the first dimensions found
pub fn sniff_dimensions(
    sniffers: &[Box<dyn DimensionSniffer>],
    bytes: &[u8],
) -> Option<Dimensions> {
    sniffers.iter().find_map(|sniffer| {
        let dimensions = sniffer.sniff(bytes)?;
        tracing::trace!(
            "{} sniffer read {}x{}",
            sniffer.name(),
            dimensions.width,
            dimensions.height
        );
        Some(dimensions)
    })
}
