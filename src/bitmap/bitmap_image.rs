use super::chunker::MAX_ROW_BYTES;
use crate::Error;
use base64::{Engine, engine::general_purpose::STANDARD};
use image::{DynamicImage, GenericImageView};
use qrcode::{QrCode, types::Color};
use serde::{Serialize, Deserialize};
use std::{convert::TryFrom, path::Path};

/// Printable width in pixels
const MAX_WIDTH: u32 = MAX_ROW_BYTES as u32 * 8;
/// Light modules around a qr code, required by readers
const QR_QUIET_ZONE: usize = 4;

/// Packed 1 bit per pixel raster image
///
/// Rows are padded to whole bytes, the most significant bit is the leftmost pixel, and a set bit is a black dot. It serializes with the raster encoded in base64, so it can live in a json document.
///
/// ```rust
/// use thermal_rs::Bitmap;
///
/// // 10 pixels wide, so 2 bytes per row
/// let bitmap = Bitmap::new(10, 2, vec![0xff, 0xc0, 0x80, 0x40])?;
/// assert_eq!(2, bitmap.row_bytes());
/// # Ok::<(), thermal_rs::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBitmap", into = "RawBitmap")]
pub struct Bitmap {
    width: u16,
    height: u16,
    data: Vec<u8>
}

impl Bitmap {
    /// Wraps an already packed raster. The data must hold at least `ceil(width / 8) * height` bytes.
    pub fn new(width: u16, height: u16, data: Vec<u8>) -> Result<Bitmap, Error> {
        let expected = Bitmap::packed_len(width, height);
        if data.len() < expected {
            return Err(Error::BitmapSize{expected, found: data.len()});
        }
        Ok(Bitmap {
            width,
            height,
            data
        })
    }

    /// Converts an image to black and white dots
    ///
    /// Images wider than the print head are scaled down to fit, keeping the aspect ratio. Dark pixels become dots, transparent ones stay blank.
    pub fn from_image(dynamic_image: &DynamicImage) -> Bitmap {
        let (im_width, im_height) = dynamic_image.dimensions();
        let rgba = if im_width > MAX_WIDTH {
            let aspect_ratio = (im_width as f64)/(im_height as f64);
            let new_height = ((MAX_WIDTH as f64)/aspect_ratio).floor().max(1.0) as u32;
            image::imageops::resize(dynamic_image, MAX_WIDTH, new_height, image::imageops::FilterType::Nearest)
        } else {
            dynamic_image.to_rgba8()
        };

        let width = rgba.width() as u16;
        let height = rgba.height().min(u16::MAX as u32) as u16;
        let row_bytes = (width as usize + 7) / 8;
        let mut data = vec![0u8; row_bytes * height as usize];
        for (x, y, pixel) in rgba.enumerate_pixels() {
            if y >= height as u32 {
                break;
            }
            let ps = pixel.0;
            // Transparent pixels are left blank
            if ps[3] > 64 {
                let grayscale = 0.2126*(ps[0] as f64) + 0.7152*(ps[1] as f64) + 0.0722*(ps[2] as f64);
                if grayscale < 128.0 {
                    data[y as usize * row_bytes + x as usize / 8] |= 0x80 >> (x % 8);
                }
            }
        }
        Bitmap {
            width,
            height,
            data
        }
    }

    /// Loads an image file and converts it with [from_image](Bitmap::from_image)
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Bitmap, Error> {
        let dynamic_image = image::open(path).map_err(Error::ImageError)?;
        Ok(Bitmap::from_image(&dynamic_image))
    }

    /// Renders a qr code, each module `module_size` dots wide
    ///
    /// The module size shrinks if the code would not fit the print head.
    pub fn qr_code<A: AsRef<[u8]>>(content: A, module_size: u8) -> Result<Bitmap, Error> {
        let code = QrCode::new(content.as_ref()).map_err(|e| Error::QrError(e.to_string()))?;
        let modules = code.width();
        let colors = code.to_colors();
        let span = modules + 2 * QR_QUIET_ZONE;
        let scale = (module_size.max(1) as usize).min(MAX_WIDTH as usize / span);
        if scale == 0 {
            return Err(Error::QrError(format!("{} modules do not fit in {} dots", span, MAX_WIDTH)));
        }

        let side = span * scale;
        let row_bytes = (side + 7) / 8;
        let mut data = vec![0u8; row_bytes * side];
        for y in 0..side {
            for x in 0..side {
                let (module_x, module_y) = (x / scale, y / scale);
                let inside = (QR_QUIET_ZONE..QR_QUIET_ZONE + modules).contains(&module_x)
                    && (QR_QUIET_ZONE..QR_QUIET_ZONE + modules).contains(&module_y);
                if inside && colors[(module_y - QR_QUIET_ZONE) * modules + module_x - QR_QUIET_ZONE] == Color::Dark {
                    data[y * row_bytes + x / 8] |= 0x80 >> (x % 8);
                }
            }
        }
        Ok(Bitmap {
            width: side as u16,
            height: side as u16,
            data
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Bytes per row, including padding
    pub fn row_bytes(&self) -> u32 {
        (self.width as u32 + 7) / 8
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn packed_len(width: u16, height: u16) -> usize {
        ((width as usize + 7) / 8) * height as usize
    }
}

/// Serialized form, with the raster as base64
#[derive(Serialize, Deserialize)]
struct RawBitmap {
    width: u16,
    height: u16,
    data: String
}

impl From<Bitmap> for RawBitmap {
    fn from(bitmap: Bitmap) -> RawBitmap {
        RawBitmap {
            width: bitmap.width,
            height: bitmap.height,
            data: STANDARD.encode(&bitmap.data)
        }
    }
}

impl TryFrom<RawBitmap> for Bitmap {
    type Error = String;

    fn try_from(raw: RawBitmap) -> Result<Bitmap, String> {
        let data = STANDARD.decode(raw.data.as_bytes()).map_err(|_| "string is not a valid base64 sequence".to_string())?;
        Bitmap::new(raw.width, raw.height, data).map_err(|e| e.to_string())
    }
}
