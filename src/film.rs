use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use radiometry::color::Color;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilmError {
    #[error("cannot create image file: {0}")]
    Io(#[from] std::io::Error),
    #[error("png encoding failed: {0}")]
    Encoding(#[from] png::EncodingError),
}

/// A grid of linear-color pixels, written out as 8-bit RGB PNG.
pub struct Film {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Film {
    pub fn from_rows(width: u32, height: u32, rows: Vec<Vec<Color>>) -> Film {
        assert_eq!(rows.len(), height as usize);
        let pixels: Vec<Color> = rows.into_iter().flatten().collect();
        assert_eq!(pixels.len(), (width * height) as usize);
        Film {
            width,
            height,
            pixels,
        }
    }

    pub fn write_png(&self, path: &Path) -> Result<(), FilmError> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);

        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::RGB);
        encoder.set_depth(png::BitDepth::Eight);
        let mut png_writer = encoder.write_header()?;

        let mut data = Vec::with_capacity(self.pixels.len() * 3);
        for pixel in self.pixels.iter() {
            data.extend_from_slice(&pixel.to_u8());
        }
        png_writer.write_image_data(&data)?;
        Ok(())
    }
}
