//! Pixel grid value type.
//!
//! A display image is a rectangular grid of single-digit brightness values
//! (`0`-`9`). On the wire it travels as rows of digit characters joined by
//! `:`, e.g. `09090:99999:99999:09990:00900`, carried in one escaped
//! `display.show` token.

use std::fmt;

use crate::error::{ProtocolError, ProtocolResult};

/// Display width and height of the on-board LED matrix.
pub const DISPLAY_SIZE: usize = 5;

/// A rectangular grid of brightness values (0-9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    /// Row-major brightness values.
    pixels: Vec<u8>,
}

impl Image {
    /// Create a blank image of the given size.
    pub fn new(width: usize, height: usize) -> Image {
        Image {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Create a blank 5x5 image.
    pub fn blank() -> Image {
        Image::new(DISPLAY_SIZE, DISPLAY_SIZE)
    }

    /// Parse an image from its grid string.
    ///
    /// Rows are separated by `:` (or `\n`, which some sources use) and each
    /// row is a string of `0`-`9` digits. All rows must have equal length.
    pub fn parse(grid: &str) -> ProtocolResult<Image> {
        let separator = if grid.contains('\n') { '\n' } else { ':' };
        let mut width = None;
        let mut height = 0;
        let mut pixels = Vec::with_capacity(grid.len());

        for row in grid.split(separator) {
            let row = row.trim_end_matches('\r');
            let row_width = row.chars().count();
            match width {
                None => width = Some(row_width),
                Some(w) if w != row_width => {
                    return Err(ProtocolError::InvalidImage(format!(
                        "ragged rows: {w} vs {row_width}"
                    )));
                }
                Some(_) => {}
            }
            for c in row.chars() {
                let value = c.to_digit(10).ok_or_else(|| {
                    ProtocolError::InvalidImage(format!("invalid brightness digit: {c:?}"))
                })?;
                pixels.push(value as u8);
            }
            height += 1;
        }

        Ok(Image {
            width: width.unwrap_or(0),
            height,
            pixels,
        })
    }

    /// Build an image from raw brightness values, row-major.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> ProtocolResult<Image> {
        if pixels.len() != width * height {
            return Err(ProtocolError::InvalidImage(format!(
                "{}x{} image needs {} pixels, got {}",
                width,
                height,
                width * height,
                pixels.len()
            )));
        }
        if let Some(bad) = pixels.iter().find(|&&p| p > 9) {
            return Err(ProtocolError::InvalidImage(format!(
                "brightness out of range: {bad}"
            )));
        }
        Ok(Image {
            width,
            height,
            pixels,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the brightness of a pixel.
    pub fn get_pixel(&self, x: usize, y: usize) -> ProtocolResult<u8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the brightness of a pixel (0-9).
    pub fn set_pixel(&mut self, x: usize, y: usize, value: u8) -> ProtocolResult<()> {
        if value > 9 {
            return Err(ProtocolError::InvalidImage(format!(
                "brightness out of range: {value}"
            )));
        }
        let i = self.index(x, y)?;
        self.pixels[i] = value;
        Ok(())
    }

    /// Set every pixel to the given brightness.
    pub fn fill(&mut self, value: u8) -> ProtocolResult<()> {
        if value > 9 {
            return Err(ProtocolError::InvalidImage(format!(
                "brightness out of range: {value}"
            )));
        }
        self.pixels.fill(value);
        Ok(())
    }

    /// A copy with every brightness replaced by `9 - value`.
    pub fn inverted(&self) -> Image {
        Image {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&p| 9 - p).collect(),
        }
    }

    /// A copy shifted horizontally; positive `n` shifts right. Pixels
    /// shifted out are dropped and vacated positions are dark.
    pub fn shifted_x(&self, n: isize) -> Image {
        let mut out = Image::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let src_x = x as isize - n;
                if (0..self.width as isize).contains(&src_x) {
                    out.pixels[y * self.width + x] =
                        self.pixels[y * self.width + src_x as usize];
                }
            }
        }
        out
    }

    /// A copy shifted vertically; positive `n` shifts down.
    pub fn shifted_y(&self, n: isize) -> Image {
        let mut out = Image::new(self.width, self.height);
        for y in 0..self.height {
            let src_y = y as isize - n;
            if (0..self.height as isize).contains(&src_y) {
                let src = src_y as usize * self.width;
                let dst = y * self.width;
                out.pixels[dst..dst + self.width]
                    .copy_from_slice(&self.pixels[src..src + self.width]);
            }
        }
        out
    }

    fn index(&self, x: usize, y: usize) -> ProtocolResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(ProtocolError::InvalidImage(format!(
                "pixel ({x}, {y}) out of bounds for {}x{} image",
                self.width, self.height
            )));
        }
        Ok(y * self.width + x)
    }
}

impl Default for Image {
    fn default() -> Self {
        Image::blank()
    }
}

impl fmt::Display for Image {
    /// The wire form: rows of digits joined by `:`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                f.write_str(":")?;
            }
            for x in 0..self.width {
                write!(f, "{}", self.pixels[y * self.width + x])?;
            }
        }
        Ok(())
    }
}

/// The MicroPython built-in icon patterns, usable as
/// `Image::parse(icons::HEART)`.
pub mod icons {
    pub const HEART: &str = "09090:99999:99999:09990:00900";
    pub const HEART_SMALL: &str = "00000:09090:09990:00900:00000";
    pub const HAPPY: &str = "00000:09090:00000:90009:09990";
    pub const SMILE: &str = "00000:00000:00000:90009:09990";
    pub const SAD: &str = "00000:09090:00000:09990:90009";
    pub const CONFUSED: &str = "00000:09090:00000:09090:90909";
    pub const ANGRY: &str = "90009:09090:00000:99999:90909";
    pub const ASLEEP: &str = "00000:99099:00000:09990:00000";
    pub const SURPRISED: &str = "09090:00000:00900:09090:00900";
    pub const SILLY: &str = "90009:00000:99999:00909:00999";
    pub const FABULOUS: &str = "99999:99099:00000:09090:09990";
    pub const MEH: &str = "09090:00000:00090:00900:09000";
    pub const YES: &str = "00000:00009:00090:90900:09000";
    pub const NO: &str = "90009:09090:00900:09090:90009";
    pub const CLOCK12: &str = "00900:00900:00900:00000:00000";
    pub const CLOCK1: &str = "00090:00090:00900:00000:00000";
    pub const CLOCK2: &str = "00000:00099:00900:00000:00000";
    pub const CLOCK3: &str = "00000:00000:00999:00000:00000";
    pub const CLOCK4: &str = "00000:00000:00900:00099:00000";
    pub const CLOCK5: &str = "00000:00000:00900:00090:00090";
    pub const CLOCK6: &str = "00000:00000:00900:00900:00900";
    pub const CLOCK7: &str = "00000:00000:00900:09000:09000";
    pub const CLOCK8: &str = "00000:00000:00900:99000:00000";
    pub const CLOCK9: &str = "00000:00000:99900:00000:00000";
    pub const CLOCK10: &str = "00000:99000:00900:00000:00000";
    pub const CLOCK11: &str = "09000:09000:00900:00000:00000";
    pub const ARROW_N: &str = "00900:09990:90909:00900:00900";
    pub const ARROW_NE: &str = "00999:00099:00909:09000:90000";
    pub const ARROW_E: &str = "00900:00090:99999:00090:00900";
    pub const ARROW_SE: &str = "90000:09000:00909:00099:00999";
    pub const ARROW_S: &str = "00900:00900:90909:09990:00900";
    pub const ARROW_SW: &str = "00009:00090:90900:99000:99900";
    pub const ARROW_W: &str = "00900:09000:99999:09000:00900";
    pub const ARROW_NW: &str = "99900:99000:90900:00090:00009";
    pub const TRIANGLE: &str = "00000:00900:09090:99999:00000";
    pub const TRIANGLE_LEFT: &str = "90000:99000:90900:90090:99999";
    pub const CHESSBOARD: &str = "09090:90909:09090:90909:09090";
    pub const DIAMOND: &str = "00900:09090:90009:09090:00900";
    pub const DIAMOND_SMALL: &str = "00000:00900:09090:00900:00000";
    pub const SQUARE: &str = "99999:90009:90009:90009:99999";
    pub const SQUARE_SMALL: &str = "00000:09990:09090:09990:00000";
    pub const RABBIT: &str = "90900:90900:99990:99090:99990";
    pub const COW: &str = "90009:90009:99999:09990:00900";
    pub const MUSIC_CROTCHET: &str = "00900:00900:00900:99900:99900";
    pub const MUSIC_QUAVER: &str = "00900:00990:00909:99900:99900";
    pub const MUSIC_QUAVERS: &str = "09999:09009:09009:99099:99099";
    pub const PITCHFORK: &str = "90909:90909:99999:00900:00900";
    pub const XMAS: &str = "00900:09990:00900:09990:99999";
    pub const PACMAN: &str = "09999:99090:99900:99990:09999";
    pub const TARGET: &str = "00900:09990:99099:09990:00900";
    pub const TSHIRT: &str = "99099:99999:09990:09990:09990";
    pub const ROLLERSKATE: &str = "00099:00099:99999:99999:09090";
    pub const DUCK: &str = "09900:99900:09999:09990:00000";
    pub const HOUSE: &str = "00900:09990:99999:09990:09090";
    pub const TORTOISE: &str = "00000:09990:99999:09090:00000";
    pub const BUTTERFLY: &str = "99099:99999:00900:99999:99099";
    pub const STICKFIGURE: &str = "00900:99999:00900:09090:90009";
    pub const GHOST: &str = "99999:90909:99999:99999:90909";
    pub const SWORD: &str = "00900:00900:00900:09990:00900";
    pub const GIRAFFE: &str = "99000:09000:09000:09990:09090";
    pub const SKULL: &str = "09990:90909:99999:09990:09990";
    pub const UMBRELLA: &str = "09990:99999:00900:90900:09900";
    pub const SNAKE: &str = "99000:99099:09090:09990:00000";

    /// The arrow icons in compass order, starting north.
    pub const ALL_ARROWS: [&str; 8] = [
        ARROW_N, ARROW_NE, ARROW_E, ARROW_SE, ARROW_S, ARROW_SW, ARROW_W, ARROW_NW,
    ];

    /// The clock-face icons, starting at twelve o'clock.
    pub const ALL_CLOCKS: [&str; 12] = [
        CLOCK12, CLOCK1, CLOCK2, CLOCK3, CLOCK4, CLOCK5, CLOCK6, CLOCK7, CLOCK8, CLOCK9,
        CLOCK10, CLOCK11,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for grid in [
            "09090:99999:99999:09990:00900",
            "00000:00000:00000:00000:00000",
            "123:456",
            "9",
        ] {
            let image = Image::parse(grid).unwrap();
            assert_eq!(image.to_string(), grid);
        }
    }

    #[test]
    fn test_parse_newline_separator() {
        let image = Image::parse("090\n999").unwrap();
        assert_eq!(image.to_string(), "090:999");
    }

    #[test]
    fn test_parse_rejects_bad_grids() {
        assert!(Image::parse("09:090").is_err());
        assert!(Image::parse("0a0:000").is_err());
    }

    #[test]
    fn test_pixel_access() {
        let mut image = Image::blank();
        assert_eq!(image.get_pixel(2, 3).unwrap(), 0);
        image.set_pixel(2, 3, 9).unwrap();
        assert_eq!(image.get_pixel(2, 3).unwrap(), 9);
        assert!(image.get_pixel(5, 0).is_err());
        assert!(image.set_pixel(0, 0, 10).is_err());
    }

    #[test]
    fn test_invert() {
        let image = Image::parse("09:90").unwrap();
        assert_eq!(image.inverted().to_string(), "90:09");
    }

    #[test]
    fn test_shift() {
        let image = Image::parse("900:000:000").unwrap();
        assert_eq!(image.shifted_x(1).to_string(), "090:000:000");
        assert_eq!(image.shifted_x(-1).to_string(), "000:000:000");
        assert_eq!(image.shifted_y(2).to_string(), "000:000:900");
    }

    #[test]
    fn test_fill() {
        let mut image = Image::new(2, 2);
        image.fill(7).unwrap();
        assert_eq!(image.to_string(), "77:77");
    }

    #[test]
    fn test_icons_are_well_formed() {
        for grid in [
            icons::HEART,
            icons::PACMAN,
            icons::GHOST,
            icons::ARROW_N,
            icons::CLOCK6,
        ] {
            let image = Image::parse(grid).unwrap();
            assert_eq!(image.width(), 5);
            assert_eq!(image.height(), 5);
            assert_eq!(image.to_string(), grid);
        }
        assert_eq!(icons::ALL_ARROWS.len(), 8);
        assert_eq!(icons::ALL_CLOCKS.len(), 12);
    }
}
