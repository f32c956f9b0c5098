pub const CHIP8_DISPLAY_WIDTH: usize = 64;
pub const CHIP8_DISPLAY_HEIGHT: usize = 32;

/// Monochrome 64x32 pixel grid, row-major. Coordinates wrap in both axes.
#[derive(Clone)]
pub struct Framebuffer {
    pixels: [bool; CHIP8_DISPLAY_WIDTH * CHIP8_DISPLAY_HEIGHT],
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            pixels: [false; CHIP8_DISPLAY_WIDTH * CHIP8_DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.pixels[Self::offset(x, y)]
    }

    /// XOR each sprite row onto the grid at (x, y); one byte per row, MSB
    /// leftmost. Returns true if any set pixel was turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (r, row) in sprite.iter().enumerate() {
            for col in 0..8 {
                if row & (0x80 >> col) == 0 {
                    continue;
                }
                let px = &mut self.pixels[Self::offset(x + col, y + r)];
                collision |= *px;
                *px = !*px;
            }
        }
        collision
    }

    /// how many pixels are lit
    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    fn offset(x: usize, y: usize) -> usize {
        (y % CHIP8_DISPLAY_HEIGHT) * CHIP8_DISPLAY_WIDTH + (x % CHIP8_DISPLAY_WIDTH)
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLYPH_0: [u8; 5] = [0xF0, 0x90, 0x90, 0x90, 0xF0];

    #[test]
    fn test_blank_on_creation() {
        assert_eq!(Framebuffer::new().lit(), 0);
    }

    #[test]
    fn test_draw_twice_erases() {
        let mut fb = Framebuffer::new();
        assert!(!fb.draw_sprite(10, 5, &GLYPH_0));
        assert_eq!(fb.lit(), 14);
        assert!(fb.is_set(10, 5));
        assert!(fb.is_set(13, 5));
        assert!(!fb.is_set(14, 5));
        assert!(!fb.is_set(11, 6));
        assert!(fb.draw_sprite(10, 5, &GLYPH_0));
        assert_eq!(fb.lit(), 0);
    }

    #[test]
    fn test_collision_is_any_pixel() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(0, 0, &[0x80]);
        // only the first pixel overlaps; later pixels in the row don't reset the flag
        assert!(fb.draw_sprite(0, 0, &[0xff]));
        assert!(!fb.is_set(0, 0));
        assert!(fb.is_set(7, 0));
    }

    #[test]
    fn test_wraparound() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(62, 31, &[0xf0, 0xf0]);
        assert!(fb.is_set(63, 31));
        assert!(fb.is_set(0, 31));
        assert!(fb.is_set(1, 0));
        assert!(!fb.is_set(2, 0));
        // queries wrap too
        assert!(fb.is_set(64, 63));
    }

    #[test]
    fn test_clear() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(3, 3, &GLYPH_0);
        fb.clear();
        assert_eq!(fb.lit(), 0);
    }
}
