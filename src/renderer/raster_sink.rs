use crate::{
    font::{FontConfig, TextColor},
    font_storage::FontStorage,
};

use super::RenderSink;

/// CPU sink that rasterizes each line with `fontdue`.
///
/// Glyph coverage is reported through the callback `f(position, coverage, color)`
/// for every non-empty pixel inside `image_size`. Blending is left to the
/// caller, so the same sink can target any pixel format.
pub struct RasterSink<'a, F>
where
    F: FnMut([usize; 2], u8, &TextColor),
{
    font_storage: &'a mut FontStorage,
    image_size: [usize; 2],
    f: F,
}

impl<'a, F> RasterSink<'a, F>
where
    F: FnMut([usize; 2], u8, &TextColor),
{
    pub fn new(font_storage: &'a mut FontStorage, image_size: [usize; 2], f: F) -> Self {
        Self {
            font_storage,
            image_size,
            f,
        }
    }

    /// Copies one glyph's coverage to the callback, clipping to the image.
    fn blit_glyph(
        &mut self,
        origin: [f32; 2],
        glyph_size: [usize; 2],
        coverage: &[u8],
        color: &TextColor,
    ) {
        let [width, height] = self.image_size;
        let [glyph_width, glyph_height] = glyph_size;

        for row in 0..glyph_height {
            let y = origin[1] + row as f32;
            if y < 0.0 {
                continue;
            }
            let iy = y.floor() as usize;
            if iy >= height {
                break;
            }

            for col in 0..glyph_width {
                let alpha = coverage[row * glyph_width + col];
                if alpha == 0 {
                    continue;
                }

                let x = origin[0] + col as f32;
                if x < 0.0 {
                    continue;
                }
                let ix = x.floor() as usize;
                if ix >= width {
                    break;
                }

                (self.f)([ix, iy], alpha, color);
            }
        }
    }
}

impl<F> RenderSink for RasterSink<'_, F>
where
    F: FnMut([usize; 2], u8, &TextColor),
{
    fn draw_text(&mut self, font: &FontConfig, text: &str, position: [f32; 2]) {
        if self.image_size[0] == 0 || self.image_size[1] == 0 {
            return;
        }

        let face = match self.font_storage.resolve(font.source()) {
            Ok((_, face)) => face,
            Err(e) => {
                log::warn!("Skipping line {:?}: {}", text, e);
                return;
            }
        };

        let font_size = font.size();
        let ascent = face
            .horizontal_line_metrics(font_size)
            .map_or(font_size, |m| m.ascent);
        let baseline = position[1] + ascent;

        let mut pen_x = position[0];
        let mut previous: Option<u16> = None;

        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let glyph_idx = face.lookup_glyph_index(ch);
            if let Some(prev) = previous {
                pen_x += face
                    .horizontal_kern_indexed(prev, glyph_idx, font_size)
                    .unwrap_or(0.0);
            }

            let (metrics, coverage) = face.rasterize_indexed(glyph_idx, font_size);
            if metrics.width > 0 && metrics.height > 0 {
                // fontdue reports glyph boxes relative to the baseline, y up.
                let origin = [
                    pen_x + metrics.xmin as f32,
                    baseline - (metrics.ymin as f32 + metrics.height as f32),
                ];
                self.blit_glyph(origin, [metrics.width, metrics.height], &coverage, &font.color);
            }

            pen_x += metrics.advance_width;
            previous = Some(glyph_idx);
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontSource;

    #[test]
    fn unresolvable_font_draws_nothing() {
        let mut storage = FontStorage::new();
        let font = FontConfig::new(FontSource::family("sans-serif"), 20.0).unwrap();

        let mut touched = 0;
        let mut sink = RasterSink::new(&mut storage, [64, 64], |_, _, _| touched += 1);
        sink.draw_text(&font, "hidden", [0.0, 0.0]);
        drop(sink);

        assert_eq!(touched, 0);
    }

    #[test]
    fn blit_clips_to_the_image() {
        let mut storage = FontStorage::new();
        let mut pixels = Vec::new();
        let mut sink = RasterSink::new(&mut storage, [4, 3], |pos, alpha, _| {
            pixels.push((pos, alpha))
        });

        // 3x3 glyph, fully covered, placed so it hangs off the right and top edges.
        sink.blit_glyph([2.0, -1.0], [3, 3], &[255; 9], &TextColor::BLACK);
        drop(sink);

        let positions: Vec<[usize; 2]> = pixels.iter().map(|(pos, _)| *pos).collect();
        assert_eq!(positions, vec![[2, 0], [3, 0], [2, 1], [3, 1]]);
        assert!(pixels.iter().all(|(_, alpha)| *alpha == 255));
    }

    #[test]
    fn zero_coverage_is_skipped() {
        let mut storage = FontStorage::new();
        let mut count = 0;
        let mut sink = RasterSink::new(&mut storage, [8, 8], |_, _, _| count += 1);

        sink.blit_glyph([0.0, 0.0], [2, 2], &[0, 128, 0, 7], &TextColor::BLACK);
        drop(sink);

        assert_eq!(count, 2);
    }

    #[test]
    fn system_font_line_touches_pixels() {
        let mut storage = FontStorage::new();
        storage.load_system_fonts();
        let font = FontConfig::new(FontSource::family("sans-serif"), 24.0).unwrap();
        if storage.resolve(font.source()).is_err() {
            return;
        }

        let mut pixels = Vec::new();
        let mut sink = RasterSink::new(&mut storage, [160, 48], |pos, alpha, _| {
            pixels.push((pos, alpha))
        });
        sink.draw_text(&font, "Ink", [2.0, 2.0]);
        drop(sink);

        assert!(!pixels.is_empty());
        assert!(pixels.iter().all(|(pos, alpha)| *alpha > 0 && pos[0] < 160 && pos[1] < 48));
    }
}
