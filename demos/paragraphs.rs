use image::{ImageBuffer, Rgb};
use orikaeshi::{
    FontConfig, FontSource, FontSystem, StyledText, TextColor, TextLayoutConfig, stacked_height,
};

const WIDTH: u32 = 1024;
const MARGIN: f32 = 32.0;

#[allow(clippy::unwrap_used)]
fn main() {
    // 1. Setup Font System
    let font_system = FontSystem::new();
    font_system.load_system_fonts();

    // 2. Build the blocks; each one is measured here
    let heading = font_system
        .styled_text(
            "Typesetting",
            FontConfig::new(
                FontSource::Family {
                    name: "sans-serif".into(),
                    weight: 700,
                },
                48.0,
            )
            .unwrap()
            .with_color(TextColor::rgb(1.0, 0.8, 0.2)),
            &TextLayoutConfig {
                max_width: Some(960),
                padding_bottom: 16,
                ..TextLayoutConfig::default()
            },
        )
        .unwrap();

    let body = font_system
        .styled_text(
            "Typesetting is the arrangement and composition of text in graphic design and \
             publishing in both digital and traditional medias.\n\n\
             SuperCalifoRagiListicExpoaliDociousEvenThoughTheSoundOfItIsSomethingQuiteAtrocious",
            FontConfig::new(FontSource::family("serif"), 36.0)
                .unwrap()
                .with_color(TextColor::WHITE),
            &TextLayoutConfig {
                max_width: Some(960),
                line_multiplier: 1.5,
                ..TextLayoutConfig::default()
            },
        )
        .unwrap();

    let footnote: Option<StyledText> = None;
    let blocks = [Some(&heading), Some(&body), footnote.as_ref()];

    let height = stacked_height(blocks) + 2 * MARGIN as u32;
    println!("lines: {}/{}", heading.layout().line_count(), body.layout().line_count());
    println!("Result Size: {}x{}", WIDTH, height);

    // 3. Render to Image
    let mut image_buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(WIDTH, height, Rgb([20, 20, 25]));
    let image_size = [WIDTH as usize, height as usize];

    let mut blend = |pos: [usize; 2], alpha: u8, color: &TextColor| {
        let alpha_f = alpha as f32 / 255.0 * color.a;
        let pixel = image_buffer.get_pixel_mut(pos[0] as u32, pos[1] as u32);
        let mix = |fg: f32, bg: u8| {
            ((fg * alpha_f + bg as f32 / 255.0 * (1.0 - alpha_f)).clamp(0.0, 1.0) * 255.0) as u8
        };
        *pixel = Rgb([
            mix(color.r, pixel[0]),
            mix(color.g, pixel[1]),
            mix(color.b, pixel[2]),
        ]);
    };

    let mut y = MARGIN;
    for block in blocks.into_iter().flatten() {
        y += font_system.raster_render(block, [MARGIN, y], image_size, &mut blend) as f32;
    }

    // 4. Save Output
    std::fs::create_dir_all("debug").expect("failed to create debug directory");
    let output_path = "debug/paragraphs.png";
    image_buffer.save(output_path).expect("failed to save image");

    println!("Saved debug image to: {}", output_path);
}
