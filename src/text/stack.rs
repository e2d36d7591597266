use crate::{renderer::RenderSink, text::StyledText};

/// Sums the heights of blocks stacked top to bottom.
///
/// `None` entries contribute nothing, which lets callers pass optional
/// sections (a missing subtitle, an empty footer) without filtering first.
pub fn stacked_height<'a, I>(texts: I) -> u32
where
    I: IntoIterator<Item = Option<&'a StyledText>>,
{
    texts
        .into_iter()
        .flatten()
        .fold(0, |total: u32, text| total.saturating_add(text.height()))
}

/// Renders blocks one below the other starting at `origin`.
///
/// Returns the combined height, equal to [`stacked_height`] over the same blocks.
pub fn render_stacked<'a, I, S>(texts: I, sink: &mut S, origin: [f32; 2]) -> u32
where
    I: IntoIterator<Item = Option<&'a StyledText>>,
    S: RenderSink + ?Sized,
{
    let mut offset: u32 = 0;
    for text in texts.into_iter().flatten() {
        let height = text.render(sink, [origin[0], origin[1] + offset as f32]);
        offset = offset.saturating_add(height);
    }
    offset
}
