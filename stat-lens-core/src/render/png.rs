use resvg::usvg;
use stat_lens_common::{RenderConfig, StatLensError};

static DEJAVU_SANS: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");

pub const FONT_FAMILY: &str = "DejaVu Sans";

/// Rasterize an SVG document to PNG bytes. Each call owns its font
/// database and pixmap.
pub fn svg_to_png(svg: &str, config: &RenderConfig) -> stat_lens_common::Result<Vec<u8>> {
    let mut opt = usvg::Options {
        font_family: FONT_FAMILY.to_string(),
        ..usvg::Options::default()
    };
    let fontdb = opt.fontdb_mut();
    fontdb.load_font_data(DEJAVU_SANS.to_vec());
    // unmatched families resolve through the generic ones
    fontdb.set_sans_serif_family(FONT_FAMILY);
    fontdb.set_serif_family(FONT_FAMILY);
    if config.system_fonts {
        fontdb.load_system_fonts();
    }

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| StatLensError::Render(e.to_string()))?;

    let scale = if config.scale > 0.0 { config.scale } else { 1.0 };
    let size = tree.size();
    let w = (size.width() * scale).round() as u32;
    let h = (size.height() * scale).round() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| StatLensError::Render(format!("cannot allocate a {w}x{h} pixmap")))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| StatLensError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inked_pixels(png: &[u8]) -> usize {
        let pixmap = tiny_skia::Pixmap::decode_png(png).unwrap();
        pixmap.pixels().iter().filter(|p| p.red() < 128).count()
    }

    #[test]
    fn text_is_drawn_with_embedded_font() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="40"><text x="4" y="30" font-family="DejaVu Sans" font-size="24" fill="black">99% CI</text></svg>"#;
        let png = svg_to_png(svg, &RenderConfig::default()).unwrap();
        assert!(inked_pixels(&png) > 50);
    }

    #[test]
    fn unknown_family_falls_back_to_embedded_font() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="40"><text x="4" y="30" font-family="No Such Font" font-size="24" fill="black">Mean</text></svg>"#;
        let png = svg_to_png(svg, &RenderConfig::default()).unwrap();
        assert!(inked_pixels(&png) > 50);
    }
}
