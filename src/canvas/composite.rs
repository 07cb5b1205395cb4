use crate::canvas::surface::blend_rgba;
use image::RgbaImage;

/// Flattens the ink layer over the background into a fresh buffer.
/// Background first, ink second, so strokes are never hidden under the photo.
/// Pure with respect to its inputs: repeated calls produce identical pixels.
pub fn flatten(background: &RgbaImage, ink: &RgbaImage) -> RgbaImage {
    assert_eq!(background.width(), ink.width());
    assert_eq!(background.height(), ink.height());

    let mut output = background.clone();
    blend_in_place(&mut output, ink);
    output
}

fn blend_in_place(base: &mut RgbaImage, top: &RgbaImage) {
    for (dst, src) in base.pixels_mut().zip(top.pixels()) {
        *dst = blend_rgba(*dst, *src);
    }
}
