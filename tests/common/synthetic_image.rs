/// White page (255) with dark (16) horizontal and vertical pen strokes, a
/// rough stand-in for a scanned handwritten word.
pub fn handwriting_u8(width: usize, height: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = vec![255u8; width * height];
    let baseline = height * 2 / 3;
    for x in width / 8..width - width / 8 {
        img[baseline * width + x] = 16;
        if baseline + 1 < height {
            img[(baseline + 1) * width + x] = 16;
        }
    }
    for stem in [width / 4, width / 2, width * 3 / 4] {
        for y in height / 5..baseline {
            img[y * width + stem] = 16;
        }
    }
    img
}

/// Constant-valued image.
pub fn uniform_u8(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height]
}
