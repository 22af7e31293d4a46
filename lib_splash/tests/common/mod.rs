#![allow(dead_code)]

/// 4x4 BGR image with three colors scattered around.
pub const RANDOM_BGR: [u8; 48] = [
    0, 0, 255, 0, 255, 0, 0, 0, 255, 255, 0, 0, //
    255, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255, //
    0, 255, 0, 0, 0, 255, 255, 0, 0, 255, 0, 0, //
    0, 0, 255, 0, 0, 255, 0, 0, 255, 0, 255, 0, //
];
pub const RANDOM_BGR_WIDTH: u32 = 4;
pub const RANDOM_BGR_HEIGHT: u32 = 4;

/// Every pixel differs from its neighbour, the worst case for RLE.
pub fn gradient(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[x as u8, y as u8, (x ^ y) as u8]);
        }
    }
    data
}

/// A solid background with a centered box and a one-pixel border, like a boot logo.
pub fn logo(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
            let inside = x > width / 4 && x < width * 3 / 4 && y > height / 4 && y < height * 3 / 4;
            let pixel = if border {
                [0xFF, 0xFF, 0xFF]
            } else if inside {
                [0x20, 0x80, 0xE0]
            } else {
                [0x00, 0x00, 0x00]
            };
            data.extend_from_slice(&pixel);
        }
    }
    data
}

/// Deterministic noise with short runs mixed in.
pub fn noise(width: u32, height: u32, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).max(1);
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    let mut pixel = [0u8; 3];
    for _ in 0..width * height {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        // Keep the previous pixel roughly half the time
        if state & 1 == 0 {
            pixel = [(state >> 8) as u8 & 0x03, (state >> 16) as u8, 0x40];
        }
        data.extend_from_slice(&pixel);
    }
    data
}
