pub const WHITE: u32 = 0xFF_FF_FF;
pub const BLACK: u32 = 0x00_00_00;

/// Pack into `0xRRGGBB`.
#[inline(always)]
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline(always)]
pub fn hex_to_rgb(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}
