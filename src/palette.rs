// Wheel color palettes. Each wheel draws its rings, dots, rays and tail from
// one palette, and particles passing near a wheel borrow six of its colors.

use crate::color::Color;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub outer: Color,
    pub ring1: Color,
    pub ring2: Color,
    pub ring3: Color,
    pub dots1: Color,
    pub dots2: Color,
    pub dots3: Color,
    pub rays: Color,
    pub inner: Color,
    pub center: Color,
    pub tail: Color,
}

impl Palette {
    // Entries are RRGGBB, all opaque
    const fn from_hex(hex: [u32; 11]) -> Palette {
        Palette {
            outer: Color::from_u32(hex[0] << 8 | 0xff),
            ring1: Color::from_u32(hex[1] << 8 | 0xff),
            ring2: Color::from_u32(hex[2] << 8 | 0xff),
            ring3: Color::from_u32(hex[3] << 8 | 0xff),
            dots1: Color::from_u32(hex[4] << 8 | 0xff),
            dots2: Color::from_u32(hex[5] << 8 | 0xff),
            dots3: Color::from_u32(hex[6] << 8 | 0xff),
            rays: Color::from_u32(hex[7] << 8 | 0xff),
            inner: Color::from_u32(hex[8] << 8 | 0xff),
            center: Color::from_u32(hex[9] << 8 | 0xff),
            tail: Color::from_u32(hex[10] << 8 | 0xff),
        }
    }

    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Palette {
        // PALETTES is never empty
        *PALETTES.choose(rng).unwrap_or(&PALETTES[0])
    }

    /// The colors a particle may take while steering around a wheel.
    pub fn flow_choices(&self) -> [Color; 6] {
        [
            self.dots1, self.dots2, self.dots3, self.tail, self.ring1, self.ring2,
        ]
    }
}

pub static PALETTES: [Palette; 10] = [
    Palette::from_hex([
        0xFFFFFF, 0xFF7EB6, 0xFF96BF, 0xFFB7D4, 0xE83432, 0xFFFFFF,
        0xFF7AAE, 0xFF4C8B, 0xE92D72, 0x000000, 0xFF4F9D,
    ]),
    Palette::from_hex([
        0xFF9A00, 0xFFAF37, 0xFFC260, 0xFFDD9E, 0xE83432, 0xFF81B9,
        0xFF507C, 0xE83432, 0xFF4D84, 0x000000, 0xFF4F9D,
    ]),
    Palette::from_hex([
        0xFEC850, 0xF7A6D8, 0xE86AB8, 0xB857B0, 0xB52A8B, 0xF5B3D9,
        0xF43EA1, 0xB52A8B, 0xFF66C4, 0x000000, 0xFF3D72,
    ]),
    Palette::from_hex([
        0xFFFFFF, 0xC77ADD, 0xA75BC7, 0x7E4AA8, 0xE83432, 0xFFFFFF,
        0xD47BE0, 0xE83432, 0x6AEB76, 0x000000, 0xFF4FA7,
    ]),
    Palette::from_hex([
        0xFFFFFF, 0x91EA7C, 0xC2FAB8, 0xF47FC2, 0x2E9F37, 0xC3F9C4,
        0xF85AA4, 0x2E9F37, 0xFF5AAD, 0x000000, 0xFF4FA0,
    ]),
    Palette::from_hex([
        0xFDBA3B, 0xFFDD85, 0xFFEEC0, 0xF79F2D, 0x1B3C88, 0xFFFFFF,
        0xC682CA, 0x1B3C88, 0xE93D67, 0x000000, 0xFF4F9C,
    ]),
    Palette::from_hex([
        0xFDC54C, 0xF275BD, 0xC964C5, 0x66A4C0, 0xC76A00, 0xFDC54C,
        0xEF75D1, 0xC76A00, 0x9ECCE0, 0x000000, 0xFF4F9D,
    ]),
    Palette::from_hex([
        0xFFFFFF, 0xF38DBF, 0xF05C8E, 0xD64A72, 0xE83432, 0xFFFFFF,
        0xED5393, 0xE83432, 0x6EB66A, 0x000000, 0xFF4FA0,
    ]),
    Palette::from_hex([
        0x234BA0, 0x7ACD8A, 0xED5AAA, 0xD96A98, 0x0D2C75, 0x1F46A3,
        0xB05CCD, 0x0D2C75, 0xE63C45, 0x000000, 0xFF4FA0,
    ]),
    Palette::from_hex([
        0xEFB23A, 0xF47FBB, 0x6B75A0, 0x363939, 0x26488F, 0xFCEDC6,
        0xED5B5E, 0x26488F, 0xF4343D, 0x000000, 0xFF4FA7,
    ]),
];
