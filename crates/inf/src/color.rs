//! RGBA color type used by the legends.

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const RED: Color = Color::rgb(255, 0, 0);
pub const GREEN: Color = Color::rgb(0, 255, 0);
pub const BLUE: Color = Color::rgb(0, 0, 255);
pub const YELLOW: Color = Color::rgb(255, 255, 0);
pub const ORANGE: Color = Color::rgb(255, 128, 0);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Create a color from components in the [0, 1] range, out of range values are clamped
    pub fn from_normalized(r: f32, g: f32, b: f32, a: f32) -> Self {
        let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::rgba(to_byte(r), to_byte(g), to_byte(b), to_byte(a))
    }

    /// The color components normalized to the [0, 1] range (r, g, b, a)
    pub fn normalized(&self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn to_bits(&self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }

    pub fn from_bits(bits: u32) -> Self {
        let [r, g, b, a] = bits.to_le_bytes();
        Color { r, g, b, a }
    }

    /// Hex notation (#rrggbbaa)
    pub fn to_hex_rgba(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex_rgba())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_components() {
        assert_eq!(Color::rgba(255, 0, 51, 255).normalized(), [1.0, 0.0, 0.2, 1.0]);
        assert_eq!(BLACK.normalized(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn normalized_roundtrip() {
        let color = Color::rgba(12, 200, 99, 128);
        let [r, g, b, a] = color.normalized();
        assert_eq!(Color::from_normalized(r, g, b, a), color);
    }

    #[test]
    fn bits() {
        let color = Color::rgba(1, 2, 3, 4);
        assert_eq!(Color::from_bits(color.to_bits()), color);
        assert_eq!(color.to_hex_rgba(), "#01020304");
    }
}
