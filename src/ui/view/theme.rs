//! 渲染上下文
//!
//! 终端色彩能力与强调色，启动时确定后逐次传入渲染函数

use ratatui::style::Color;
use serde::Deserialize;

use crate::models::Rgb;

/// 默认强调色
pub const DEFAULT_ACCENT: Rgb = Rgb::new(0x56, 0xde, 0x56);

/// 终端色彩能力
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorProfile {
    #[default]
    TrueColor,
    Ansi256,
    Ascii,
}

impl ColorProfile {
    /// 根据 `COLORTERM` 推断
    pub fn detect(colorterm: Option<&str>) -> Self {
        match colorterm {
            Some("truecolor" | "24bit") => ColorProfile::TrueColor,
            _ => ColorProfile::Ansi256,
        }
    }

    /// 将 RGB 映射为当前能力下的终端颜色
    pub fn color(self, rgb: Rgb) -> Color {
        match self {
            ColorProfile::TrueColor => Color::Rgb(rgb.r, rgb.g, rgb.b),
            ColorProfile::Ansi256 => Color::Indexed(ansi256_index(rgb)),
            ColorProfile::Ascii => Color::Reset,
        }
    }
}

/// xterm 256 色中最接近的索引（6x6x6 色立方或灰阶）
fn ansi256_index(rgb: Rgb) -> u8 {
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
    let cube = |c: u8| -> u8 {
        if c < 48 {
            0
        } else if c < 115 {
            1
        } else {
            (c - 35) / 40
        }
    };
    let (ri, gi, bi) = (cube(rgb.r), cube(rgb.g), cube(rgb.b));
    let cube_rgb = Rgb::new(LEVELS[ri as usize], LEVELS[gi as usize], LEVELS[bi as usize]);

    let avg = (u16::from(rgb.r) + u16::from(rgb.g) + u16::from(rgb.b)) / 3;
    let gray_i = avg.saturating_sub(3).min(233) as u8 / 10;
    let gray = 8 + 10 * gray_i;
    let gray_rgb = Rgb::new(gray, gray, gray);

    if distance(rgb, gray_rgb) < distance(rgb, cube_rgb) {
        232 + gray_i
    } else {
        16 + 36 * ri + 6 * gi + bi
    }
}

fn distance(a: Rgb, b: Rgb) -> u32 {
    let d = |x: u8, y: u8| (i32::from(x) - i32::from(y)).unsigned_abs().pow(2);
    d(a.r, b.r) + d(a.g, b.g) + d(a.b, b.b)
}

/// 渲染上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub profile: ColorProfile,
    pub accent: Rgb,
}

impl Theme {
    pub fn new(profile: ColorProfile, accent: Rgb) -> Self {
        Self { profile, accent }
    }

    pub fn color(&self, rgb: Rgb) -> Color {
        self.profile.color(rgb)
    }

    pub fn accent(&self) -> Color {
        self.color(self.accent)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ColorProfile::TrueColor, DEFAULT_ACCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_profile() {
        assert_eq!(ColorProfile::detect(Some("truecolor")), ColorProfile::TrueColor);
        assert_eq!(ColorProfile::detect(Some("24bit")), ColorProfile::TrueColor);
        assert_eq!(ColorProfile::detect(None), ColorProfile::Ansi256);
    }

    #[test]
    fn test_profile_colors() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(ColorProfile::TrueColor.color(red), Color::Rgb(255, 0, 0));
        assert_eq!(ColorProfile::Ansi256.color(red), Color::Indexed(196));
        assert_eq!(ColorProfile::Ansi256.color(Rgb::BLACK), Color::Indexed(16));
        assert_eq!(
            ColorProfile::Ansi256.color(Rgb::new(128, 128, 128)),
            Color::Indexed(244)
        );
        assert_eq!(ColorProfile::Ascii.color(red), Color::Reset);
    }
}
