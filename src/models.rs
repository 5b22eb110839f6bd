use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 调色板固定槽位数
pub const PALETTE_SIZE: usize = 5;

/// RGB 颜色，JSON 中表示为 `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 反色（每个通道取 255 - c），用于边框前景
    pub fn inverted(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// 十进制通道文本，编辑模式的初始内容
    pub fn channel_strings(self) -> [String; 3] {
        [self.r.to_string(), self.g.to_string(), self.b.to_string()]
    }

    /// 解析 `#RRGGBB`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{},{}]", self.r, self.g, self.b)
    }
}

/// 调色板槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaletteSlot {
    pub color: Rgb,
    pub locked: bool,
}

/// 五个固定槽位，进程生命周期内不增不减
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    pub slots: [PaletteSlot; PALETTE_SIZE],
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colors(&self) -> [Rgb; PALETTE_SIZE] {
        self.slots.map(|slot| slot.color)
    }

    pub fn locks(&self) -> [bool; PALETTE_SIZE] {
        self.slots.map(|slot| slot.locked)
    }

    pub fn toggle_lock(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        slot.locked = !slot.locked;
    }

    /// 与相邻槽位交换颜色；锁定标记属于位置，不随颜色移动
    pub fn swap_colors(&mut self, a: usize, b: usize) {
        let tmp = self.slots[a].color;
        self.slots[a].color = self.slots[b].color;
        self.slots[b].color = tmp;
    }

    /// 用生成结果覆盖全部颜色（锁定由服务端负责保留）
    pub fn overwrite_colors(&mut self, colors: [Rgb; PALETTE_SIZE]) {
        for (slot, color) in self.slots.iter_mut().zip(colors) {
            slot.color = color;
        }
    }
}

/// 循环移动索引：越过末尾回到 0，低于 0 回到末尾
pub fn wrap_move(current: usize, forward: bool, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

/// 通道文本校验错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("channel {index} is not a number: {text:?}")]
    NotANumber { index: usize, text: String },

    #[error("channel {index} is out of range 0-255: {value}")]
    OutOfRange { index: usize, value: i64 },
}

/// 将三段十进制文本解析为颜色，每段必须是 [0, 255] 内的整数
pub fn get_color(fields: &[String; 3]) -> Result<Rgb, ChannelError> {
    let mut out = [0u8; 3];
    for (index, text) in fields.iter().enumerate() {
        let value: i64 = text.parse().map_err(|_| ChannelError::NotANumber {
            index,
            text: text.clone(),
        })?;
        out[index] =
            u8::try_from(value).map_err(|_| ChannelError::OutOfRange { index, value })?;
    }
    Ok(Rgb::from(out))
}
