use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::models::Rgb;
use crate::ui::view::theme::{ColorProfile, DEFAULT_ACCENT, Theme};

/// 默认服务地址
pub const DEFAULT_ENDPOINT: &str = "http://colormind.io";

/// 配置文件结构 (~/.config/vivid/config.toml)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub accent: String,
    pub color_profile: Option<ColorProfile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            accent: "#56DE56".to_string(),
            color_profile: None,
        }
    }
}

impl Config {
    /// 构造渲染上下文；未配置色彩能力时根据 `COLORTERM` 推断
    pub fn theme(&self, colorterm: Option<&str>) -> Theme {
        let profile = self
            .color_profile
            .unwrap_or_else(|| ColorProfile::detect(colorterm));
        let accent = Rgb::from_hex(&self.accent).unwrap_or(DEFAULT_ACCENT);
        Theme::new(profile, accent)
    }
}

/// 获取配置文件路径
pub fn config_path() -> io::Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no user config directory"))?;
    Ok(dir.join("vivid").join("config.toml"))
}

/// 从TOML文件加载配置，文件不存在时使用默认值
pub fn load_config(path: &Path) -> io::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    let config: Config =
        toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if Rgb::from_hex(&config.accent).is_none() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("accent must be #RRGGBB, got {:?}", config.accent),
        ));
    }
    Ok(config)
}
