mod client;
mod config;
mod logging;
mod models;
mod ui;

use std::io::{self, Stdout, Write};
use std::panic;

use anyhow::{Context, Result};
use crossterm::{
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{prelude::*, style::Color};
use tracing::{error, info};

use crate::client::PaletteClient;
use crate::config::{config_path, load_config};
use crate::ui::view::{error_text, summary, theme::Theme};
use crate::ui::{Runtime, Session};

fn main() -> Result<()> {
    // 加载配置 (~/.config/vivid/config.toml)
    let config = load_config(&config_path()?).context("Failed to load config")?;
    let log_guard = logging::init(&logging::log_path()?).context("Failed to set up logging")?;
    let theme = config.theme(std::env::var("COLORTERM").ok().as_deref());
    info!(endpoint = %config.endpoint, profile = ?theme.profile, "starting");

    let client = PaletteClient::new(&config.endpoint).context("Failed to create HTTP client")?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    // 创建应用状态
    let mut session = Session::new();
    let mut app = Runtime::new(client, runtime.handle().clone());

    // 设置终端
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    // 主循环
    let result = app.run(&mut terminal, &mut session, &theme);

    // 恢复终端
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    runtime.shutdown_background();

    result.context("Event loop failed")?;

    print_final_frame(&session, &theme)?;
    if let Some(err) = &session.last_error {
        error!(%err, "exiting after network failure");
        drop(log_guard);
        std::process::exit(1);
    }
    Ok(())
}

/// 进入 raw 模式与备用屏幕；中途失败时撤销已完成的步骤
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let entered = execute!(io::stdout(), EnterAlternateScreen)
        .context("Failed to enter alternate screen")
        .and_then(|()| {
            Terminal::new(CrosstermBackend::new(io::stdout())).context("Failed to create terminal")
        });
    rollback_on_error(entered, || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })
}

/// 失败时执行回滚，成功时原样返回
fn rollback_on_error<T>(result: Result<T>, rollback: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        rollback();
    }
    result
}

/// panic 时先恢复终端再输出信息
fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));
}

/// 离开备用屏幕后输出最终帧：错误信息或调色板摘要
fn print_final_frame(session: &Session, theme: &Theme) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if let Some(err) = &session.last_error {
        write!(out, "{}", error_text(err))?;
        return out.flush();
    }
    if !session.quitting {
        return Ok(());
    }

    let summary = summary(&session.palette, theme);
    for span in &summary.bar.spans {
        let background = span.style.bg.map_or(TermColor::Reset, to_term_color);
        queue!(
            out,
            SetBackgroundColor(background),
            Print(span.content.as_ref()),
            ResetColor
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{}", summary.text)?;
    out.flush()
}

fn to_term_color(color: Color) -> TermColor {
    match color {
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::Indexed(i) => TermColor::AnsiValue(i),
        _ => TermColor::Reset,
    }
}
