//! 事件循环与 Effect 执行
//!
//! 网络请求在 tokio 运行时上执行，结果通过 inbox 通道作为普通 Event 送回主循环。
//! 主循环每次只处理一个 Event，处理完再绘制。

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use super::actions::{Effect, Event};
use super::input::key_from_event;
use super::state::Session;
use super::view::{render, theme::Theme};
use crate::client::PaletteClient;

/// 无输入时的轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// 执行一个 Effect，将结果转换为 Event
pub async fn execute_effect(client: &PaletteClient, effect: Effect) -> Event {
    match effect {
        Effect::ListModels => match client.list_models().await {
            Ok(names) => Event::ModelsLoaded(names),
            Err(err) => Event::NetworkFailed {
                request: None,
                error: err.to_string(),
            },
        },
        Effect::GenerateColors {
            request,
            model,
            colors,
            locks,
        } => match client.generate_colors(&model, colors, locks).await {
            Ok(colors) => Event::ColorsGenerated { request, colors },
            Err(err) => Event::NetworkFailed {
                request: Some(request),
                error: err.to_string(),
            },
        },
    }
}

/// 事件循环
pub struct Runtime {
    client: PaletteClient,
    handle: Handle,
    inbox_tx: UnboundedSender<Event>,
    inbox_rx: UnboundedReceiver<Event>,
}

impl Runtime {
    pub fn new(client: PaletteClient, handle: Handle) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            client,
            handle,
            inbox_tx,
            inbox_rx,
        }
    }

    /// 后台执行 Effect，不阻塞主循环
    pub fn spawn_effect(&self, effect: Effect) {
        debug!(?effect, "spawning effect");
        let client = self.client.clone();
        let tx = self.inbox_tx.clone();
        self.handle.spawn(async move {
            let event = execute_effect(&client, effect).await;
            // 主循环已退出时丢弃结果
            let _ = tx.send(event);
        });
    }

    /// 运行主循环，直到退出或发生致命错误
    pub fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        session: &mut Session,
        theme: &Theme,
    ) -> io::Result<()> {
        self.spawn_effect(session.init());
        let size = terminal.size()?;
        session.update(Event::Resize(size.width, size.height));

        terminal.draw(|frame| render(frame, session, theme))?;
        while !session.is_finished() {
            for event in self.collect_events()? {
                if let Some(effect) = session.update(event) {
                    self.spawn_effect(effect);
                }
                if session.is_finished() {
                    break;
                }
                // 每个事件处理完后重绘一次
                terminal.draw(|frame| render(frame, session, theme))?;
            }
        }
        info!(quitting = session.quitting, "event loop finished");
        Ok(())
    }

    /// 收集 inbox 结果与终端输入
    fn collect_events(&mut self) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();
        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        let timeout = if events.is_empty() {
            POLL_INTERVAL
        } else {
            Duration::ZERO
        };
        if event::poll(timeout)? {
            events.extend(translate(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.extend(translate(event::read()?));
            }
        }
        Ok(events)
    }
}

/// 终端事件 -> Event
///
/// Ctrl+C 是进程级退出，直接转为 `Event::Quit`，不经过按键映射
fn translate(event: TermEvent) -> Option<Event> {
    match event {
        TermEvent::Key(key)
            if key.kind == KeyEventKind::Press
                && key.code == KeyCode::Char('c')
                && key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(Event::Quit)
        }
        TermEvent::Key(key) => key_from_event(key).map(Event::KeyPressed),
        TermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PALETTE_SIZE, Rgb};
    use crate::ui::actions::Key;
    use crate::ui::state::Mode;
    use crossterm::event::KeyEvent;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_model_list_failure_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/list/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let client = PaletteClient::new(&server.uri()).unwrap();

        let mut session = Session::new();
        let event = execute_effect(&client, session.init()).await;
        assert!(matches!(event, Event::NetworkFailed { request: None, .. }));
        assert_eq!(session.update(event), None);
        assert!(session.is_finished());
        assert_eq!(session.mode, Mode::SelectingModel);
        assert!(session.last_error.is_some());
    }

    #[tokio::test]
    async fn test_full_generation_cycle() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/list/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"Result":["default"]}"#))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"Result":[[1,1,1],[2,2,2],[3,3,3],[4,4,4],[5,5,5]]}"#,
            ))
            .mount(&server)
            .await;
        let client = PaletteClient::new(&server.uri()).unwrap();

        let mut session = Session::new();
        let loaded = execute_effect(&client, session.init()).await;
        session.update(loaded);
        session.update(Event::KeyPressed(Key::Enter));
        assert_eq!(session.mode, Mode::Browsing);

        let effect = session
            .update(Event::KeyPressed(Key::Char('r')))
            .unwrap();
        let generated = execute_effect(&client, effect).await;
        session.update(generated);
        assert_eq!(session.palette.slots[4].color, Rgb::new(5, 5, 5));
        assert_eq!(session.palette.colors().len(), PALETTE_SIZE);
    }

    #[test]
    fn test_translate_resize() {
        assert_eq!(
            translate(TermEvent::Resize(80, 24)),
            Some(Event::Resize(80, 24))
        );
        assert_eq!(translate(TermEvent::FocusGained), None);
    }

    #[test]
    fn test_translate_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate(TermEvent::Key(ctrl_c)), Some(Event::Quit));

        let plain_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(
            translate(TermEvent::Key(plain_q)),
            Some(Event::KeyPressed(Key::Char('q')))
        );

        let mut session = Session::new();
        session.update(translate(TermEvent::Key(ctrl_c)).unwrap());
        assert!(session.quitting);
        assert!(session.is_finished());
    }
}
