use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use thiserror::Error;

use term_popup::components::TextComponent;
use term_popup::config::{Cli, ConfigError, PopupConfig};
use term_popup::drivers::OutputDriver;
use term_popup::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_popup::event_loop::{ControlFlow, EventLoop};
use term_popup::ui::UiFrame;
use term_popup::{NodeRegistry, Popup, WrapTarget, tracing_sub};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const EVENT_HISTORY: usize = 6;

const BACKGROUND: &str = indoc::indoc! {"
    term-popup demo

    o  open the popup
    c  confirm
    d  dismiss
    x  close
    q  quit

    Click the dimmed backdrop to dismiss. Drag the border with --move,
    resize from the corner with --resize.
"};

const BODY: &str = indoc::indoc! {"
    This panel sits over a dimmed backdrop.

    Press and release on the backdrop to ask for dismissal. A press that
    starts inside the panel never dismisses it.
"};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = PopupConfig::try_from(&cli)?;
    tracing_sub::init(config.log_file.as_deref())?;

    let mut app = App::new(&config);
    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let mut event_loop = EventLoop::new(ConsoleInputDriver::new(), FRAME_INTERVAL);
    let result = event_loop.run(|_, event| app.step(&mut output, event));
    output.exit()?;
    result?;
    Ok(())
}

struct App {
    popup: Popup,
    history: VecDeque<String>,
    last_tick: Instant,
}

impl App {
    fn new(config: &PopupConfig) -> Self {
        let mut popup = Popup::new();
        config.apply(&mut popup);
        popup.wrap(WrapTarget::Component(Box::new(TextComponent::new(BODY))));

        let mut registry = NodeRegistry::new();
        registry.insert(
            "hint",
            Box::new(
                TextComponent::new("[c] confirm  [d] dismiss")
                    .with_alignment(Alignment::Center)
                    .with_style(Style::default().fg(Color::DarkGray)),
            ),
        );
        popup.wrap(WrapTarget::Selector {
            registry: &mut registry,
            selector: "#hint",
        });
        popup.open();

        Self {
            popup,
            history: VecDeque::with_capacity(EVENT_HISTORY),
            last_tick: Instant::now(),
        }
    }

    fn step(
        &mut self,
        output: &mut ConsoleOutputDriver,
        event: Option<Event>,
    ) -> io::Result<ControlFlow> {
        let Some(event) = event else {
            let now = Instant::now();
            self.popup.tick(now.duration_since(self.last_tick));
            self.last_tick = now;
            self.collect_events();
            output.draw(|mut frame| self.draw(&mut frame))?;
            return Ok(ControlFlow::Continue);
        };
        if self.popup.handle_event(&event) {
            return Ok(ControlFlow::Continue);
        }
        let Event::Key(key) = event else {
            return Ok(ControlFlow::Continue);
        };
        match key.code {
            KeyCode::Char('q') => return Ok(ControlFlow::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(ControlFlow::Quit);
            }
            KeyCode::Char('o') => self.popup.open(),
            KeyCode::Char('c') => self.popup.confirm(),
            KeyCode::Char('d') => self.popup.dismiss(),
            KeyCode::Char('x') => self.popup.close(),
            _ => {}
        }
        Ok(ControlFlow::Continue)
    }

    fn collect_events(&mut self) {
        for event in self.popup.drain_events() {
            tracing::info!(%event, "host received popup event");
            if self.history.len() == EVENT_HISTORY {
                self.history.pop_front();
            }
            self.history.push_back(event.to_string());
        }
    }

    fn draw(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        if area.width == 0 || area.height == 0 {
            return;
        }
        let background = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        frame.render_widget(Paragraph::new(BACKGROUND), background);

        let events: Vec<&str> = self.history.iter().map(String::as_str).collect();
        let status = format!(
            " {:?} | nodes: {} | events: {}",
            self.popup.phase(),
            self.popup.content_len(),
            if events.is_empty() {
                "-".to_string()
            } else {
                events.join(", ")
            }
        );
        let status_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(status).style(Style::default().fg(Color::Black).bg(Color::Gray)),
            status_area,
        );

        self.popup.render(frame);
    }
}
