use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use term_popup::components::TextComponent;
use term_popup::popup::{Phase, Popup, Target};
use term_popup::ui::UiFrame;
use term_popup::WrapTarget;

#[derive(Parser, Debug)]
#[command(
    name = "popup-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Headless drag/resize benchmark for the popup state machine and renderer"
)]
struct BenchCli {
    /// Number of gestures to run. Drags and resizes alternate.
    #[arg(short = 'g', long = "gestures", default_value_t = 2_000)]
    gestures: u32,

    /// Pointer moves per gesture.
    #[arg(short = 's', long = "steps", default_value_t = 8)]
    steps: u16,

    /// Virtual terminal width.
    #[arg(long = "width", default_value_t = 120)]
    width: u16,

    /// Virtual terminal height.
    #[arg(long = "height", default_value_t = 40)]
    height: u16,
}

struct BenchConfig {
    gestures: u32,
    steps: u16,
    width: u16,
    height: u16,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(1..=1_000_000).contains(&cli.gestures) {
            return Err("gestures must be between 1 and 1000000".to_string());
        }
        if !(1..=256).contains(&cli.steps) {
            return Err("steps must be between 1 and 256".to_string());
        }
        if cli.width < 40 || cli.height < 16 {
            return Err("virtual terminal must be at least 40x16".to_string());
        }
        Ok(Self {
            gestures: cli.gestures,
            steps: cli.steps,
            width: cli.width,
            height: cli.height,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let mut terminal = Terminal::new(TestBackend::new(config.width, config.height))
        .map_err(|err| io::Error::other(err.to_string()))?;
    let mut popup = bench_popup();
    let stats = run_benchmark(&mut terminal, &mut popup, &config)?;
    println!("{}", stats.final_report(&config));
    Ok(())
}

fn bench_popup() -> Popup {
    let mut popup = Popup::new().with_title("bench");
    popup.set_preferred_size(40, 12);
    popup.set_transition_duration(Duration::ZERO);
    popup.set_movable(true);
    popup.set_resizable(true);
    popup.wrap(WrapTarget::Component(Box::new(TextComponent::new(
        "dragged and resized by popup-bench",
    ))));
    popup.open();
    popup
}

type BenchTerminal = Terminal<TestBackend>;

fn draw(terminal: &mut BenchTerminal, popup: &mut Popup, stats: &mut BenchStats) -> io::Result<()> {
    let start = Instant::now();
    terminal
        .draw(|frame| {
            let mut ui = UiFrame::new(frame);
            popup.render(&mut ui);
        })
        .map_err(|err| io::Error::other(err.to_string()))?;
    stats.record_frame(start.elapsed());
    Ok(())
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn run_benchmark(
    terminal: &mut BenchTerminal,
    popup: &mut Popup,
    config: &BenchConfig,
) -> io::Result<BenchStats> {
    let mut stats = BenchStats::new();
    draw(terminal, popup, &mut stats)?;
    if popup.phase() != Phase::Open {
        return Err(io::Error::other("popup did not settle open"));
    }

    for gesture in 0..config.gestures {
        let panel = popup.layout().panel;
        let resize = gesture % 2 == 1;
        let (start_col, start_row) = if resize {
            (
                (panel.x + panel.width as i32 - 1).max(0) as u16,
                (panel.y + panel.height as i32 - 1).max(0) as u16,
            )
        } else {
            (panel.x.max(0) as u16, panel.y.max(0) as u16)
        };
        let expected = if resize {
            Target::ResizeHandle
        } else {
            Target::Panel
        };
        if popup.layout().hit_test(start_col, start_row) != Some(expected) {
            stats.missed = stats.missed.saturating_add(1);
            continue;
        }

        let started = Instant::now();
        popup.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), start_col, start_row));
        let (mut col, mut row) = (start_col, start_row);
        for step in 0..config.steps {
            (col, row) = next_point(gesture, step, resize, (col, row), config);
            popup.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), col, row));
            draw(terminal, popup, &mut stats)?;
        }
        popup.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), col, row));
        stats.record_gesture(resize, started.elapsed());
    }

    let events = popup.drain_events();
    stats.events = events.len();
    stats.mark_completed();
    Ok(stats)
}

/// Drags wander across the viewport; resizes grow for half the steps and
/// shrink back for the rest so the panel keeps a stable size.
fn next_point(
    gesture: u32,
    step: u16,
    resize: bool,
    (col, row): (u16, u16),
    config: &BenchConfig,
) -> (u16, u16) {
    if resize {
        let grow = step < config.steps.div_ceil(2);
        return if grow {
            (col.saturating_add(1), row.saturating_add(1))
        } else {
            (col.saturating_sub(1), row.saturating_sub(1))
        };
    }
    let phase = gesture.wrapping_mul(31).wrapping_add(step as u32 * 7);
    (
        (phase % config.width as u32) as u16,
        ((phase / 3) % config.height as u32) as u16,
    )
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    drags: u64,
    resizes: u64,
    missed: u64,
    events: usize,
    frame_count: u64,
    total_draw_time: Duration,
    slowest_frame: Duration,
    total_gesture_time: Duration,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            drags: 0,
            resizes: 0,
            missed: 0,
            events: 0,
            frame_count: 0,
            total_draw_time: Duration::ZERO,
            slowest_frame: Duration::ZERO,
            total_gesture_time: Duration::ZERO,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_frame(&mut self, draw_time: Duration) {
        self.frame_count = self.frame_count.saturating_add(1);
        self.total_draw_time += draw_time;
        if draw_time > self.slowest_frame {
            self.slowest_frame = draw_time;
        }
    }

    fn record_gesture(&mut self, resize: bool, took: Duration) {
        if resize {
            self.resizes = self.resizes.saturating_add(1);
        } else {
            self.drags = self.drags.saturating_add(1);
        }
        self.total_gesture_time += took;
    }

    fn gestures(&self) -> u64 {
        self.drags + self.resizes
    }

    fn average_frame_ms(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        (self.total_draw_time.as_secs_f64() / self.frame_count as f64) * 1_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let per_second = if elapsed > 0.0 {
            self.gestures() as f64 / elapsed
        } else {
            0.0
        };
        let avg_gesture_ms = if self.gestures() == 0 {
            0.0
        } else {
            self.total_gesture_time.as_secs_f64() / self.gestures() as f64 * 1_000.0
        };

        indoc::formatdoc!(
            r#"
            Popup bench on a {width}x{height} virtual terminal.
            Gestures: {done}/{requested} ({drags} drags, {resizes} resizes, {missed} missed)
            Throughput: {per_second:.0} gestures/s | avg gesture {avg_gesture:.3} ms
            Frames: {frames} | avg {avg_frame:.3} ms | worst {worst:.3} ms
            Popup events emitted: {events}
            "#,
            width = config.width,
            height = config.height,
            done = self.gestures(),
            requested = config.gestures,
            drags = self.drags,
            resizes = self.resizes,
            missed = self.missed,
            per_second = per_second,
            avg_gesture = avg_gesture_ms,
            frames = self.frame_count,
            avg_frame = self.average_frame_ms(),
            worst = self.slowest_frame.as_secs_f64() * 1_000.0,
            events = self.events,
        )
    }
}
