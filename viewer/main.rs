extern crate tokio;
use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyCode, MouseEventKind},
    ExecutableCommand,
};
use futures::StreamExt;
use orrery::{
    clock::TimeScale,
    game::{entity::BodyKind, system::SolarSystem},
    render::Viewport,
    scheduler::{DriveMode, PhysicsHandle, Scheduler},
    snapshot::Snapshot,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Position, Rect},
    style::{Color, Style},
    text::Text,
    widgets::{
        canvas::{Canvas, Circle, Points},
        Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Table, TableState,
    },
    DefaultTerminal, Frame,
};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    #[arg(value_name = "CONFIG", default_value = "planets.yml")]
    config: String,

    #[arg(short, long, default_value_t = TimeScale::DEFAULT)]
    time_scale: f64,

    /// Tick at a fixed rate instead of free-running
    #[arg(long, value_name = "HZ")]
    fixed_rate: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let system = SolarSystem::from_path(&args.config)?;
    let mode = match args.fixed_rate {
        Some(frequency) => DriveMode::FixedRate { frequency },
        None => DriveMode::free_running(),
    };
    let physics = Scheduler::new(mode, TimeScale::new(args.time_scale)?)?.spawn(system);

    let terminal = ratatui::init();
    let app_result = App::default().run(terminal, &physics).await;
    ratatui::restore();

    let system = physics.shutdown().await?;
    println!(
        "Simulated {:.1} days in {} ticks",
        system.get_elapsed() / 86_400.,
        system.get_ticks()
    );
    app_result
}

#[derive(Debug)]
struct App {
    should_quit: bool,
    snapshot: Snapshot,
    viewport: Viewport,
    list_scroll: usize,
    list_area: Rect,
    draw_area: Rect,
    status: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        let mut viewport = Viewport::default();
        viewport.set_zoom(4.);
        App {
            should_quit: false,
            snapshot: Snapshot::default(),
            viewport,
            list_scroll: 0,
            list_area: Rect::default(),
            draw_area: Rect::default(),
            status: None,
        }
    }
}

impl App {
    const FRAMES_PER_SECOND: f32 = 60.0;
    const ZOOM_STEP: f64 = 1.25;
    const RADIUS_STEP: f64 = 1.5;

    pub async fn run(mut self, mut terminal: DefaultTerminal, physics: &PhysicsHandle) -> Result<()> {
        let period = Duration::from_secs_f32(1.0 / Self::FRAMES_PER_SECOND);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();
        let mut snapshots = physics.subscribe();
        std::io::stdout().execute(crossterm::event::EnableMouseCapture)?;

        while !self.should_quit {
            tokio::select! {
                _ = interval.tick() => {
                    if physics.is_finished() {
                        self.should_quit = true;
                    }
                    self.snapshot = snapshots.borrow_and_update().clone();
                    terminal.draw(|frame| self.draw(frame))?;
                },
                Some(Ok(event)) = events.next() => {
                    self.handle_event(&event, physics.borrow_time_scale());
                },
            }
        }

        std::io::stdout().execute(crossterm::event::DisableMouseCapture)?;
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(f.area());

        let follow = self.viewport.follow.as_deref().unwrap_or("Sun");
        let bandeau = Paragraph::new(Text::from(vec![
            format!(
                "tick {}  |  {:.1} days  |  time scale {:.0} s/s  |  zoom {:.2}  |  following {}",
                self.snapshot.tick,
                self.snapshot.elapsed / 86_400.,
                self.snapshot.time_scale,
                self.viewport.zoom,
                follow
            )
            .into(),
            self.status
                .as_deref()
                .unwrap_or("q quit  +/- zoom  ←/→ time scale  f follow  [/] planet size  {/} sun size  j/k scroll")
                .into(),
        ]))
        .block(Block::default().title("Simulation").borders(Borders::ALL));
        f.render_widget(bandeau, chunks[0]);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Ratio(4, 10)])
            .split(chunks[1]);

        self.list_area = main_chunks[1];
        self.draw_area = main_chunks[0];

        self.draw_table(f);
        self.draw_system(f);
    }

    fn draw_table(&mut self, f: &mut Frame) {
        const AU: f64 = 1.496e11;

        let header = ["Name", "Type", "X (AU)", "Y (AU)"]
            .into_iter()
            .map(Cell::from)
            .collect::<Row>()
            .height(1);
        let rows = self.snapshot.bodies.iter().enumerate().map(|(i, body)| {
            let color = match i % 2 {
                0 => Color::Black,
                _ => Color::DarkGray,
            };
            let cells = vec![
                Cell::from(Text::from(body.name.clone())),
                Cell::from(Text::from(body.kind.as_str())),
                Cell::from(Text::from(format!("{:.3}", body.position[0] / AU))),
                Cell::from(Text::from(format!("{:.3}", body.position[1] / AU))),
            ];
            Row::new(cells).style(Style::new().fg(Color::White).bg(color))
        });
        let bar = " █ ";
        let t = Table::new(
            rows,
            [
                Constraint::Min(10),
                Constraint::Min(7),
                Constraint::Min(8),
                Constraint::Min(8),
            ],
        )
        .header(header)
        .block(Block::default().title("Bodies").borders(Borders::ALL))
        .highlight_symbol(Text::from(vec!["".into(), bar.into(), bar.into(), "".into()]))
        .highlight_spacing(HighlightSpacing::Always);
        f.render_stateful_widget(
            t,
            self.list_area,
            &mut TableState::default().with_selected(self.list_scroll),
        );

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));

        let mut scrollbar_state =
            ScrollbarState::new(self.snapshot.bodies.len()).position(self.list_scroll);

        f.render_stateful_widget(
            scrollbar,
            self.list_area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }

    fn draw_system(&mut self, f: &mut Frame) {
        // Braille markers give 2x4 dots per terminal cell.
        self.viewport.width = self.draw_area.width.saturating_sub(2) as f64 * 2.;
        self.viewport.height = self.draw_area.height.saturating_sub(2).max(1) as f64 * 4.;

        let sprites = self.viewport.project(&self.snapshot);
        let (width, height) = (self.viewport.width, self.viewport.height);

        let system_canvas = Canvas::default()
            .block(Block::default().title("System").borders(Borders::ALL))
            .x_bounds([0., width])
            .y_bounds([0., height])
            .paint(move |ctx| {
                for sprite in &sprites {
                    let color = match sprite.kind {
                        BodyKind::Star => Color::Yellow,
                        BodyKind::Planet => Color::Blue,
                        BodyKind::Moon => Color::White,
                    };
                    let (x, y) = (sprite.x, height - sprite.y);
                    ctx.layer();
                    if sprite.radius >= 1. {
                        ctx.draw(&Circle {
                            x,
                            y,
                            radius: sprite.radius,
                            color,
                        });
                    } else {
                        ctx.draw(&Points {
                            coords: &[(x, y)],
                            color,
                        });
                    }
                }
            });

        f.render_widget(system_canvas, self.draw_area);
    }

    fn scale_time(&mut self, time_scale: &TimeScale, factor: f64) {
        self.status = match time_scale.scale_by(factor) {
            Ok(_) => None,
            Err(err) => Some(err.to_string()),
        };
    }

    fn scroll_list_down(&mut self, rows: usize) {
        let last = self.snapshot.bodies.len().saturating_sub(1);
        self.list_scroll = (self.list_scroll + rows).min(last);
    }

    fn handle_event(&mut self, event: &Event, time_scale: &TimeScale) {
        match event {
            Event::Key(key_event) => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    self.viewport.zoom_by(Self::ZOOM_STEP);
                }
                KeyCode::Char('-') => {
                    self.viewport.zoom_by(1. / Self::ZOOM_STEP);
                }
                KeyCode::Right => {
                    self.scale_time(time_scale, 2.);
                }
                KeyCode::Left => {
                    self.scale_time(time_scale, 0.5);
                }
                KeyCode::Char('f') => {
                    self.viewport.follow_next(&self.snapshot);
                }
                KeyCode::Char(']') => {
                    self.viewport.planet_scale *= Self::RADIUS_STEP;
                }
                KeyCode::Char('[') => {
                    self.viewport.planet_scale /= Self::RADIUS_STEP;
                }
                KeyCode::Char('}') => {
                    self.viewport.star_scale *= Self::RADIUS_STEP;
                }
                KeyCode::Char('{') => {
                    self.viewport.star_scale /= Self::RADIUS_STEP;
                }
                KeyCode::Char('j') => {
                    self.scroll_list_down(1);
                }
                KeyCode::Char('k') => {
                    self.list_scroll = self.list_scroll.saturating_sub(1);
                }
                _ => {}
            },

            Event::Mouse(event) => match event.kind {
                MouseEventKind::ScrollUp => {
                    if self
                        .draw_area
                        .contains(Position::new(event.column, event.row))
                    {
                        self.viewport.zoom_by(Self::ZOOM_STEP);
                    }

                    if self
                        .list_area
                        .contains(Position::new(event.column, event.row))
                    {
                        self.list_scroll = self
                            .list_scroll
                            .saturating_sub((self.list_area.height as usize).saturating_sub(2));
                    }
                }
                MouseEventKind::ScrollDown => {
                    if self
                        .draw_area
                        .contains(Position::new(event.column, event.row))
                    {
                        self.viewport.zoom_by(1. / Self::ZOOM_STEP);
                    }
                    if self
                        .list_area
                        .contains(Position::new(event.column, event.row))
                    {
                        self.scroll_list_down((self.list_area.height as usize).saturating_sub(2));
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use orrery::snapshot::BodyInfo;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app_with_bodies(count: usize) -> App {
        let mut app = App::default();
        app.snapshot.bodies = (0..count)
            .map(|i| BodyInfo {
                name: format!("Body{}", i),
                kind: BodyKind::Planet,
                parent: None,
                position: [0., 0.],
                radius: 1.,
            })
            .collect();
        app
    }

    #[test]
    fn star_size_keys_change_only_the_star() {
        let mut app = App::default();
        let time_scale = TimeScale::default();
        let planet_scale = app.viewport.planet_scale;
        let star_scale = app.viewport.star_scale;

        app.handle_event(&key(KeyCode::Char('}')), &time_scale);
        assert_eq!(star_scale * App::RADIUS_STEP, app.viewport.star_scale);
        app.handle_event(&key(KeyCode::Char('{')), &time_scale);
        app.handle_event(&key(KeyCode::Char('{')), &time_scale);
        assert_eq!(star_scale / App::RADIUS_STEP, app.viewport.star_scale);
        assert_eq!(planet_scale, app.viewport.planet_scale);
    }

    #[test]
    fn list_scroll_stops_at_last_body() {
        let mut app = app_with_bodies(3);
        let time_scale = TimeScale::default();

        for _ in 0..10 {
            app.handle_event(&key(KeyCode::Char('j')), &time_scale);
        }
        assert_eq!(2, app.list_scroll);

        app.scroll_list_down(50);
        assert_eq!(2, app.list_scroll);

        app.handle_event(&key(KeyCode::Char('k')), &time_scale);
        assert_eq!(1, app.list_scroll);
    }

    #[test]
    fn rejected_time_scale_is_reported() -> Result<()> {
        let mut app = App::default();

        let time_scale = TimeScale::new(f64::MAX)?;
        app.handle_event(&key(KeyCode::Right), &time_scale);
        assert_eq!(f64::MAX, time_scale.get());
        assert!(app.status.as_deref().unwrap_or_default().contains("time scale"));

        app.handle_event(&key(KeyCode::Left), &time_scale);
        assert_eq!(None, app.status);

        let paused = TimeScale::new(0.)?;
        app.handle_event(&key(KeyCode::Right), &paused);
        assert_eq!(TimeScale::RESUME, paused.get());
        Ok(())
    }
}
