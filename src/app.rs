//! Terminal demo: a pane that goes busy while the spinner runs.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::settings::Settings;
use crate::terminal::{CanvasSurface, TerminalHost};
use crate::widget::{Host, WaitingSpinner};

/// How long to block on input while the timer is disarmed.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Speed change per `[` / `]` press, in revolutions per second.
const SPEED_STEP: f64 = 0.25;

pub struct App {
    spinner: WaitingSpinner<TerminalHost>,
    surface: CanvasSurface,
    message: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        let host = TerminalHost::new(settings.zoom);
        let spinner = WaitingSpinner::with_config(host, settings.options, settings.spinner.clone());
        Self {
            spinner,
            surface: CanvasSurface::new(settings.background, settings.zoom),
            message: None,
            should_quit: false,
        }
    }

    pub fn spinner(&self) -> &WaitingSpinner<TerminalHost> {
        &self.spinner
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Track the terminal size so the spinner can center over its pane.
    pub fn resize(&mut self, area: Rect) {
        let (pane, _) = split(area);
        self.spinner.host_mut().set_parent(pane_block(true).inner(pane));
    }

    pub fn toggle(&mut self) {
        if self.spinner.is_spinning() {
            self.spinner.stop();
            self.message = None;
        } else if let Err(e) = self.spinner.start() {
            self.message = Some(e.to_string());
        } else {
            self.message = None;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char(' ') => self.toggle(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let lines = self.spinner.config().number_of_lines().saturating_add(1);
                self.set_lines(lines);
            }
            KeyCode::Char('-') => {
                let lines = self.spinner.config().number_of_lines().saturating_sub(1).max(1);
                self.set_lines(lines);
            }
            KeyCode::Char(']') => {
                let speed = self.spinner.config().revolutions_per_second() + SPEED_STEP;
                self.set_speed(speed);
            }
            KeyCode::Char('[') => {
                let speed = (self.spinner.config().revolutions_per_second() - SPEED_STEP)
                    .max(SPEED_STEP);
                self.set_speed(speed);
            }
            _ => {}
        }
        self.spinner.host_mut().request_redraw();
    }

    fn set_lines(&mut self, lines: usize) {
        self.message = self
            .spinner
            .set_number_of_lines(lines)
            .err()
            .map(|e| e.to_string());
    }

    fn set_speed(&mut self, speed: f64) {
        self.message = self
            .spinner
            .set_revolutions_per_second(speed)
            .err()
            .map(|e| e.to_string());
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                self.resize(Rect::new(0, 0, width, height));
                self.spinner.host_mut().request_redraw();
            }
            _ => {}
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        self.resize(frame.area());
        let (pane, status) = split(frame.area());

        let enabled = self.spinner.host().is_parent_enabled();
        frame.render_widget(pane_block(enabled), pane);

        if self.spinner.host().is_visible() {
            self.spinner.paint(&mut self.surface);
            if let Some(area) = self.spinner.host().widget_area() {
                frame.render_widget(&self.surface, area);
            }
        }

        frame.render_widget(Paragraph::new(self.status_line()), status);
    }

    fn status_line(&self) -> Line<'static> {
        let config = self.spinner.config();
        let state = if self.spinner.is_spinning() {
            Span::styled("spinning", Style::default().fg(Color::Green))
        } else {
            Span::styled("stopped", Style::default().fg(Color::Yellow))
        };

        let mut spans = vec![
            state,
            Span::raw(format!(
                " | {} lines | {:.2} rev/s | tick {}ms | ",
                config.number_of_lines(),
                config.revolutions_per_second(),
                self.spinner.tick_interval().as_millis(),
            )),
        ];
        match &self.message {
            Some(message) => spans.push(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            )),
            None => spans.push(Span::styled(
                "space start/stop  +/- lines  [/] speed  q quit",
                Style::default().add_modifier(Modifier::DIM),
            )),
        }
        Line::from(spans)
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            if self.spinner.host_mut().take_redraw() {
                terminal
                    .draw(|frame| self.draw(frame))
                    .context("Failed to draw frame")?;
            }

            let timeout = self
                .spinner
                .time_until_tick(Instant::now())
                .unwrap_or(IDLE_POLL);
            if event::poll(timeout).context("Failed to poll terminal events")? {
                let event = event::read().context("Failed to read terminal event")?;
                self.handle_event(event);
            }

            self.spinner.poll(Instant::now());
        }
        Ok(())
    }
}

/// Run the demo until the user quits. The spinner starts immediately.
pub fn run(settings: Settings) -> Result<()> {
    let mut app = App::new(&settings);
    let mut terminal = ratatui::init();

    let result = terminal
        .size()
        .context("Failed to query terminal size")
        .and_then(|size| {
            app.resize(Rect::new(0, 0, size.width, size.height));
            if let Err(e) = app.spinner.start() {
                warn!(error = %e, "spinner did not start");
                app.message = Some(e.to_string());
            }
            info!("demo running");
            app.run_loop(&mut terminal)
        });

    ratatui::restore();
    result
}

/// Split the screen into the busy pane and a one-line status bar.
fn split(area: Rect) -> (Rect, Rect) {
    let [pane, status] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
    (pane, status)
}

fn pane_block(enabled: bool) -> Block<'static> {
    if enabled {
        Block::bordered().title(" workspace ")
    } else {
        Block::bordered()
            .title(" workspace (busy) ")
            .border_style(Style::default().add_modifier(Modifier::DIM))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app() -> App {
        let mut app = App::new(&Settings::default());
        app.resize(Rect::new(0, 0, 80, 24));
        app
    }

    #[test]
    fn test_space_toggles_spinner_and_parent() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char(' ')));
        assert!(app.spinner().is_spinning());
        assert!(!app.spinner().host().is_parent_enabled());
        assert!(app.spinner().host().is_visible());

        app.handle_key(press(KeyCode::Char(' ')));
        assert!(!app.spinner().is_spinning());
        assert!(app.spinner().host().is_parent_enabled());
        assert!(!app.spinner().host().is_visible());
    }

    #[test]
    fn test_line_keys() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char('+')));
        assert_eq!(app.spinner().config().number_of_lines(), 13);
        for _ in 0..20 {
            app.handle_key(press(KeyCode::Char('-')));
        }
        assert_eq!(app.spinner().config().number_of_lines(), 1);
    }

    #[test]
    fn test_speed_keys() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char(']')));
        assert_eq!(app.spinner().config().revolutions_per_second(), 1.25);
        for _ in 0..10 {
            app.handle_key(press(KeyCode::Char('[')));
        }
        assert_eq!(app.spinner().config().revolutions_per_second(), SPEED_STEP);
    }

    #[test]
    fn test_key_and_resize_queue_redraw() {
        let mut app = app();
        let _ = app.spinner.host_mut().take_redraw();

        app.handle_key(press(KeyCode::Char('+')));
        assert!(app.spinner.host_mut().take_redraw());
        assert!(!app.spinner.host_mut().take_redraw());

        app.handle_event(Event::Resize(80, 24));
        assert!(app.spinner.host_mut().take_redraw());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char('q')));
        assert!(app.should_quit());

        let mut app = self::app();
        app.handle_key(KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..press(KeyCode::Char('c'))
        });
        assert!(app.should_quit());
    }

    #[test]
    fn test_key_release_ignored() {
        let mut app = app();
        app.handle_key(KeyEvent {
            kind: KeyEventKind::Release,
            ..press(KeyCode::Char(' '))
        });
        assert!(!app.spinner().is_spinning());
    }

    #[test]
    fn test_start_error_shown_in_status() {
        let mut settings = Settings::default();
        let _ = settings.spinner.set_revolutions_per_second(0.0);
        let mut app = App::new(&settings);
        app.toggle();
        assert!(!app.spinner().is_spinning());
        assert!(app.message.as_deref().unwrap().contains("Invalid spinner cadence"));
    }

    #[test]
    fn test_draw_renders_spinner_and_status() {
        let mut app = app();
        app.toggle();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let status: String = (0..80u16)
            .map(|x| buffer[(x, 23u16)].symbol().to_string())
            .collect();
        assert!(status.starts_with("spinning | 12 lines"));

        let area = app.spinner().host().widget_area().unwrap();
        let painted = (area.top()..area.bottom())
            .flat_map(|y| (area.left()..area.right()).map(move |x| (x, y)))
            .filter(|&(x, y)| buffer[(x, y)].symbol() != " ")
            .count();
        assert!(painted > 0);
    }
}
