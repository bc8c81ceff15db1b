use std::time::{Duration, Instant};

use byeol_config::Config;
use byeol_core::Theme;
use byeol_scene::{Backdrop, BackdropRng, FrameInput, Surface};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::{
    DefaultTerminal, Frame,
    layout::Rect,
    style::Stylize,
    text::Line,
    widgets::Paragraph,
};

/// Resize bursts are coalesced into one regeneration after this gap.
const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    let reduced_motion = std::env::var_os("BYEOL_REDUCED_MOTION").is_some_and(|v| !v.is_empty());

    let terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;
    let size = terminal.size()?;
    let result = App::new(config, reduced_motion, size.width, size.height).run(terminal);
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current presentation theme, injected into the backdrop each frame.
    theme: Theme,
    backdrop: Backdrop,
    surface: Surface,
    /// Epoch for the running timestamp handed to the backdrop.
    started: Instant,
    /// Most recent resize event, applied after the debounce gap.
    pending_resize: Option<(u16, u16, Instant)>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, reduced_motion: bool, cols: u16, rows: u16) -> Self {
        // One pixel per half block: full columns, doubled rows.
        let (width, height) = (cols as usize, rows as usize * 2);
        let backdrop = Backdrop::new(
            config,
            width as f64,
            height as f64,
            reduced_motion,
            BackdropRng::from_entropy(),
        );
        Self {
            running: false,
            theme: Theme::Dark,
            backdrop,
            surface: Surface::new(width, height),
            started: Instant::now(),
            pending_resize: None,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let mut animating = true;
        while self.running {
            self.apply_debounced_resize();
            terminal.draw(|frame| animating = self.render(frame))?;
            self.handle_crossterm_events(animating)?;
        }
        self.backdrop.teardown(&mut self.surface);
        Ok(())
    }

    /// Renders the backdrop and the help line. Returns whether another
    /// frame should be scheduled.
    fn render(&mut self, frame: &mut Frame) -> bool {
        let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let animating = self.backdrop.render(
            &mut self.surface,
            FrameInput {
                now_ms,
                theme: self.theme,
            },
        );

        let area = frame.area();
        frame.render_widget(Paragraph::new(self.surface.to_lines()), area);

        if area.height > 0 {
            let help_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
            frame.render_widget(self.help_line(), help_area);
        }
        animating
    }

    /// Bottom help bar; doubles as the hue-cycle affordance.
    fn help_line(&self) -> Line<'static> {
        let mut spans = vec![
            "q".bold(),
            " quit  ".dark_gray(),
            "t".bold(),
            " toggle theme  ".dark_gray(),
            "a".bold(),
            " toggle animation".dark_gray(),
        ];
        if self.backdrop.hue_control_active(self.theme) {
            spans.push("  ".into());
            spans.push("c".bold());
            spans.push(" cycle hue".dark_gray());
        }
        Line::from(spans).centered()
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// The poll timeout paces frames; at most one render is pending.
    fn handle_crossterm_events(&mut self, animating: bool) -> color_eyre::Result<()> {
        let timeout = if animating || self.pending_resize.is_some() {
            Duration::from_millis(33)
        } else {
            Duration::from_millis(250)
        };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => {
                    self.pending_resize = Some((cols, rows, Instant::now()));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.theme = self.theme.toggle(),
            (_, KeyCode::Char('c')) => self.backdrop.cycle_hue(self.theme),
            (_, KeyCode::Char('a')) => self.backdrop.toggle_animation(),
            _ => {}
        }
    }

    /// Pointer position feeds the parallax target; the backdrop
    /// coalesces bursts to one processed update per frame.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if matches!(
            mouse.kind,
            MouseEventKind::Moved | MouseEventKind::Drag(_)
        ) {
            self.backdrop
                .pointer_moved(mouse.column as f64, mouse.row as f64 * 2.0);
        }
    }

    /// Apply the most recent resize once events have gone quiet.
    fn apply_debounced_resize(&mut self) {
        let Some((cols, rows, at)) = self.pending_resize else {
            return;
        };
        if at.elapsed() < RESIZE_DEBOUNCE {
            return;
        }
        self.pending_resize = None;
        let (width, height) = (cols as usize, rows as usize * 2);
        self.surface.resize(width, height);
        self.backdrop.resized(width as f64, height as f64);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
