//! The interactive terminal application: rendering, mouse painting and
//! search driving on top of crossterm.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind},
    execute, queue,
    style::{Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};

use gridpaint_core::{CellSink, Error, GridStore, Point, Tile, brush};
use gridpaint_search::{RunConfig, SearchRun, SearchState};

use crate::colors::tile_color;
use crate::scatter::scatter_walls;

/// Terminal columns per grid cell (cells are square-ish at 2x1).
const CELL_WIDTH: i32 = 2;

/// Pause between animation bursts.
const BURST_PAUSE: Duration = Duration::from_millis(15);

pub const USAGE: &str = "usage: gridpaint [--width N] [--height N] \
[--heuristic none|manhattan|euclidean] [--moves four|eight] [--batch]";

// ---------------------------------------------------------------------------
// AppOptions
// ---------------------------------------------------------------------------

/// Startup options, parsed from the command line.
#[derive(Clone, Debug)]
pub struct AppOptions {
    pub width: i32,
    pub height: i32,
    pub config: RunConfig,
    /// Wall probability for the scatter key.
    pub wall_density: f64,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            width: 38,
            height: 22,
            config: RunConfig {
                animate: true,
                ..RunConfig::default()
            },
            wall_density: 0.05,
        }
    }
}

impl AppOptions {
    /// Parse command-line arguments (without the program name).
    pub fn parse<I>(mut args: I) -> Result<Self, Error>
    where
        I: Iterator<Item = String>,
    {
        let mut options = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--width" => options.width = int_value("width", args.next())?,
                "--height" => options.height = int_value("height", args.next())?,
                "--heuristic" => {
                    options.config.heuristic = value("heuristic", args.next())?.parse()?;
                }
                "--moves" => {
                    options.config.neighborhood = value("moves", args.next())?.parse()?;
                }
                "--batch" => options.config.animate = false,
                _ => {
                    return Err(Error::UnknownOption {
                        name: "argument",
                        value: arg,
                    });
                }
            }
        }
        Ok(options)
    }
}

fn value(name: &'static str, v: Option<String>) -> Result<String, Error> {
    v.ok_or(Error::UnknownOption {
        name,
        value: "<missing>".to_string(),
    })
}

fn int_value(name: &'static str, v: Option<String>) -> Result<i32, Error> {
    let v = value(name, v)?;
    v.parse::<i32>()
        .map_err(|_| Error::UnknownOption { name, value: v })
}

// ---------------------------------------------------------------------------
// TermSink
// ---------------------------------------------------------------------------

/// Draws engine cell writes as they happen. A full-redraw request is
/// only recorded here and honored by the app, which owns the grid.
#[derive(Default)]
struct TermSink {
    redraw_requested: bool,
    io_error: Option<io::Error>,
}

impl TermSink {
    fn new() -> Self {
        Self::default()
    }

    /// Flush queued draws, surface any draw error, and report whether a
    /// full redraw is due.
    fn finish(&mut self) -> io::Result<bool> {
        if let Some(e) = self.io_error.take() {
            return Err(e);
        }
        io::stdout().flush()?;
        Ok(std::mem::take(&mut self.redraw_requested))
    }
}

impl CellSink for TermSink {
    fn cell_write(&mut self, p: Point, tile: Tile) {
        if self.io_error.is_some() {
            return;
        }
        if let Err(e) = draw_cell(&mut io::stdout(), p, tile) {
            self.io_error = Some(e);
        }
    }

    fn force_redraw(&mut self) {
        self.redraw_requested = true;
    }
}

fn draw_cell(out: &mut impl io::Write, p: Point, tile: Tile) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveTo((p.x * CELL_WIDTH) as u16, p.y as u16),
        SetBackgroundColor(tile_color(tile)),
        Print("  "),
        ResetColor
    )
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The interactive painter/visualizer.
pub struct App {
    run: SearchRun,
    brush: Tile,
    wall_density: f64,
    /// Last painted cell, for drag interpolation.
    last_cell: Option<Point>,
    status: String,
    quit: bool,
}

impl App {
    pub fn new(options: AppOptions) -> Self {
        let grid = GridStore::new(options.width, options.height);
        Self {
            run: SearchRun::new(grid, options.config),
            brush: Tile::Wall,
            wall_density: options.wall_density,
            last_cell: None,
            status: String::new(),
            quit: false,
        }
    }

    /// Set up the terminal, run the event loop, restore the terminal.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        init_terminal()?;
        let res = self.event_loop();
        close_terminal();
        res.map_err(Into::into)
    }

    fn event_loop(&mut self) -> io::Result<()> {
        self.full_redraw()?;
        while !self.quit {
            if matches!(
                self.run.state(),
                SearchState::Seeded | SearchState::Running
            ) {
                self.drive_search()?;
            } else if event::poll(Duration::from_millis(33))? {
                let ev = event::read()?;
                self.handle_event(ev)?;
            }
        }
        Ok(())
    }

    /// One animation burst, a redraw, then a drain of pending input.
    /// Painting is disabled while the search runs; only the stop keys
    /// are honored.
    fn drive_search(&mut self) -> io::Result<()> {
        let mut sink = TermSink::new();
        let state = self.run.step_burst(&mut sink).map_err(io::Error::other)?;
        if sink.finish()? {
            self.full_redraw()?;
        }
        if state.is_terminal() {
            self.report_outcome(state);
        }
        self.draw_status()?;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                match code {
                    KeyCode::Char('x') | KeyCode::Esc => {
                        self.run.stop();
                        self.status = "stopped".to_string();
                    }
                    KeyCode::Char('r') => self.restore()?,
                    KeyCode::Char('q') => {
                        self.run.stop();
                        self.quit = true;
                    }
                    _ => {}
                }
            }
        }
        std::thread::sleep(BURST_PAUSE);
        Ok(())
    }

    fn handle_event(&mut self, ev: Event) -> io::Result<()> {
        match ev {
            Event::Key(KeyEvent { code, .. }) => self.handle_key(code)?,
            Event::Mouse(me) => self.handle_mouse(me)?,
            Event::Resize(..) => self.full_redraw()?,
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> io::Result<()> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('1') => self.brush = Tile::Wall,
            KeyCode::Char('2') => self.brush = Tile::Start,
            KeyCode::Char('3') => self.brush = Tile::Destination,
            KeyCode::Char('4') => self.brush = Tile::Empty,
            KeyCode::Char('h') => {
                self.run.config.heuristic = self.run.config.heuristic.cycled();
            }
            KeyCode::Char('m') => {
                self.run.config.neighborhood = self.run.config.neighborhood.toggled();
            }
            KeyCode::Char('a') => self.run.config.animate = !self.run.config.animate,
            KeyCode::Enter | KeyCode::Char('s') => self.start_search()?,
            KeyCode::Char('r') => self.restore()?,
            KeyCode::Char('c') => self.clear()?,
            KeyCode::Char('n') => self.scatter()?,
            _ => {}
        }
        self.draw_status()
    }

    fn handle_mouse(&mut self, me: MouseEvent) -> io::Result<()> {
        let cell = Point::new(i32::from(me.column) / CELL_WIDTH, i32::from(me.row));
        match me.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.paint(cell)?;
                self.last_cell = Some(cell);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let prev = self.last_cell.unwrap_or(cell);
                if prev != cell {
                    for p in brush::interpolate_drag(prev, cell) {
                        self.paint(p)?;
                    }
                }
                self.paint(cell)?;
                self.last_cell = Some(cell);
            }
            MouseEventKind::Up(_) => self.last_cell = None,
            _ => {}
        }
        Ok(())
    }

    fn paint(&mut self, p: Point) -> io::Result<()> {
        if !self.run.grid().contains(p) {
            return Ok(());
        }
        // In bounds, so the write cannot fail.
        let Ok(writes) = self.run.grid_mut().set(p, self.brush) else {
            return Ok(());
        };
        let mut out = io::stdout();
        for (wp, wt) in writes {
            draw_cell(&mut out, wp, wt)?;
        }
        out.flush()
    }

    fn start_search(&mut self) -> io::Result<()> {
        self.status.clear();
        let mut sink = TermSink::new();
        match self.run.start(&mut sink) {
            Ok(state) => self.report_outcome(state),
            Err(e) => {
                log::warn!("cannot start search: {e}");
                self.status = e.to_string();
            }
        }
        if sink.finish()? {
            self.full_redraw()?;
        }
        Ok(())
    }

    fn report_outcome(&mut self, state: SearchState) {
        match state {
            SearchState::Found => {
                if let Some(found) = self.run.result() {
                    self.status = format!("found: cost {:.2}", found.cost);
                }
            }
            SearchState::Exhausted => self.status = "no path".to_string(),
            _ => {}
        }
    }

    fn restore(&mut self) -> io::Result<()> {
        let mut sink = TermSink::new();
        self.run.restore(&mut sink);
        self.status = "restored".to_string();
        if sink.finish()? {
            self.full_redraw()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.run.stop();
        self.run.grid_mut().clear();
        self.status = "cleared".to_string();
        self.full_redraw()
    }

    fn scatter(&mut self) -> io::Result<()> {
        scatter_walls(self.run.grid_mut(), &mut rand::rng(), self.wall_density)
            .map_err(io::Error::other)?;
        self.full_redraw()
    }

    fn full_redraw(&mut self) -> io::Result<()> {
        let mut out = io::stdout();
        queue!(out, terminal::Clear(ClearType::All))?;
        for (p, tile) in self.run.grid().iter() {
            draw_cell(&mut out, p, tile)?;
        }
        out.flush()?;
        self.draw_status()
    }

    fn draw_status(&mut self) -> io::Result<()> {
        let y = self.run.grid().height() as u16;
        let line = format!(
            "state:{:?} brush:{} heur:{} moves:{} animate:{} {}",
            self.run.state(),
            self.brush,
            self.run.config.heuristic,
            self.run.config.neighborhood,
            if self.run.config.animate { "on" } else { "off" },
            self.status,
        );
        let mut out = io::stdout();
        queue!(
            out,
            cursor::MoveTo(0, y),
            terminal::Clear(ClearType::UntilNewLine),
            Print(line),
            cursor::MoveTo(0, y + 1),
            terminal::Clear(ClearType::UntilNewLine),
            Print(
                "1 wall 2 start 3 dest 4 erase | h heuristic m moves a animate | \
                 enter start x stop r restore c clear n scatter q quit"
            )
        )?;
        out.flush()
    }
}

// ---------------------------------------------------------------------------
// Terminal setup / teardown
// ---------------------------------------------------------------------------

fn init_terminal() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(ClearType::All),
        event::EnableMouseCapture
    )?;
    Ok(())
}

fn close_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        event::DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    );
    let _ = terminal::disable_raw_mode();
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpaint_search::{Heuristic, Neighborhood};

    fn args<'a>(s: &'a [&'a str]) -> impl Iterator<Item = String> + 'a {
        s.iter().map(|a| a.to_string())
    }

    #[test]
    fn parse_defaults() {
        let options = AppOptions::parse(args(&[])).unwrap();
        assert_eq!(options.width, 38);
        assert_eq!(options.height, 22);
        assert!(options.config.animate);
        assert_eq!(options.config.heuristic, Heuristic::None);
    }

    #[test]
    fn parse_overrides() {
        let options = AppOptions::parse(args(&[
            "--width",
            "60",
            "--heuristic",
            "euclidean",
            "--moves",
            "eight",
            "--batch",
        ]))
        .unwrap();
        assert_eq!(options.width, 60);
        assert_eq!(options.config.heuristic, Heuristic::Euclidean);
        assert_eq!(options.config.neighborhood, Neighborhood::Eight);
        assert!(!options.config.animate);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(AppOptions::parse(args(&["--width", "lots"])).is_err());
        assert!(AppOptions::parse(args(&["--heuristic"])).is_err());
        assert!(AppOptions::parse(args(&["--verbose"])).is_err());
    }
}
