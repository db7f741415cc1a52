//! Terminal route planner built on crossterm.
//!
//! Owns the parts of the planner that live outside the engine: mapping
//! mouse cells to board positions, drawing statuses as coloured blocks, and
//! turning key presses into session operations. During a run the observer
//! redraws changed cells and cancels on `q`/`Esc`.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use rand::{RngExt, SeedableRng};
use rand::rngs::StdRng;

use routegrid_core::{Color, Grid, Pos, Status};
use routegrid_paths::Flow;
use routegrid_route::{InvalidOperation, PlanOutcome, Session, SessionConfig};

/// Terminal columns per board cell.
pub const CELL_WIDTH: u16 = 2;

/// Percentage of free cells turned into Barriers by a scatter.
const SCATTER_PCT: u32 = 25;

const HELP: &str = "L-click stop | R-click remove/wall | b brush | space run | x clear | r scatter | c reset | q quit";

/// Maps a [`routegrid_core::Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    CtColor::Rgb {
        r: c.r(),
        g: c.g(),
        b: c.b(),
    }
}

/// Board position under terminal cell (`column`, `row`), if any.
pub fn cell_at(column: u16, row: u16, rows: i32) -> Option<Pos> {
    let p = Pos::new(row as i32, (column / CELL_WIDTH) as i32);
    (p.row < rows && p.col < rows).then_some(p)
}

// ---------------------------------------------------------------------------
// Terminal setup
// ---------------------------------------------------------------------------

/// Enter raw mode and the alternate screen with mouse capture.
pub fn init_terminal() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(ClearType::All),
        event::EnableMouseCapture
    )
}

/// Restore the terminal. Errors are ignored; this runs on the way out.
pub fn close_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        event::DisableMouseCapture,
        ResetColor,
        cursor::Show,
        terminal::LeaveAlternateScreen
    );
    let _ = terminal::disable_raw_mode();
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// Remembers what is on screen so only changed cells are redrawn.
#[derive(Debug, Default)]
pub struct Screen {
    shown: Vec<Option<Status>>,
}

impl Screen {
    /// Forget the screen contents; the next draw repaints every cell.
    pub fn invalidate(&mut self) {
        self.shown.clear();
    }

    pub fn draw<W: Write>(&mut self, out: &mut W, grid: &Grid) -> io::Result<()> {
        if self.shown.len() != grid.len() {
            self.shown = vec![None; grid.len()];
        }
        for (i, cell) in grid.iter().enumerate() {
            let status = cell.status();
            if self.shown[i] == Some(status) {
                continue;
            }
            let p = cell.pos();
            queue!(
                out,
                cursor::MoveTo(p.col as u16 * CELL_WIDTH, p.row as u16),
                SetBackgroundColor(to_ct_color(status.color())),
                Print("  ")
            )?;
            self.shown[i] = Some(status);
        }
        queue!(out, ResetColor)?;
        out.flush()
    }
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

/// What a left click does.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Brush {
    Stop,
    Barrier,
}

/// Interactive planner state.
pub struct Planner {
    session: Session,
    screen: Screen,
    brush: Brush,
    delay: Duration,
    rng: StdRng,
    message: String,
}

impl Planner {
    pub fn new(config: SessionConfig, delay: Duration, seed: u64) -> Self {
        Self {
            session: Session::new(config),
            screen: Screen::default(),
            brush: Brush::Stop,
            delay,
            rng: StdRng::seed_from_u64(seed),
            message: String::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Paint changed cells and the status lines.
    pub fn draw<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.screen.draw(out, self.session.grid())?;
        let line = self.session.config().rows as u16;
        let brush = match self.brush {
            Brush::Stop => "stops",
            Brush::Barrier => "barriers",
        };
        queue!(
            out,
            cursor::MoveTo(0, line),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(CtColor::Grey),
            Print(format!("[{brush}] {}", self.message)),
            cursor::MoveTo(0, line + 1),
            terminal::Clear(ClearType::CurrentLine),
            Print(HELP),
            ResetColor
        )?;
        out.flush()
    }

    /// Apply one input event. Returns `false` when the user quits.
    pub fn handle<W: Write>(&mut self, ev: Event, out: &mut W) -> io::Result<bool> {
        match ev {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(false),
                KeyCode::Char(' ') => self.run(out)?,
                KeyCode::Char('b') => {
                    self.brush = match self.brush {
                        Brush::Stop => Brush::Barrier,
                        Brush::Barrier => Brush::Stop,
                    };
                }
                KeyCode::Char('x') => {
                    self.session.clear_search_marks();
                    self.message.clear();
                }
                KeyCode::Char('r') => self.scatter(),
                KeyCode::Char('c') => {
                    self.session.reset();
                    self.screen.invalidate();
                    self.message = "board reset".into();
                }
                _ => {}
            },
            Event::Mouse(me) => self.mouse(me),
            Event::Resize(..) => {
                execute!(out, terminal::Clear(ClearType::All))?;
                self.screen.invalidate();
            }
            _ => {}
        }
        self.draw(out)?;
        Ok(true)
    }

    fn mouse(&mut self, me: MouseEvent) {
        let Some(p) = cell_at(me.column, me.row, self.session.config().rows) else {
            return;
        };
        let result = match (me.kind, self.brush) {
            (MouseEventKind::Down(MouseButton::Left), Brush::Stop) => self.session.add_stop(p),
            (MouseEventKind::Down(MouseButton::Left), Brush::Barrier) => {
                self.session.toggle_barrier(p).map(|_| ())
            }
            (MouseEventKind::Drag(MouseButton::Left), Brush::Barrier) => {
                if self.session.grid().status(p) == Some(Status::Barrier) {
                    Ok(())
                } else {
                    self.session.toggle_barrier(p).map(|_| ())
                }
            }
            (MouseEventKind::Down(MouseButton::Right), _) => match self.session.remove_stop(p) {
                Err(InvalidOperation::NotAStop(_)) => self.session.toggle_barrier(p).map(|_| ()),
                other => other,
            },
            _ => Ok(()),
        };
        if let Err(e) = result {
            self.message = e.to_string();
        }
    }

    /// Turn roughly a quarter of the free cells into Barriers.
    fn scatter(&mut self) {
        let free: Vec<Pos> = self
            .session
            .grid()
            .iter()
            .filter(|c| c.status() == Status::Empty)
            .map(|c| c.pos())
            .collect();
        let mut added = 0;
        for p in free {
            if self.rng.random_range(0..100) < SCATTER_PCT && self.session.toggle_barrier(p).is_ok() {
                added += 1;
            }
        }
        self.message = format!("scattered {added} barriers");
    }

    /// Run every segment, animating progress.
    fn run<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Planner {
            session,
            screen,
            delay,
            ..
        } = self;
        let delay = *delay;
        let mut io_err: Option<io::Error> = None;

        let mut observer = |grid: &Grid| -> Flow {
            if let Err(e) = screen.draw(out, grid) {
                io_err = Some(e);
                return Flow::Cancel;
            }
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            match quit_requested() {
                Ok(true) => Flow::Cancel,
                Ok(false) => Flow::Continue,
                Err(e) => {
                    io_err = Some(e);
                    Flow::Cancel
                }
            }
        };
        let outcome = session.run_all(&mut observer);
        if let Some(e) = io_err {
            return Err(e);
        }

        self.message = match outcome {
            Ok(PlanOutcome::Finished(report)) => {
                let failed = report.failed_segments();
                if failed.is_empty() {
                    format!("route found: {} moves", report.total_hops())
                } else {
                    format!(
                        "partial route: {} moves, unreachable segments {failed:?}",
                        report.total_hops()
                    )
                }
            }
            Ok(PlanOutcome::Cancelled(report)) => {
                format!("cancelled after {} segment(s)", report.segments.len())
            }
            Err(e) => e.to_string(),
        };
        Ok(())
    }
}

/// Drain pending input without blocking; `true` if `q` or `Esc` was pressed.
fn quit_requested() -> io::Result<bool> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(true);
        }
    }
    Ok(false)
}
