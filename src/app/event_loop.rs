use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;

use super::{App, Message, Model, input, update};
use crate::session::SessionController;

const TICK: Duration = Duration::from_millis(100);

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, terminal
    /// initialization fails, or the event loop encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let text = std::fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal — markpeek requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(self.file_path.clone(), &text, (size.width, size.height));
        let mut session = SessionController::new(self.config.clone());

        let result = Self::event_loop(&mut terminal, &mut model, &mut session);

        ratatui::restore();
        result
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        session: &mut SessionController,
    ) -> Result<()> {
        loop {
            model.expire_toast(Instant::now());
            terminal.draw(|frame| crate::ui::render(model, frame))?;
            // The frame above included the overlay; a session opened last
            // round may now capture input.
            session.notify_painted();

            if !event::poll(TICK)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    if session.is_active() {
                        let outcome = session.handle_key(model, input::decode_capture_key(key));
                        tracing::debug!(?outcome, "mark overlay session resolved");
                    } else if let Some(msg) = input::handle_key(key, model) {
                        Self::dispatch(model, session, msg);
                    }
                }
                Event::Resize(width, height) => {
                    // Overlay geometry is stale after a resize; drop any
                    // open session before relayout.
                    session.close(model);
                    *model = update(std::mem::take(model), Message::Resize(width, height));
                }
                _ => {}
            }

            if model.should_quit {
                session.close(model);
                return Ok(());
            }
        }
    }

    fn dispatch(model: &mut Model, session: &mut SessionController, msg: Message) {
        match msg {
            Message::OpenMarkPeek(style) => {
                // A declined open (help view, surface failure) is a silent
                // no-op; normal input resumes with the next event.
                session.open(model, style);
            }
            msg => *model = update(std::mem::take(model), msg),
        }
    }
}
