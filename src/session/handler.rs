//! Command dispatch
//!
//! The `Dispatcher` owns the session, the output writer and the configuration.
//! It turns one input line into one command, runs the command's handler to
//! completion and reports the outcome. Lines are taken from a queue one at a
//! time, so at most one command is ever in flight.

use log::{error, info};
use tokio::sync::mpsc;

use crate::command::responses::{PROMPT, format_location};
use crate::command::{CommandStatus, lookup, tokenize};
use crate::config::ShellConfig;
use crate::error::{ShellError, ShellResult, render_error};
use crate::session::Session;
use crate::shell::Writer;
use crate::utils::validation::{is_valid_input, strip_line_ending};

pub struct Dispatcher {
    session: Session,
    writer: Writer,
    config: ShellConfig,
}

impl Dispatcher {
    pub fn new(session: Session, writer: Writer, config: ShellConfig) -> Self {
        Self {
            session,
            writer,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn writer_mut(&mut self) -> &mut Writer {
        &mut self.writer
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Borrows the session and the writer at the same time.
    pub fn parts_mut(&mut self) -> (&Session, &mut Writer) {
        (&self.session, &mut self.writer)
    }

    /// Processes queued lines until `.exit`, until the queue closes or until
    /// `shutdown` resolves.
    ///
    /// `shutdown` is only raced against the wait for the next line. A command
    /// that has started always runs to completion, so an interrupted copy
    /// still cleans up its partial destination.
    pub async fn run<F>(&mut self, lines: &mut mpsc::Receiver<String>, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let line = tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!("Shutdown requested, closing session");
                    break;
                }
                line = lines.recv() => line,
            };

            let Some(line) = line else {
                info!("Input closed");
                break;
            };

            if self.dispatch_line(&line).await == CommandStatus::Exit {
                info!("Session closed by {}", self.session.user_name());
                break;
            }
        }
    }

    /// Handles one input line end to end.
    ///
    /// Failures are rendered as one error line; the status line and prompt
    /// follow every command except `.exit`.
    pub async fn dispatch_line(&mut self, line: &str) -> CommandStatus {
        let line = strip_line_ending(line);

        let status = if !is_valid_input(line, self.config.max_command_length) {
            self.report_failure(&ShellError::InvalidInput);
            CommandStatus::Continue
        } else {
            let tokens = tokenize(line);
            if tokens.is_empty() {
                self.emit(|writer| writer.raw(PROMPT.as_bytes()));
                return CommandStatus::Continue;
            }

            match self.execute(&tokens).await {
                Ok(status) => status,
                Err(e) => {
                    self.report_failure(&e);
                    CommandStatus::Continue
                }
            }
        };

        if status == CommandStatus::Continue {
            self.print_location();
        }
        status
    }

    /// Looks up the command word, enforces arity and awaits the handler.
    pub async fn execute(&mut self, tokens: &[String]) -> ShellResult<CommandStatus> {
        let Some((word, args)) = tokens.split_first() else {
            return Ok(CommandStatus::Continue);
        };

        let entry = lookup(word).ok_or(ShellError::InvalidInput)?;
        if args.len() != entry.arity {
            return Err(ShellError::InvalidInput);
        }

        info!("{} ran {:?} {:?}", self.session.user_name(), entry.command, args);
        (entry.handler)(self, args).await
    }

    /// Prints the status line and a fresh prompt.
    pub fn print_location(&mut self) {
        let location = format_location(self.session.current_dir());
        self.emit(|writer| {
            writer.status(&location)?;
            writer.raw(PROMPT.as_bytes())
        });
    }

    fn report_failure(&mut self, err: &ShellError) {
        let message = render_error(err);
        self.emit(|writer| writer.error(&message));
    }

    fn emit<F>(&mut self, write: F)
    where
        F: FnOnce(&mut Writer) -> std::io::Result<()>,
    {
        if let Err(e) = write(&mut self.writer) {
            error!("Failed to write to terminal: {}", e);
        }
    }
}
