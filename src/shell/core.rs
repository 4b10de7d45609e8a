//! Shell lifecycle
//!
//! Opens the root directory, greets the user, feeds stdin lines to the
//! dispatcher through a queue and says goodbye on `.exit`, end of input or
//! Ctrl-C.

use log::{debug, error, info, warn};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::command::responses::{PROMPT, format_farewell, format_location, format_welcome};
use crate::config::ShellConfig;
use crate::session::{Dispatcher, Session};
use crate::shell::Writer;

/// Lines waiting for the dispatcher
const LINE_QUEUE_CAPACITY: usize = 64;

pub struct Shell {
    dispatcher: Dispatcher,
}

impl Shell {
    /// Resolves the root directory and prepares a session for `user_name`.
    pub async fn new(config: ShellConfig, user_name: String) -> io::Result<Self> {
        let root_path = config.root_dir_path().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "home directory could not be determined; set RAX_FM_ROOT_DIR",
            )
        })?;
        let root = tokio::fs::canonicalize(root_path).await?;
        if !tokio::fs::metadata(&root).await?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("root {} is not a directory", root.display()),
            ));
        }
        info!("Root directory: {}", root.display());

        let session = Session::new(root, user_name);
        let writer = Writer::stdout(session.suppression_flag(), config.colors);

        Ok(Self {
            dispatcher: Dispatcher::new(session, writer, config),
        })
    }

    /// Runs the interactive loop until `.exit`, end of input or Ctrl-C, then
    /// says goodbye.
    pub async fn start(mut self) {
        let user_name = self.dispatcher.session().user_name().to_string();
        info!("Starting session for {}", user_name);

        if let Err(e) = self.greet(&user_name) {
            error!("Failed to write greeting: {}", e);
        }

        let (tx, mut rx) = mpsc::channel(LINE_QUEUE_CAPACITY);
        let suppressed = self.dispatcher.session().suppression_flag();

        // Stdin reads block; the reader task is left behind on shutdown.
        tokio::spawn(forward_lines(BufReader::new(tokio::io::stdin()), tx, suppressed));

        self.dispatcher.run(&mut rx, interrupted()).await;

        let farewell = format_farewell(&user_name);
        if let Err(e) = self.dispatcher.writer_mut().plain(&format!("\n{farewell}")) {
            error!("Failed to write farewell: {}", e);
        }
    }

    fn greet(&mut self, user_name: &str) -> io::Result<()> {
        let location = format_location(self.dispatcher.session().current_dir());
        let writer = self.dispatcher.writer_mut();
        writer.plain(&format_welcome(user_name))?;
        writer.status(&location)?;
        writer.raw(PROMPT.as_bytes())
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Interrupted"),
        Err(e) => {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Reads `input` line by line into the dispatcher's queue. Lines arriving
/// while the writer holds the suppression flag are dropped.
async fn forward_lines<R>(input: R, tx: mpsc::Sender<String>, suppressed: Arc<AtomicBool>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if suppressed.load(Ordering::SeqCst) {
                    debug!("Discarded line received during output");
                    continue;
                }
                if tx.send(line).await.is_err() {
                    break;
                }
            }
            Ok(None) => {
                info!("End of input");
                break;
            }
            Err(e) => {
                error!("Failed to read from stdin: {}", e);
                break;
            }
        }
    }
}
