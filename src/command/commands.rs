//! Module `commands`
//!
//! Defines the command vocabulary of the shell as a static table. Each entry
//! binds the word typed by the user to a command identifier, its exact
//! argument count and the handler that runs it.

use std::future::Future;
use std::pin::Pin;

use crate::command::handlers;
use crate::error::ShellResult;
use crate::session::Dispatcher;

/// Identifier of a shell command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    GoUp,
    ChangeDir,
    ListDir,
    PrintFile,
    CreateFile,
    RenameFile,
    CopyFile,
    MoveFile,
    DeleteFile,
    OsQuery,
    HashFile,
    CompressFile,
    DecompressFile,
}

/// What the session does after a command completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Continue,
    Exit,
}

pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = ShellResult<CommandStatus>> + Send + 'a>>;

/// A handler receives the dispatcher and exactly `arity` arguments.
pub type Handler = for<'a> fn(&'a mut Dispatcher, &'a [String]) -> HandlerFuture<'a>;

pub struct CommandSpec {
    pub command: Command,
    pub word: &'static str,
    pub arity: usize,
    pub handler: Handler,
}

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: Command::Exit,
        word: ".exit",
        arity: 0,
        handler: handlers::handle_cmd_exit,
    },
    CommandSpec {
        command: Command::GoUp,
        word: "up",
        arity: 0,
        handler: handlers::handle_cmd_up,
    },
    CommandSpec {
        command: Command::ChangeDir,
        word: "cd",
        arity: 1,
        handler: handlers::handle_cmd_cd,
    },
    CommandSpec {
        command: Command::ListDir,
        word: "ls",
        arity: 0,
        handler: handlers::handle_cmd_ls,
    },
    CommandSpec {
        command: Command::PrintFile,
        word: "cat",
        arity: 1,
        handler: handlers::handle_cmd_cat,
    },
    CommandSpec {
        command: Command::CreateFile,
        word: "add",
        arity: 1,
        handler: handlers::handle_cmd_add,
    },
    CommandSpec {
        command: Command::RenameFile,
        word: "rn",
        arity: 2,
        handler: handlers::handle_cmd_rn,
    },
    CommandSpec {
        command: Command::CopyFile,
        word: "cp",
        arity: 2,
        handler: handlers::handle_cmd_cp,
    },
    CommandSpec {
        command: Command::MoveFile,
        word: "mv",
        arity: 2,
        handler: handlers::handle_cmd_mv,
    },
    CommandSpec {
        command: Command::DeleteFile,
        word: "rm",
        arity: 1,
        handler: handlers::handle_cmd_rm,
    },
    CommandSpec {
        command: Command::OsQuery,
        word: "os",
        arity: 1,
        handler: handlers::handle_cmd_os,
    },
    CommandSpec {
        command: Command::HashFile,
        word: "hash",
        arity: 1,
        handler: handlers::handle_cmd_hash,
    },
    CommandSpec {
        command: Command::CompressFile,
        word: "compress",
        arity: 2,
        handler: handlers::handle_cmd_compress,
    },
    CommandSpec {
        command: Command::DecompressFile,
        word: "decompress",
        arity: 2,
        handler: handlers::handle_cmd_decompress,
    },
];

/// Finds the table entry for the word typed by the user.
pub fn lookup(word: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|entry| entry.word == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_words() {
        assert_eq!(lookup("cd").map(|e| e.command), Some(Command::ChangeDir));
        assert_eq!(lookup(".exit").map(|e| e.command), Some(Command::Exit));
        assert_eq!(lookup("decompress").map(|e| e.arity), Some(2));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(lookup("CD").is_none());
        assert!(lookup("exit").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_table_has_unique_words_and_commands() {
        for (i, a) in COMMANDS.iter().enumerate() {
            for b in &COMMANDS[i + 1..] {
                assert_ne!(a.word, b.word);
                assert_ne!(a.command, b.command);
            }
        }
        assert_eq!(COMMANDS.len(), 14);
    }

    #[test]
    fn test_arities() {
        let arity = |word| lookup(word).map(|e| e.arity);
        assert_eq!(arity("up"), Some(0));
        assert_eq!(arity("ls"), Some(0));
        assert_eq!(arity("cat"), Some(1));
        assert_eq!(arity("add"), Some(1));
        assert_eq!(arity("rn"), Some(2));
        assert_eq!(arity("cp"), Some(2));
        assert_eq!(arity("mv"), Some(2));
        assert_eq!(arity("rm"), Some(1));
        assert_eq!(arity("os"), Some(1));
        assert_eq!(arity("hash"), Some(1));
        assert_eq!(arity("compress"), Some(2));
    }
}
