//! Command handlers
//!
//! One handler per entry of the command table. Each receives exactly the
//! number of arguments its table entry declares, delegates to the navigate,
//! storage, transfer or system module and writes any output.

use crate::command::{CommandStatus, HandlerFuture};
use crate::error::{ShellError, ShellResult};
use crate::navigate::{change_directory, go_up, list_directory};
use crate::session::Dispatcher;
use crate::shell::format_table;
use crate::storage::{copy_file, create_file, delete_file, move_file, print_file, rename_file};
use crate::system::{self, OsQuery};
use crate::transfer::{compress_file, decompress_file, hash_file};

pub fn handle_cmd_exit<'a>(dispatcher: &'a mut Dispatcher, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(exit(dispatcher, args))
}

pub fn handle_cmd_up<'a>(dispatcher: &'a mut Dispatcher, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(up(dispatcher, args))
}

pub fn handle_cmd_cd<'a>(dispatcher: &'a mut Dispatcher, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(cd(dispatcher, args))
}

pub fn handle_cmd_ls<'a>(dispatcher: &'a mut Dispatcher, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(ls(dispatcher, args))
}

pub fn handle_cmd_cat<'a>(dispatcher: &'a mut Dispatcher, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(cat(dispatcher, args))
}

pub fn handle_cmd_add<'a>(dispatcher: &'a mut Dispatcher, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(add(dispatcher, args))
}

pub fn handle_cmd_rn<'a>(dispatcher: &'a mut Dispatcher, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(rn(dispatcher, args))
}

pub fn handle_cmd_cp<'a>(dispatcher: &'a mut Dispatcher, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(cp(dispatcher, args))
}

pub fn handle_cmd_mv<'a>(dispatcher: &'a mut Dispatcher, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(mv(dispatcher, args))
}

pub fn handle_cmd_rm<'a>(dispatcher: &'a mut Dispatcher, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(rm(dispatcher, args))
}

pub fn handle_cmd_os<'a>(dispatcher: &'a mut Dispatcher, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(os(dispatcher, args))
}

pub fn handle_cmd_hash<'a>(dispatcher: &'a mut Dispatcher, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(hash(dispatcher, args))
}

pub fn handle_cmd_compress<'a>(dispatcher: &'a mut Dispatcher, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(compress(dispatcher, args))
}

pub fn handle_cmd_decompress<'a>(dispatcher: &'a mut Dispatcher, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(decompress(dispatcher, args))
}

async fn exit(_dispatcher: &mut Dispatcher, _args: &[String]) -> ShellResult<CommandStatus> {
    Ok(CommandStatus::Exit)
}

/// Moves to the parent directory unless already at the root.
async fn up(dispatcher: &mut Dispatcher, _args: &[String]) -> ShellResult<CommandStatus> {
    go_up(dispatcher.session_mut());
    Ok(CommandStatus::Continue)
}

async fn cd(dispatcher: &mut Dispatcher, args: &[String]) -> ShellResult<CommandStatus> {
    change_directory(dispatcher.session_mut(), &args[0]).await?;
    Ok(CommandStatus::Continue)
}

/// Prints the current directory as a Name/Type table.
async fn ls(dispatcher: &mut Dispatcher, _args: &[String]) -> ShellResult<CommandStatus> {
    let entries = list_directory(dispatcher.session()).await?;
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| vec![entry.name.clone(), entry.kind.to_string()])
        .collect();

    dispatcher
        .writer_mut()
        .plain(&format_table(&["Name", "Type"], &rows))?;
    Ok(CommandStatus::Continue)
}

async fn cat(dispatcher: &mut Dispatcher, args: &[String]) -> ShellResult<CommandStatus> {
    let buffer_size = dispatcher.config().buffer_size;
    let (session, writer) = dispatcher.parts_mut();
    print_file(session, writer, &args[0], buffer_size).await?;
    Ok(CommandStatus::Continue)
}

async fn add(dispatcher: &mut Dispatcher, args: &[String]) -> ShellResult<CommandStatus> {
    create_file(dispatcher.session(), &args[0]).await?;
    Ok(CommandStatus::Continue)
}

async fn rn(dispatcher: &mut Dispatcher, args: &[String]) -> ShellResult<CommandStatus> {
    rename_file(dispatcher.session(), &args[0], &args[1]).await?;
    Ok(CommandStatus::Continue)
}

async fn cp(dispatcher: &mut Dispatcher, args: &[String]) -> ShellResult<CommandStatus> {
    let buffer_size = dispatcher.config().buffer_size;
    copy_file(dispatcher.session(), &args[0], &args[1], buffer_size).await?;
    Ok(CommandStatus::Continue)
}

async fn mv(dispatcher: &mut Dispatcher, args: &[String]) -> ShellResult<CommandStatus> {
    let buffer_size = dispatcher.config().buffer_size;
    move_file(dispatcher.session(), &args[0], &args[1], buffer_size).await?;
    Ok(CommandStatus::Continue)
}

async fn rm(dispatcher: &mut Dispatcher, args: &[String]) -> ShellResult<CommandStatus> {
    delete_file(dispatcher.session(), &args[0]).await?;
    Ok(CommandStatus::Continue)
}

async fn os(dispatcher: &mut Dispatcher, args: &[String]) -> ShellResult<CommandStatus> {
    let query = OsQuery::parse(&args[0])?;

    let output = match query {
        OsQuery::Eol => format!("{:?}", system::eol()),
        OsQuery::Cpus => {
            let cpus = tokio::task::spawn_blocking(system::cpus)
                .await
                .map_err(|e| ShellError::OperationFailed(e.to_string()))?;
            let rows: Vec<Vec<String>> = cpus
                .iter()
                .map(|cpu| vec![cpu.model.clone(), format!("{:.2} GHz", cpu.speed_ghz)])
                .collect();
            format!(
                "Overall amount of CPUS: {}\n{}",
                cpus.len(),
                format_table(&["model", "speed"], &rows)
            )
        }
        OsQuery::HomeDir => system::home_dir()
            .ok_or_else(|| {
                ShellError::OperationFailed("home directory could not be determined".into())
            })?
            .display()
            .to_string(),
        OsQuery::UserName => system::system_user_name()
            .unwrap_or_else(|| dispatcher.session().user_name().to_string()),
        OsQuery::Architecture => system::architecture().to_string(),
    };

    dispatcher.writer_mut().plain(&output)?;
    Ok(CommandStatus::Continue)
}

/// Prints the SHA-256 digest of a file in hex.
async fn hash(dispatcher: &mut Dispatcher, args: &[String]) -> ShellResult<CommandStatus> {
    let buffer_size = dispatcher.config().buffer_size;
    let digest = hash_file(dispatcher.session(), &args[0], buffer_size).await?;
    dispatcher.writer_mut().plain(&digest)?;
    Ok(CommandStatus::Continue)
}

async fn compress(dispatcher: &mut Dispatcher, args: &[String]) -> ShellResult<CommandStatus> {
    let buffer_size = dispatcher.config().buffer_size;
    compress_file(dispatcher.session(), &args[0], &args[1], buffer_size).await?;
    Ok(CommandStatus::Continue)
}

async fn decompress(dispatcher: &mut Dispatcher, args: &[String]) -> ShellResult<CommandStatus> {
    let buffer_size = dispatcher.config().buffer_size;
    decompress_file(dispatcher.session(), &args[0], &args[1], buffer_size).await?;
    Ok(CommandStatus::Continue)
}
