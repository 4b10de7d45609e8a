use std::fs;
use std::path::{Path, PathBuf};
use std::task::Poll;

use tempfile::TempDir;
use tokio::sync::mpsc;

use rax_file_manager::command::CommandStatus;
use rax_file_manager::shell::Writer;
use rax_file_manager::storage::is_within_root;
use rax_file_manager::{Dispatcher, Session, ShellConfig};

// Helper owning a temporary root and a dispatcher writing into memory
struct TestShell {
    _dir: TempDir,
    root: PathBuf,
    dispatcher: Dispatcher,
}

impl TestShell {
    fn new() -> Self {
        Self::with_config(ShellConfig {
            colors: false,
            ..ShellConfig::default()
        })
    }

    fn with_config(config: ShellConfig) -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        Self::rooted_at(dir, root, config)
    }

    // Keeps `dir` alive while the session is confined to `root`
    fn rooted_at(dir: TempDir, root: PathBuf, config: ShellConfig) -> Self {
        let session = Session::new(root.clone(), "tester".into());
        let writer = Writer::buffered(session.suppression_flag());
        Self {
            _dir: dir,
            root,
            dispatcher: Dispatcher::new(session, writer, config),
        }
    }

    // Runs one line and returns its status plus everything it printed
    async fn run(&mut self, line: &str) -> (CommandStatus, String) {
        let status = self.dispatcher.dispatch_line(line).await;
        let output = self.dispatcher.writer_mut().take_captured();
        (status, output)
    }

    async fn output_of(&mut self, line: &str) -> String {
        self.run(line).await.1
    }

    fn current_dir(&self) -> &Path {
        self.dispatcher.session().current_dir()
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    fn write(&self, relative: &str, content: &[u8]) {
        fs::write(self.path(relative), content).unwrap();
    }
}

fn location_line(dir: &Path) -> String {
    format!("You are currently in {}\n> ", dir.display())
}

#[tokio::test]
async fn test_cd_parent_of_root_is_rejected() {
    let mut shell = TestShell::new();
    let output = shell.output_of("cd ..").await;

    assert!(output.starts_with("Operation failed: Access denied"), "{output}");
    assert_eq!(shell.current_dir(), shell.root.as_path());
    assert!(output.ends_with(&location_line(&shell.root)));
}

#[tokio::test]
async fn test_cd_and_up() {
    let mut shell = TestShell::new();
    fs::create_dir(shell.path("sub")).unwrap();

    let output = shell.output_of("cd sub").await;
    assert_eq!(shell.current_dir(), shell.path("sub").as_path());
    assert_eq!(output, location_line(&shell.path("sub")));

    shell.run("up").await;
    assert_eq!(shell.current_dir(), shell.root.as_path());

    // up at the root is a no-op
    let output = shell.output_of("up").await;
    assert_eq!(shell.current_dir(), shell.root.as_path());
    assert_eq!(output, location_line(&shell.root));
}

#[tokio::test]
async fn test_up_stops_at_case_variant_of_root() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().canonicalize().unwrap();
    fs::create_dir(base.join("Root")).unwrap();
    fs::create_dir_all(base.join("root").join("sub")).unwrap();
    let root = base.join("Root").canonicalize().unwrap();

    let mut shell = TestShell::rooted_at(
        dir,
        root,
        ShellConfig {
            colors: false,
            ..ShellConfig::default()
        },
    );

    shell
        .run(&format!("cd {}", base.join("root").join("sub").display()))
        .await;

    for _ in 0..3 {
        let (status, _) = shell.run("up").await;
        assert_eq!(status, CommandStatus::Continue);
        assert!(
            is_within_root(&shell.root, shell.current_dir()),
            "left the root: {}",
            shell.current_dir().display()
        );
    }
    assert_ne!(shell.current_dir(), base.as_path());
}

#[tokio::test]
async fn test_cd_stores_canonical_directory() {
    let mut shell = TestShell::new();
    fs::create_dir_all(shell.path("a/b")).unwrap();

    shell.run("cd a/./b/../b").await;
    assert_eq!(shell.current_dir(), shell.path("a/b").as_path());
}

#[tokio::test]
async fn test_cd_into_missing_or_file_fails() {
    let mut shell = TestShell::new();
    shell.write("a.txt", b"x");

    let output = shell.output_of("cd missing").await;
    assert!(output.starts_with("Operation failed: No such directory: missing"));

    let output = shell.output_of("cd a.txt").await;
    assert!(output.starts_with("Operation failed: No such directory: a.txt"));
    assert_eq!(shell.current_dir(), shell.root.as_path());
}

#[tokio::test]
async fn test_cd_arity_is_enforced() {
    let mut shell = TestShell::new();
    fs::create_dir(shell.path("sub")).unwrap();

    for line in ["cd", "cd sub sub"] {
        let output = shell.output_of(line).await;
        assert!(output.starts_with("Invalid input\n"), "{line}: {output}");
        assert_eq!(shell.current_dir(), shell.root.as_path());
    }
}

#[tokio::test]
async fn test_unknown_command_is_invalid_input() {
    let mut shell = TestShell::new();
    let output = shell.output_of("format c:").await;
    assert_eq!(output, format!("Invalid input\n{}", location_line(&shell.root)));
}

#[tokio::test]
async fn test_empty_line_only_reprints_prompt() {
    let mut shell = TestShell::new();
    let (status, output) = shell.run("   ").await;
    assert_eq!(status, CommandStatus::Continue);
    assert_eq!(output, "> ");
}

#[tokio::test]
async fn test_exit_ends_session_without_status_line() {
    let mut shell = TestShell::new();
    let (status, output) = shell.run(".exit").await;
    assert_eq!(status, CommandStatus::Exit);
    assert!(output.is_empty());

    let (status, output) = shell.run(".exit now").await;
    assert_eq!(status, CommandStatus::Continue);
    assert!(output.starts_with("Invalid input"));
}

#[tokio::test]
async fn test_add_creates_empty_file_once() {
    let mut shell = TestShell::new();

    let output = shell.output_of("add newfile.txt").await;
    assert_eq!(output, location_line(&shell.root));
    assert_eq!(fs::metadata(shell.path("newfile.txt")).unwrap().len(), 0);

    let output = shell.output_of("add newfile.txt").await;
    assert!(output.starts_with("Operation failed: Already exists: newfile.txt"));
}

#[tokio::test]
async fn test_add_with_quoted_name() {
    let mut shell = TestShell::new();
    shell.run("add 'my notes.txt'").await;
    assert!(shell.path("my notes.txt").is_file());
}

#[tokio::test]
async fn test_add_into_missing_directory_fails() {
    let mut shell = TestShell::new();
    let output = shell.output_of("add nowhere/file.txt").await;
    assert!(output.starts_with("Operation failed: No such directory"));
    assert!(!shell.path("nowhere").exists());
}

#[tokio::test]
async fn test_ls_orders_directories_then_files() {
    let mut shell = TestShell::new();
    fs::create_dir(shell.path("zeta")).unwrap();
    fs::create_dir(shell.path("alpha")).unwrap();
    shell.write("b.txt", b"");
    shell.write("a.txt", b"");

    let output = shell.output_of("ls").await;
    let position = |name: &str| output.find(name).unwrap();

    assert!(output.contains("Name"));
    assert!(output.contains("Type"));
    assert!(position("alpha") < position("zeta"));
    assert!(position("zeta") < position("a.txt"));
    assert!(position("a.txt") < position("b.txt"));

    let alpha_row = output.lines().find(|l| l.contains("alpha")).unwrap();
    assert!(alpha_row.contains("directory"));
    let file_row = output.lines().find(|l| l.contains("b.txt")).unwrap();
    assert!(file_row.contains("file"));
}

#[tokio::test]
async fn test_cat_prints_content_with_trailing_newline() {
    let mut shell = TestShell::new();
    shell.write("poem.txt", b"roses are red");

    let first = shell.output_of("cat poem.txt").await;
    let second = shell.output_of("cat poem.txt").await;

    assert_eq!(first, format!("roses are red\n{}", location_line(&shell.root)));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_cat_streams_across_small_buffers() {
    let mut shell = TestShell::with_config(ShellConfig {
        colors: false,
        buffer_size: 3,
        ..ShellConfig::default()
    });
    shell.write("long.txt", b"abcdefghijklmnopqrstuvwxyz");

    let output = shell.output_of("cat long.txt").await;
    assert!(output.starts_with("abcdefghijklmnopqrstuvwxyz\n"));
}

#[tokio::test]
async fn test_cat_directory_is_not_found() {
    let mut shell = TestShell::new();
    fs::create_dir(shell.path("docs")).unwrap();
    let output = shell.output_of("cat docs").await;
    assert!(output.starts_with("Operation failed: No such file: docs"));
}

#[tokio::test]
async fn test_rn_into_other_directory() {
    let mut shell = TestShell::new();
    fs::create_dir(shell.path("archive")).unwrap();
    shell.write("old.txt", b"data");

    shell.run("rn old.txt archive/new.txt").await;

    assert!(!shell.path("old.txt").exists());
    assert_eq!(fs::read(shell.path("archive/new.txt")).unwrap(), b"data");
}

#[tokio::test]
async fn test_cp_keeps_source_and_refuses_overwrite() {
    let mut shell = TestShell::new();
    shell.write("src.bin", &[0, 1, 2, 255, 254]);
    shell.write("taken.bin", b"keep me");

    shell.run("cp src.bin copy.bin").await;
    assert_eq!(fs::read(shell.path("copy.bin")).unwrap(), vec![0, 1, 2, 255, 254]);
    assert!(shell.path("src.bin").exists());

    let output = shell.output_of("cp src.bin taken.bin").await;
    assert!(output.starts_with("Operation failed: Already exists: taken.bin"));
    assert_eq!(fs::read(shell.path("taken.bin")).unwrap(), b"keep me");
}

#[tokio::test]
async fn test_mv_removes_source() {
    let mut shell = TestShell::new();
    fs::create_dir(shell.path("dest")).unwrap();
    shell.write("file.txt", b"moving");

    shell.run("mv file.txt dest/file.txt").await;

    assert!(!shell.path("file.txt").exists());
    assert_eq!(fs::read(shell.path("dest/file.txt")).unwrap(), b"moving");
}

#[tokio::test]
async fn test_rm_deletes_file_only() {
    let mut shell = TestShell::new();
    shell.write("gone.txt", b"bye");
    fs::create_dir(shell.path("folder")).unwrap();

    shell.run("rm gone.txt").await;
    assert!(!shell.path("gone.txt").exists());

    let output = shell.output_of("rm folder").await;
    assert!(output.starts_with("Operation failed: No such file: folder"));
    assert!(shell.path("folder").is_dir());
}

#[tokio::test]
async fn test_hash_is_sha256_hex() {
    let mut shell = TestShell::new();
    shell.write("abc.txt", b"abc");
    shell.write("abd.txt", b"abd");

    let first = shell.output_of("hash abc.txt").await;
    let second = shell.output_of("hash abc.txt").await;
    let other = shell.output_of("hash abd.txt").await;

    let digest = first.lines().next().unwrap();
    assert_eq!(
        digest,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(first, second);
    assert_ne!(digest, other.lines().next().unwrap());
}

#[tokio::test]
async fn test_compress_decompress_round_trip() {
    let mut shell = TestShell::new();
    let content: Vec<u8> = (0..50_000u32).map(|i| (i * 7 % 251) as u8).collect();
    shell.write("data.bin", &content);

    let output = shell.output_of("compress data.bin data.bin.br").await;
    assert_eq!(output, location_line(&shell.root));
    assert!(shell.path("data.bin.br").is_file());
    assert_ne!(fs::read(shell.path("data.bin.br")).unwrap(), content);

    shell.run("decompress data.bin.br restored.bin").await;
    assert_eq!(fs::read(shell.path("restored.bin")).unwrap(), content);
}

#[tokio::test]
async fn test_compress_empty_file_round_trip() {
    let mut shell = TestShell::new();
    shell.write("empty.txt", b"");

    shell.run("compress empty.txt empty.br").await;
    shell.run("decompress empty.br empty.out").await;
    assert_eq!(fs::read(shell.path("empty.out")).unwrap(), b"");
}

#[tokio::test]
async fn test_decompress_garbage_fails_and_cleans_up() {
    let mut shell = TestShell::new();
    shell.write("garbage.br", b"this is certainly not brotli data at all");

    let output = shell.output_of("decompress garbage.br out.txt").await;
    assert!(output.starts_with("Operation failed: "), "{output}");
    assert!(!shell.path("out.txt").exists());
}

#[tokio::test]
async fn test_compress_refuses_existing_destination() {
    let mut shell = TestShell::new();
    shell.write("a.txt", b"a");
    shell.write("a.br", b"existing");

    let output = shell.output_of("compress a.txt a.br").await;
    assert!(output.starts_with("Operation failed: Already exists: a.br"));
    assert_eq!(fs::read(shell.path("a.br")).unwrap(), b"existing");
}

#[tokio::test]
async fn test_paths_outside_root_are_rejected() {
    let outside = TempDir::new().unwrap();
    let secret = outside.path().canonicalize().unwrap().join("secret.txt");
    fs::write(&secret, b"top secret").unwrap();

    let mut shell = TestShell::new();
    shell.write("a.txt", b"a");

    let commands = [
        format!("cat {}", secret.display()),
        format!("cd {}", outside.path().display()),
        "cat ../../../../etc/hostname".to_string(),
        "cp a.txt ../escaped.txt".to_string(),
        "add ../../created.txt".to_string(),
        format!("rm {}", secret.display()),
    ];

    for line in &commands {
        let output = shell.output_of(line).await;
        assert!(
            output.starts_with("Operation failed: Access denied"),
            "{line}: {output}"
        );
    }

    assert!(secret.exists());
    assert_eq!(shell.current_dir(), shell.root.as_path());
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_escaping_root_is_rejected() {
    let outside = TempDir::new().unwrap();
    let mut shell = TestShell::new();
    std::os::unix::fs::symlink(outside.path(), shell.path("link")).unwrap();

    let output = shell.output_of("cd link").await;
    assert!(output.starts_with("Operation failed: Access denied"), "{output}");
    assert_eq!(shell.current_dir(), shell.root.as_path());
}

#[tokio::test]
async fn test_relative_paths_follow_current_dir() {
    let mut shell = TestShell::new();
    fs::create_dir_all(shell.path("a/b")).unwrap();
    shell.write("top.txt", b"top");

    shell.run("cd a/b").await;
    shell.run("cp ../../top.txt here.txt").await;
    assert_eq!(fs::read(shell.path("a/b/here.txt")).unwrap(), b"top");

    shell.run("cd ..").await;
    assert_eq!(shell.current_dir(), shell.path("a").as_path());
}

#[tokio::test]
async fn test_overlong_line_is_invalid_input() {
    let mut shell = TestShell::with_config(ShellConfig {
        colors: false,
        max_command_length: 16,
        ..ShellConfig::default()
    });

    let output = shell.output_of("add a-rather-long-file-name.txt").await;
    assert!(output.starts_with("Invalid input"));
    assert!(!shell.path("a-rather-long-file-name.txt").exists());
}

#[tokio::test]
async fn test_os_queries() {
    let mut shell = TestShell::new();

    let output = shell.output_of("os --architecture").await;
    assert!(output.starts_with(std::env::consts::ARCH));

    let output = shell.output_of("os --EOL").await;
    assert!(output.starts_with("\"\\n\"") || output.starts_with("\"\\r\\n\""));

    let output = shell.output_of("os --homedir").await;
    match dirs::home_dir() {
        Some(home) => assert!(output.starts_with(&format!("{}\n", home.display()))),
        None => assert!(output.starts_with("Operation failed: home directory")),
    }

    let output = shell.output_of("os --bogus").await;
    assert!(output.starts_with("Invalid input"));
}

#[tokio::test]
async fn test_errors_never_end_the_session() {
    let mut shell = TestShell::new();
    for line in ["cat missing.txt", "rm", "cd ..", "nonsense", "hash nope"] {
        let (status, _) = shell.run(line).await;
        assert_eq!(status, CommandStatus::Continue);
    }
}

// Queue pre-filled with `lines`
async fn queue_of(lines: &[&str]) -> (mpsc::Sender<String>, mpsc::Receiver<String>) {
    let (tx, rx) = mpsc::channel(16);
    for line in lines {
        tx.send(line.to_string()).await.unwrap();
    }
    (tx, rx)
}

#[tokio::test]
async fn test_queued_lines_run_in_order_until_exit() {
    let mut shell = TestShell::new();
    fs::create_dir(shell.path("sub")).unwrap();
    shell.write("sub/inner.txt", b"x");

    let (_tx, mut rx) = queue_of(&["cd sub", "ls", ".exit", "up"]).await;
    shell.dispatcher.run(&mut rx, std::future::pending()).await;

    let output = shell.dispatcher.writer_mut().take_captured();
    let moved = output.find(&location_line(&shell.path("sub"))).unwrap();
    let listed = output.find("inner.txt").unwrap();
    assert!(moved < listed, "{output}");

    // Nothing after .exit runs
    assert_eq!(shell.current_dir(), shell.path("sub").as_path());
    assert_eq!(rx.try_recv().unwrap(), "up");
}

#[tokio::test]
async fn test_run_stops_when_queue_closes() {
    let mut shell = TestShell::new();
    fs::create_dir(shell.path("sub")).unwrap();

    let (tx, mut rx) = queue_of(&["cd sub", "add note.txt"]).await;
    drop(tx);
    shell.dispatcher.run(&mut rx, std::future::pending()).await;

    assert_eq!(shell.current_dir(), shell.path("sub").as_path());
    assert!(shell.path("sub/note.txt").is_file());
}

#[tokio::test]
async fn test_shutdown_takes_priority_over_queued_lines() {
    let mut shell = TestShell::new();

    let (_tx, mut rx) = queue_of(&["add never.txt"]).await;
    shell.dispatcher.run(&mut rx, std::future::ready(())).await;

    assert!(!shell.path("never.txt").exists());
}

#[tokio::test]
async fn test_shutdown_lets_running_command_finish() {
    let mut shell = TestShell::with_config(ShellConfig {
        colors: false,
        buffer_size: 4,
        ..ShellConfig::default()
    });
    shell.write("a.txt", b"the whole content");

    // Pending while the first line is picked up, ready when checked again
    let mut polls = 0;
    let shutdown = std::future::poll_fn(move |_| {
        polls += 1;
        if polls > 1 { Poll::Ready(()) } else { Poll::Pending }
    });

    let (_tx, mut rx) = queue_of(&["cp a.txt b.txt", "cp a.txt c.txt"]).await;
    shell.dispatcher.run(&mut rx, shutdown).await;

    assert_eq!(fs::read(shell.path("b.txt")).unwrap(), b"the whole content");
    assert!(!shell.path("c.txt").exists());
}
