#![allow(clippy::unwrap_used, clippy::expect_used)]

use clap::Parser;
use oasis_app::bootstrap::{config_path, load_config, open_controller, CONFIG_FILE};
use oasis_app::cli::{Cli, Commands, TaskCommands, ToolCommands};
use oasis_core::AppConfig;
use oasis_tasks::{NewTask, Priority, TaskStatus};
use oasis_tools::ToolKind;
use std::fs;
use std::path::Path;

#[test]
fn test_config_path_defaults_to_data_dir() {
    let data = Path::new("/var/oasis");
    assert_eq!(config_path(data, None), data.join(CONFIG_FILE));
    assert_eq!(
        config_path(data, Some(Path::new("/etc/oasis.yaml"))),
        Path::new("/etc/oasis.yaml")
    );
}

#[test]
fn test_load_config_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(&dir.path().join(CONFIG_FILE)).unwrap();
    assert_eq!(config.export_file, AppConfig::default().export_file);
    assert_eq!(config.chat_limit, 120);
}

#[test]
fn test_load_config_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);

    fs::write(&path, "chat_limit: 0\n").unwrap();
    let err = load_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("chat_limit"));

    fs::write(&path, "chat_limit: [nope\n").unwrap();
    assert!(load_config(&path).is_err());
}

#[tokio::test]
async fn test_open_controller_persists_under_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("nested").join("data");
    let config = AppConfig {
        storage_key: "board".to_string(),
        ..AppConfig::default()
    };

    let mut controller = open_controller(&data_dir, config.clone()).await.unwrap();
    controller
        .add_task(NewTask::new("Persistida"))
        .await
        .unwrap();
    assert!(data_dir.join("board.json").exists());

    let reopened = open_controller(&data_dir, config).await.unwrap();
    assert_eq!(reopened.state().tasks.tasks()[0].title, "Persistida");
}

#[test]
fn test_cli_parses_subcommands() {
    let cli = Cli::try_parse_from(["oasis", "-d", "/tmp/o", "task", "add", "Llamar", "-p", "P1"])
        .unwrap();
    assert_eq!(cli.data_dir, Path::new("/tmp/o"));
    match cli.command {
        Some(Commands::Task {
            command:
                TaskCommands::Add {
                    title,
                    priority,
                    notes,
                },
        }) => {
            assert_eq!(title, "Llamar");
            assert_eq!(priority, Priority::P1);
            assert!(notes.is_empty());
        }
        other => panic!("unexpected command: {:?}", other),
    }

    let cli = Cli::try_parse_from(["oasis", "task", "move", "abc", "doing"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Task {
            command: TaskCommands::Move { status: TaskStatus::Doing, .. }
        })
    ));

    let cli = Cli::try_parse_from(["oasis", "tool", "disable", "whatsapp"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Tool {
            command: ToolCommands::Disable {
                tool: ToolKind::Whatsapp
            }
        })
    ));

    let cli = Cli::try_parse_from(["oasis", "chat", "/done", "cliente"]).unwrap();
    match cli.command {
        Some(Commands::Chat { text }) => assert_eq!(text.join(" "), "/done cliente"),
        other => panic!("unexpected command: {:?}", other),
    }

    assert!(Cli::try_parse_from(["oasis", "tool", "enable", "fax"]).is_err());
    assert!(Cli::try_parse_from(["oasis"]).unwrap().command.is_none());
}
