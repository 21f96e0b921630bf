use std::process::ExitCode;
use std::sync::Arc;

use taskboard::config::{Config, APP_NAME};
use taskboard::models::BoardSnapshot;
use taskboard::{BoardView, LocalBoardApi};
use taskboard_store::{commands, AppState};

const USAGE: &str = "usage: taskboard [<board-id> | new <title>]";

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();

    if let Err(e) = rolling_logger::init_logger(config.log_dir.clone(), APP_NAME) {
        eprintln!("Failed to init logger: {}", e);
    }

    let state = match AppState::open(&config.db_path).await {
        Ok(state) => {
            let _ = rolling_logger::info(&format!("Opened {}", config.db_path.display()));
            Arc::new(state)
        }
        Err(e) => {
            let _ = rolling_logger::error(&format!("DB init failed: {}", e));
            eprintln!("Failed to open {}: {}", config.db_path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = match args.as_slice() {
        [] => commands::list_boards(&state)
            .await
            .map_err(|e| e.to_string())
            .and_then(|boards| to_json(&boards)),
        [cmd, title @ ..] if cmd == "new" && !title.is_empty() => {
            commands::create_board(&state, title.join(" "))
                .await
                .map_err(|e| e.to_string())
                .and_then(|board| to_json(&board))
        }
        [id] => match id.parse::<u32>() {
            Ok(board_id) => show_board(state.clone(), board_id).await,
            Err(_) => Err(USAGE.to_string()),
        },
        _ => Err(USAGE.to_string()),
    };

    match output {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn show_board(state: Arc<AppState>, board_id: u32) -> Result<String, String> {
    let api = Arc::new(LocalBoardApi::new(state));
    let view = BoardView::load(api, board_id)
        .await
        .map_err(|e| e.to_string())?;
    let snapshot = BoardSnapshot {
        board: view.board().clone(),
        lists: view.lists().to_vec(),
    };
    to_json(&snapshot)
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| e.to_string())
}
