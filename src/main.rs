use std::io::{self, BufRead, Write};

use boardsourced::{BoardEngine, Result};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("boardctl - event-sourced kanban board engine");
    println!("type `help` for commands, `exit` to quit\n");

    let engine = BoardEngine::new();
    let stdin = io::stdin();
    let mut out = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }
        if let Err(e) = dispatch(&engine, line) {
            println!("error: {e}");
        }
        let _ = out.flush();
    }
}

fn dispatch(engine: &BoardEngine, line: &str) -> Result<()> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let (command, rest) = parts.split_first().expect("line is non-empty");

    match *command {
        "help" => {
            print_help();
            Ok(())
        }
        "create_board" => {
            let board_id = engine.create_board()?;
            println!("board created: {board_id}");
            Ok(())
        }
        "edit_board_title" => {
            let board_id = parse_uuid(rest, 0)?;
            let title = rest[1..].join(" ");
            engine.edit_board_title(board_id, title)?;
            println!("ok");
            Ok(())
        }
        "add_column" => {
            let board_id = parse_uuid(rest, 0)?;
            let column_id = engine.add_column(board_id)?;
            println!("column created: {column_id}");
            Ok(())
        }
        "remove_column" => {
            let board_id = parse_uuid(rest, 0)?;
            let column_id = parse_uuid(rest, 1)?;
            engine.remove_column(board_id, column_id)?;
            println!("ok");
            Ok(())
        }
        "edit_column_title" => {
            let board_id = parse_uuid(rest, 0)?;
            let column_id = parse_uuid(rest, 1)?;
            let title = rest[2..].join(" ");
            engine.edit_column_title(board_id, column_id, title)?;
            println!("ok");
            Ok(())
        }
        "add_card" => {
            let board_id = parse_uuid(rest, 0)?;
            let column_id = parse_uuid(rest, 1)?;
            let title = rest.get(2).copied().unwrap_or_default().to_string();
            let content = rest[3.min(rest.len())..].join(" ");
            let card_id = engine.add_card(board_id, column_id, title, content)?;
            println!("card created: {card_id}");
            Ok(())
        }
        "remove_card" => {
            let board_id = parse_uuid(rest, 0)?;
            let column_id = parse_uuid(rest, 1)?;
            let card_id = parse_uuid(rest, 2)?;
            engine.remove_card(board_id, column_id, card_id)?;
            println!("ok");
            Ok(())
        }
        "edit_card_title" => {
            let board_id = parse_uuid(rest, 0)?;
            let column_id = parse_uuid(rest, 1)?;
            let card_id = parse_uuid(rest, 2)?;
            let title = rest[3.min(rest.len())..].join(" ");
            engine.edit_card_title(board_id, column_id, card_id, title)?;
            println!("ok");
            Ok(())
        }
        "edit_card_content" => {
            let board_id = parse_uuid(rest, 0)?;
            let column_id = parse_uuid(rest, 1)?;
            let card_id = parse_uuid(rest, 2)?;
            let content = rest[3.min(rest.len())..].join(" ");
            engine.edit_card_content(board_id, column_id, card_id, content)?;
            println!("ok");
            Ok(())
        }
        "move_card" => {
            let board_id = parse_uuid(rest, 0)?;
            let from_column_id = parse_uuid(rest, 1)?;
            let to_column_id = parse_uuid(rest, 2)?;
            let card_id = parse_uuid(rest, 3)?;
            let new_index: usize = rest.get(4).and_then(|s| s.parse().ok()).unwrap_or(0);
            engine.move_card(board_id, from_column_id, to_column_id, card_id, new_index)?;
            println!("ok");
            Ok(())
        }
        "undo" => {
            let board_id = parse_uuid(rest, 0)?;
            let cursor = engine.undo(board_id)?;
            println!("version_cursor: {cursor}");
            Ok(())
        }
        "redo" => {
            let board_id = parse_uuid(rest, 0)?;
            let cursor = engine.redo(board_id)?;
            println!("version_cursor: {cursor}");
            Ok(())
        }
        "get_state" => {
            let board_id = parse_uuid(rest, 0)?;
            let rendered = engine.render_board(board_id)?;
            println!("{}", serde_json::to_string_pretty(&rendered).expect("serializable"));
            Ok(())
        }
        other => {
            println!("unknown command: {other} (type `help`)");
            Ok(())
        }
    }
}

fn parse_uuid(args: &[&str], index: usize) -> Result<Uuid> {
    let raw = args.get(index).copied().unwrap_or_default();
    Uuid::parse_str(raw).map_err(|_| boardsourced::BoardError::InvariantViolation(format!("not a valid id: {raw}")))
}

fn print_help() {
    println!(
        "commands:\n\
         \x20 create_board\n\
         \x20 edit_board_title <board-id> <title...>\n\
         \x20 add_column <board-id>\n\
         \x20 remove_column <board-id> <column-id>\n\
         \x20 edit_column_title <board-id> <column-id> <title...>\n\
         \x20 add_card <board-id> <column-id> <title> <content...>\n\
         \x20 remove_card <board-id> <column-id> <card-id>\n\
         \x20 edit_card_title <board-id> <column-id> <card-id> <title...>\n\
         \x20 edit_card_content <board-id> <column-id> <card-id> <content...>\n\
         \x20 move_card <board-id> <from-column-id> <to-column-id> <card-id> <new-index>\n\
         \x20 undo <board-id>\n\
         \x20 redo <board-id>\n\
         \x20 get_state <board-id>\n\
         \x20 exit"
    );
}
