use crate::engine::EngineHandle;
use crate::shared::{CallKind, Door, Motion, Snapshot};
use log::error;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/**
 * Interactive command console. Runs on the main thread, translates text
 * commands into validated engine events and renders state snapshots. All
 * floor-range and direction-legality checks happen here; nothing invalid
 * ever reaches the engine.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up(u8),
    Down(u8),
    Go(u8),
    Status { json: bool },
    Help,
    Quit,
}

/// Parse one trimmed input line. `Ok(None)` is an empty line (re-prompt,
/// no effect); `Err` carries the message to show the user.
pub fn parse_command(line: &str, n_floors: u8) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let keyword = match words.next() {
        Some(word) => word.to_lowercase(),
        None => return Ok(None),
    };
    let command = match keyword.as_str() {
        "up" | "u" => {
            let floor = parse_floor(words.next(), n_floors)?;
            if floor == n_floors {
                return Err(format!("there is no up call on the top floor ({})", n_floors));
            }
            Command::Up(floor)
        }
        "down" | "d" => {
            let floor = parse_floor(words.next(), n_floors)?;
            if floor == 1 {
                return Err("there is no down call on the bottom floor (1)".into());
            }
            Command::Down(floor)
        }
        "go" | "g" => Command::Go(parse_floor(words.next(), n_floors)?),
        "status" | "s" => {
            let json = match words.next() {
                None => false,
                Some(word) if word.eq_ignore_ascii_case("json") => true,
                Some(other) => {
                    return Err(format!("unknown status format '{}', try 'status json'", other))
                }
            };
            Command::Status { json }
        }
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };
    if words.next().is_some() {
        return Err("too many arguments, try 'help'".into());
    }
    Ok(Some(command))
}

fn parse_floor(word: Option<&str>, n_floors: u8) -> Result<u8, String> {
    let word = word.ok_or_else(|| "missing floor number, try 'help'".to_string())?;
    let floor: u8 = word
        .parse()
        .map_err(|_| format!("'{}' is not a floor number", word))?;
    if floor < 1 || floor > n_floors {
        return Err(format!("floor {} is outside 1..={}", floor, n_floors));
    }
    Ok(floor)
}

/// Prompt-read-dispatch loop. Returns once shutdown has been requested,
/// whether by `quit`, end of input or the interrupt flag.
pub fn run(handle: EngineHandle, n_floors: u8, shutdown: Arc<AtomicBool>) {
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("CMD> ");
        let _ = io::stdout().flush();

        line.clear();
        let bytes_read = match stdin.lock().read_line(&mut line) {
            Ok(n) => n,
            Err(e) => {
                error!("failed to read command: {}", e);
                0
            }
        };
        // The interrupt handler has already asked the engine to stop.
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
        // EOF behaves like quit.
        if bytes_read == 0 {
            handle.request_shutdown();
            break;
        }

        match parse_command(line.trim(), n_floors) {
            Ok(None) => {}
            Ok(Some(Command::Up(floor))) => handle.enqueue_call(floor, CallKind::Up),
            Ok(Some(Command::Down(floor))) => handle.enqueue_call(floor, CallKind::Down),
            Ok(Some(Command::Go(floor))) => handle.enqueue_internal(floor),
            Ok(Some(Command::Status { json })) => render_status(&handle.snapshot(), json),
            Ok(Some(Command::Help)) => print_help(n_floors),
            Ok(Some(Command::Quit)) => {
                handle.request_shutdown();
                break;
            }
            Err(message) => println!("{}", message),
        }
    }
}

fn render_status(snapshot: &Snapshot, json: bool) {
    if json {
        match serde_json::to_string(snapshot) {
            Ok(encoded) => println!("{}", encoded),
            Err(e) => error!("failed to encode snapshot: {}", e),
        }
        return;
    }

    let motion = match snapshot.motion {
        Motion::StandBy => "standing by",
        Motion::MovingUp => "moving up",
        Motion::MovingDown => "moving down",
    };
    let door = match snapshot.door {
        Door::Open => "open",
        Door::Closed => "closed",
    };
    println!("Car at floor {}, {}, doors {}.", snapshot.floor, motion, door);

    // Top floor first, like a shaft diagram.
    for (index, buttons) in snapshot.buttons.iter().enumerate().rev() {
        let floor = index as u8 + 1;
        let marker = if floor == snapshot.floor { ">" } else { " " };
        println!(
            "{} {:>2} [{}{}{}]",
            marker,
            floor,
            if buttons.up { 'U' } else { '.' },
            if buttons.down { 'D' } else { '.' },
            if buttons.internal { 'I' } else { '.' },
        );
    }
}

fn print_help(n_floors: u8) {
    println!("Commands (floors are 1 to {}):", n_floors);
    println!("  up <floor>   | u <floor>  hall up call");
    println!("  down <floor> | d <floor>  hall down call");
    println!("  go <floor>   | g <floor>  in-car floor select");
    println!("  status [json] | s         show elevator state");
    println!("  help | h | ?              this summary");
    println!("  quit | q | exit           stop the elevator");
}

/***************************************/
/*             Unit tests              */
/***************************************/
