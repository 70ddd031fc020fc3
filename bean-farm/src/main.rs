//! bean-farm — look after a Bean from the terminal.
//!
//! Usage: `bean-farm [config.toml]`. Without an argument `bean.toml` in the
//! working directory is used when present, built-in defaults otherwise.
//! Logs go to stderr and honour `RUST_LOG`.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bean_core::persistence::SaveStore;
use bean_core::{ActionSource, BeanConfig, BeanEngine, BeanEvent, EventSink, MessageSink, Personality, Turn};
use bean_farm::{DEFAULT_SLOT, FarmSession, Farmer, MenuChoice, SaveGame, menu_text};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "bean.toml";

/// Prints everything the Bean says or suffers.
struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn on_event(&mut self, _event: BeanEvent, message: &str) {
        println!("  !! {message}");
    }
}

impl MessageSink for ConsoleSink {
    fn on_message(&mut self, text: &str) {
        println!("  {text}");
    }
}

fn load_config() -> Result<(BeanConfig, PathBuf)> {
    let explicit = std::env::args().nth(1).map(PathBuf::from);
    let path = explicit.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    let config = if path.exists() {
        BeanConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?
    } else if explicit.is_some() {
        anyhow::bail!("config file not found: {}", path.display());
    } else {
        BeanConfig::default()
    };
    Ok((config, base_dir))
}

/// Prompt and read one trimmed line; `None` on end of input.
fn ask(input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn ask_personality(input: &mut impl BufRead) -> Result<Option<Personality>> {
    for (i, p) in Personality::ALL.iter().enumerate() {
        println!("{}. {}", i + 1, p.label());
    }
    loop {
        let Some(answer) = ask(input, "Personality> ")? else {
            return Ok(None);
        };
        let picked = match answer.parse::<usize>() {
            Ok(n) if (1..=Personality::ALL.len()).contains(&n) => Some(Personality::ALL[n - 1]),
            _ => answer.parse::<Personality>().ok(),
        };
        match picked {
            Some(p) => return Ok(Some(p)),
            None => println!("Pick 1-{}.", Personality::ALL.len()),
        }
    }
}

fn new_game<S: ActionSource>(
    input: &mut impl BufRead,
    engine: &BeanEngine<S>,
    config: &BeanConfig,
) -> Result<Option<FarmSession>> {
    let Some(farmer_name) = ask(input, "Your name> ")? else {
        return Ok(None);
    };
    let Some(bean_name) = ask(input, "Your Bean's name> ")? else {
        return Ok(None);
    };
    let Some(personality) = ask_personality(input)? else {
        return Ok(None);
    };
    let bean = engine.create_bean(non_empty(bean_name, "Bean"), personality);
    println!("{} the {} joins your farm!", bean.name(), personality.label());
    let farmer = Farmer::new(non_empty(farmer_name, "Farmer"), bean);
    Ok(Some(FarmSession::new(farmer, config.session.clone())))
}

fn non_empty(value: String, fallback: &str) -> String {
    if value.is_empty() { fallback.to_string() } else { value }
}

fn start_session<S: ActionSource>(
    input: &mut impl BufRead,
    engine: &BeanEngine<S>,
    store: &SaveStore,
    config: &BeanConfig,
) -> Result<Option<FarmSession>> {
    match SaveGame::read(store, DEFAULT_SLOT) {
        Ok(Some(save)) => {
            let prompt = format!(
                "Found {} and {} on day {}. Resume? [Y/n] ",
                save.farmer_name,
                save.bean.name(),
                save.day
            );
            let Some(answer) = ask(input, &prompt)? else {
                return Ok(None);
            };
            if !answer.to_ascii_lowercase().starts_with('n') {
                return Ok(Some(FarmSession::resume(save, config.session.clone())));
            }
        }
        Ok(None) => {}
        Err(e) => {
            warn!(error = %e, "Save slot unreadable; starting a new game");
            println!("The saved game could not be read ({e}).");
        }
    }
    new_game(input, engine, config)
}

fn save(store: &SaveStore, session: &FarmSession) -> Result<()> {
    session
        .to_save()
        .write(store, DEFAULT_SLOT)
        .context("failed to save the game")?;
    println!("Game saved.");
    Ok(())
}

fn confirmed(answer: &str) -> bool {
    answer.trim().to_ascii_lowercase().starts_with('y')
}

/// Menu loop. The game is saved on quit and on end of input; starting over
/// only replaces the saved slot at the next save.
fn run<S: ActionSource>(
    input: &mut impl BufRead,
    engine: &mut BeanEngine<S>,
    store: &SaveStore,
    config: &BeanConfig,
    mut session: FarmSession,
) -> Result<()> {
    let mut sink = ConsoleSink;
    loop {
        println!();
        println!(
            "Day {} turn {}/{}",
            session.day(),
            session.turn_of_day(),
            session.turns_per_day()
        );
        println!("{}", menu_text());
        let Some(line) = ask(input, "> ")? else {
            return save(store, &session);
        };
        let choice = match line.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match choice {
            MenuChoice::Act(command) => match session.act(engine, command, &mut sink) {
                Ok(report) => {
                    if report.turn == Turn::Incapacitated {
                        println!(
                            "  {} is too exhausted to {}. Heal them first.",
                            session.farmer().bean().name(),
                            command.label().to_ascii_lowercase()
                        );
                    }
                }
                Err(e) if e.is_data_error() => println!("  Nothing happens ({e})."),
                Err(e) => return Err(e.into()),
            },
            MenuChoice::Status => println!("{}", session.status()),
            MenuChoice::Quit => return save(store, &session),
            MenuChoice::NewGame => {
                let Some(answer) = ask(input, "Start over and replace the current game? [y/N] ")?
                else {
                    return save(store, &session);
                };
                if !confirmed(&answer) {
                    println!("Keeping the current game.");
                    continue;
                }
                match new_game(input, engine, config)? {
                    Some(fresh) => session = fresh,
                    None => return save(store, &session),
                }
            }
        }
    }
}

fn main() -> Result<()> {
    let (config, base_dir) = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let mut engine = BeanEngine::from_config(&config, &base_dir);
    let save_path = base_dir.join(&config.persistence.path);
    let store = SaveStore::open(&save_path, &config.persistence)
        .with_context(|| format!("failed to open save file {}", save_path.display()))?;
    info!(save = %save_path.display(), "bean-farm started");

    let stdin = io::stdin();
    let mut input = stdin.lock();

    if let Some(session) = start_session(&mut input, &engine, &store, &config)? {
        run(&mut input, &mut engine, &store, &config, session)?;
    }

    info!("bean-farm exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bean_core::config::{PersistenceConfig, SessionConfig};
    use bean_core::source::EmbeddedSource;

    use super::*;

    fn setup() -> (BeanEngine<EmbeddedSource>, SaveStore, BeanConfig) {
        let engine = BeanEngine::with_embedded_data(Some(2));
        let store = SaveStore::open_in_memory(&PersistenceConfig::default()).expect("store");
        (engine, store, BeanConfig::default())
    }

    fn running_game(engine: &BeanEngine<EmbeddedSource>) -> FarmSession {
        let bean = engine.create_bean("Pip", Personality::Kind);
        FarmSession::new(Farmer::new("Ana", bean), SessionConfig::default())
    }

    fn saved(store: &SaveStore) -> SaveGame {
        SaveGame::read(store, DEFAULT_SLOT).expect("read").expect("slot present")
    }

    #[test]
    fn new_game_interrupted_at_confirmation_keeps_the_game() {
        let (mut engine, store, config) = setup();
        let session = running_game(&engine);
        session.to_save().write(&store, DEFAULT_SLOT).expect("seed save");

        let mut input = Cursor::new("1\n9\n");
        run(&mut input, &mut engine, &store, &config, session).expect("run");

        let game = saved(&store);
        assert_eq!(game.farmer_name, "Ana");
        assert_eq!(game.turn_count, 1);
    }

    #[test]
    fn declined_new_game_continues_the_current_one() {
        let (mut engine, store, config) = setup();
        let session = running_game(&engine);

        let mut input = Cursor::new("9\nn\n2\n8\n");
        run(&mut input, &mut engine, &store, &config, session).expect("run");

        let game = saved(&store);
        assert_eq!(game.bean.name(), "Pip");
        assert_eq!(game.turn_count, 1);
    }

    #[test]
    fn new_game_abandoned_mid_setup_saves_the_old_game() {
        let (mut engine, store, config) = setup();
        let session = running_game(&engine);

        let mut input = Cursor::new("9\ny\nBo\n");
        run(&mut input, &mut engine, &store, &config, session).expect("run");

        assert_eq!(saved(&store).farmer_name, "Ana");
    }

    #[test]
    fn confirmed_new_game_replaces_the_slot_on_quit() {
        let (mut engine, store, config) = setup();
        let session = running_game(&engine);
        session.to_save().write(&store, DEFAULT_SLOT).expect("seed save");

        let mut input = Cursor::new("9\nYes\nBo\nSprout\n3\n8\n");
        run(&mut input, &mut engine, &store, &config, session).expect("run");

        let game = saved(&store);
        assert_eq!(game.farmer_name, "Bo");
        assert_eq!(game.bean.name(), "Sprout");
        assert_eq!(game.bean.personality(), Personality::Snappy);
        assert_eq!(game.turn_count, 0);
    }
}
