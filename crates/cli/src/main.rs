use blanks_core::{
    ActionReply, Event, GameOverReason, GameRules, Mode, PackId, PlayerId, PromptCard,
    SessionRegistry, VenueId,
};
use blanks_data::load_catalog;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

// The whole REPL drives a single venue; the registry still routes by id the
// way a multi-room transport would.
const VENUE: VenueId = VenueId(1);

#[derive(Debug, Clone)]
struct CliOptions {
    packs: PathBuf,
    seed: Option<u64>,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut packs = PathBuf::from("assets/packs");
    let mut seed = None;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--packs" => {
                if let Some(value) = args.get(idx + 1) {
                    packs = PathBuf::from(value);
                    idx += 1;
                }
            }
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    CliOptions { packs, seed }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

/// Hot-seat table state: everyone types at the same prompt, so players are
/// addressed by the names they joined with.
struct Table {
    registry: SessionRegistry,
    ids: HashMap<String, PlayerId>,
    names: HashMap<PlayerId, String>,
    next_id: u64,
    seed: u64,
    last_prompt: Option<PromptCard>,
}

impl Table {
    fn new(registry: SessionRegistry, seed: u64) -> Self {
        Self {
            registry,
            ids: HashMap::new(),
            names: HashMap::new(),
            next_id: 1,
            seed,
            last_prompt: None,
        }
    }

    fn assign_id(&mut self, name: &str) -> PlayerId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = PlayerId(self.next_id);
        self.next_id += 1;
        self.ids.insert(name.to_string(), id);
        self.names.insert(id, name.to_string());
        id
    }

    fn lookup(&self, name: &str) -> Option<PlayerId> {
        self.ids.get(name).copied()
    }

    fn name_of(&self, id: PlayerId) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    fn report(&mut self, reply: &ActionReply) {
        let events = reply.events.clone();
        for event in &events {
            self.describe(event);
        }
    }

    fn describe(&mut self, event: &Event) {
        match event {
            Event::PlayerJoined { player, seated, .. } => {
                println!("{} joined ({seated} seated)", self.name_of(*player));
            }
            Event::PlayerLeft { player, .. } => {
                println!("{} left the game", self.name_of(*player));
            }
            Event::PackSelectionStarted => {
                println!("pick the card packs first: packs [id ...]");
            }
            Event::PacksSelected {
                packs,
                prompts,
                responses,
            } => {
                let listed: Vec<String> = packs.iter().map(PackId::to_string).collect();
                println!(
                    "packs in play: {} ({prompts} prompts, {responses} responses)",
                    listed.join(", ")
                );
            }
            Event::RoundStarted {
                round,
                czar,
                prompt,
                pick,
            } => {
                self.last_prompt = Some(PromptCard {
                    text: prompt.clone(),
                    pick: *pick,
                    pack: PackId::from(""),
                });
                println!();
                println!("-- round {round} --");
                println!("czar: {}", self.name_of(*czar));
                println!("prompt: {prompt} (pick {pick})");
            }
            Event::CardChosen { player, remaining } => {
                println!(
                    "{} picked a card, {remaining} more to go",
                    self.name_of(*player)
                );
            }
            Event::SubmissionLocked { player, waiting_on } => {
                if waiting_on.is_empty() {
                    println!("{} is in", self.name_of(*player));
                } else {
                    let waiting: Vec<String> =
                        waiting_on.iter().map(|id| self.name_of(*id)).collect();
                    println!(
                        "{} is in, waiting on {}",
                        self.name_of(*player),
                        waiting.join(", ")
                    );
                }
            }
            Event::PendingReturned { player, count } => {
                println!(
                    "{} took back {count} pending card(s)",
                    self.name_of(*player)
                );
            }
            Event::JudgingStarted { submissions } => {
                println!("all {submissions} submissions are in, the czar judges (subs / pick <n>)");
            }
            Event::WinnerPicked {
                player,
                cards,
                score,
            } => {
                let line = match self.last_prompt.as_ref() {
                    Some(prompt) => prompt.filled(cards),
                    None => cards.join(" / "),
                };
                println!("winner: {} ({score} point(s))", self.name_of(*player));
                println!("  {line}");
            }
            Event::CzarSkipped { czar } => {
                println!("czar {} was skipped", self.name_of(*czar));
            }
            Event::RoundAborted { czar } => {
                println!(
                    "round abandoned because czar {} is gone, cards returned",
                    self.name_of(*czar)
                );
            }
            Event::GameOver {
                reason,
                winner,
                scoreboard,
            } => {
                println!();
                match reason {
                    GameOverReason::TargetReached => println!("game over: target score reached"),
                    GameOverReason::QuickRoundComplete => println!("game over: quick round done"),
                    GameOverReason::HostEnded => println!("game over: the host ended it"),
                    GameOverReason::TooFewPlayers => {
                        println!("game over: not enough players left")
                    }
                    GameOverReason::ContentExhausted => {
                        println!("game over: the selected packs ran out of cards")
                    }
                }
                if let Some(champion) = winner {
                    println!("winner: {}", self.name_of(*champion));
                }
                println!("final standings:");
                for entry in scoreboard {
                    println!("  {:>3}  {}", entry.score, entry.name);
                }
            }
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  start <name> [target]   open a scored game hosted by <name>");
    println!("  quick <name>            open a single-round game hosted by <name>");
    println!("  join <name>             seat another player");
    println!("  begin                   host starts the game");
    println!("  packs [id ...]          host picks packs (none = all of them)");
    println!("  play <name> <idx>       submit the hand card at <idx> (0-based)");
    println!("  cancel <name>           take back a half-finished submission");
    println!("  hand <name>             show a player's hand");
    println!("  subs                    show anonymized submissions");
    println!("  pick <n>                czar picks entry <n> (1-based)");
    println!("  status                  table overview");
    println!("  json                    table overview as JSON");
    println!("  skip                    host skips an absent czar");
    println!("  remove <name>           host removes a player");
    println!("  leave <name>            a player walks away");
    println!("  end                     host ends the game early");
    println!("  help, quit");
}

fn print_status(table: &Table) {
    let view = match table.registry.status(VENUE) {
        Ok(view) => view,
        Err(err) => {
            println!("error: {err}");
            return;
        }
    };
    println!(
        "phase: {:?}  mode: {:?}  round: {}  target: {}",
        view.phase, view.mode, view.round, view.target_score
    );
    if let (Some(prompt), Some(pick)) = (view.prompt.as_ref(), view.pick) {
        println!("prompt: {prompt} (pick {pick})");
    }
    for player in &view.players {
        let marker = if player.is_czar {
            "czar"
        } else if player.submitted {
            "in"
        } else {
            ""
        };
        println!("  {:>3}  {:<16} {}", player.score, player.name, marker);
    }
    if !view.waiting_on.is_empty() {
        println!("waiting on: {}", view.waiting_on.join(", "));
    }
    println!(
        "deck: {} responses, {} prompts",
        view.responses_left, view.prompts_left
    );
}

fn print_hand(table: &Table, player: PlayerId) {
    match table.registry.hand(VENUE, player) {
        Ok(hand) => {
            for (idx, card) in hand.hand.iter().enumerate() {
                println!("  [{idx}] {card}");
            }
            if !hand.pending.is_empty() {
                println!("  pending: {}", hand.pending.join(" / "));
            }
            if let Some(cards) = hand.submitted {
                println!("  submitted: {}", cards.join(" / "));
            }
        }
        Err(err) => println!("error: {err}"),
    }
}

fn print_submissions(table: &Table) {
    match table.registry.judging(VENUE) {
        Ok(view) => {
            println!("prompt: {} (pick {})", view.prompt, view.pick);
            for (idx, entry) in view.entries.iter().enumerate() {
                println!("  [{}] {}", idx + 1, entry.join(" / "));
            }
        }
        Err(err) => println!("error: {err}"),
    }
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).ok()? == 0 {
        return None;
    }
    Some(line.trim_end_matches(['\n', '\r']).to_string())
}

fn require_name(table: &Table, args: &[&str]) -> Option<PlayerId> {
    let Some(name) = args.first() else {
        println!("error: a player name is required");
        return None;
    };
    match table.lookup(name) {
        Some(id) => Some(id),
        None => {
            println!("error: nobody here is called '{name}'");
            None
        }
    }
}

fn host_id(table: &Table) -> Option<PlayerId> {
    match table.registry.session(VENUE) {
        Some(session) => Some(session.host),
        None => {
            println!("error: no game is running");
            None
        }
    }
}

fn czar_of(table: &Table) -> Option<PlayerId> {
    match table.registry.session(VENUE).and_then(|s| s.czar_id()) {
        Some(id) => Some(id),
        None => {
            println!("error: no game is running");
            None
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    let catalog = match load_catalog(Path::new(&options.packs)) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("failed to load packs: {err:#}");
            std::process::exit(1);
        }
    };
    let listed: Vec<String> = catalog.all_ids().iter().map(PackId::to_string).collect();
    println!(
        "loaded {} pack(s): {} ({} prompts, {} responses)",
        catalog.packs().len(),
        listed.join(", "),
        catalog.total_prompts(),
        catalog.total_responses()
    );

    let seed = options.seed.unwrap_or_else(clock_seed);
    let registry = SessionRegistry::new(catalog, GameRules::default());
    let mut table = Table::new(registry, seed);
    print_help();

    loop {
        let Some(line) = read_line("> ") else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();
        match cmd {
            "help" | "h" | "?" => print_help(),
            "quit" | "exit" => break,
            "start" | "quick" => {
                let Some(name) = args.first() else {
                    println!("error: a host name is required");
                    continue;
                };
                let mode = if cmd == "quick" {
                    Mode::Quick
                } else {
                    Mode::Scored
                };
                let target = args.get(1).and_then(|raw| raw.parse::<u32>().ok());
                let host = table.assign_id(name);
                // each game gets its own stream off the table seed
                table.seed = table.seed.wrapping_add(1);
                let seed = table.seed;
                match table
                    .registry
                    .start_session(VENUE, host, *name, mode, target, seed)
                {
                    Ok(reply) => {
                        table.report(&reply);
                        println!("game open, waiting for players (join <name>)");
                    }
                    Err(err) => println!("error: {err}"),
                }
            }
            "join" => {
                let Some(name) = args.first() else {
                    println!("error: a player name is required");
                    continue;
                };
                let player = table.assign_id(name);
                match table.registry.join(VENUE, player, *name) {
                    Ok(reply) => table.report(&reply),
                    Err(err) => println!("error: {err}"),
                }
            }
            "begin" => {
                let Some(host) = host_id(&table) else {
                    continue;
                };
                match table.registry.begin(VENUE, host) {
                    Ok(reply) => table.report(&reply),
                    Err(err) => println!("error: {err}"),
                }
            }
            "packs" => {
                let Some(host) = host_id(&table) else {
                    continue;
                };
                let ids: Vec<PackId> = args.iter().map(|raw| PackId::from(*raw)).collect();
                match table.registry.select_packs(VENUE, host, &ids) {
                    Ok(reply) => table.report(&reply),
                    Err(err) => println!("error: {err}"),
                }
            }
            "play" | "p" => {
                let Some(player) = require_name(&table, &args) else {
                    continue;
                };
                let Some(index) = args.get(1).and_then(|raw| raw.parse::<usize>().ok()) else {
                    println!("usage: play <name> <idx>");
                    continue;
                };
                match table.registry.submit_card(VENUE, player, index) {
                    Ok(reply) => table.report(&reply),
                    Err(err) => println!("error: {err}"),
                }
            }
            "cancel" => {
                let Some(player) = require_name(&table, &args) else {
                    continue;
                };
                match table.registry.cancel_pending(VENUE, player) {
                    Ok(reply) => table.report(&reply),
                    Err(err) => println!("error: {err}"),
                }
            }
            "hand" => {
                let Some(player) = require_name(&table, &args) else {
                    continue;
                };
                print_hand(&table, player);
            }
            "subs" => print_submissions(&table),
            "pick" => {
                let Some(czar) = czar_of(&table) else {
                    continue;
                };
                let Some(choice) = args.first().and_then(|raw| raw.parse::<usize>().ok()) else {
                    println!("usage: pick <n>");
                    continue;
                };
                match table.registry.pick_winner(VENUE, czar, choice) {
                    Ok(reply) => table.report(&reply),
                    Err(err) => println!("error: {err}"),
                }
            }
            "status" | "s" => print_status(&table),
            "json" => match table.registry.status(VENUE) {
                Ok(view) => match serde_json::to_string_pretty(&view) {
                    Ok(body) => println!("{body}"),
                    Err(err) => println!("error: {err}"),
                },
                Err(err) => println!("error: {err}"),
            },
            "skip" => {
                let Some(host) = host_id(&table) else {
                    continue;
                };
                match table.registry.skip_czar(VENUE, host) {
                    Ok(reply) => table.report(&reply),
                    Err(err) => println!("error: {err}"),
                }
            }
            "remove" => {
                let Some(target) = require_name(&table, &args) else {
                    continue;
                };
                let Some(host) = host_id(&table) else {
                    continue;
                };
                match table.registry.remove_player(VENUE, host, target) {
                    Ok(reply) => table.report(&reply),
                    Err(err) => println!("error: {err}"),
                }
            }
            "leave" => {
                let Some(player) = require_name(&table, &args) else {
                    continue;
                };
                match table.registry.leave(VENUE, player) {
                    Ok(reply) => table.report(&reply),
                    Err(err) => println!("error: {err}"),
                }
            }
            "end" => {
                let Some(host) = host_id(&table) else {
                    continue;
                };
                match table.registry.end_game(VENUE, host) {
                    Ok(reply) => table.report(&reply),
                    Err(err) => println!("error: {err}"),
                }
            }
            other => println!("unknown command '{other}' (try help)"),
        }
    }
}
