use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use deckbound_core::{
    parse_cards, resolve, ActiveJoker, Card, DealerKind, DebuffKind, Event, EventBus, GameConfig,
    HandKind, HandResolution, Inventory, Phase, RoundOutcome, RunError, RunState, ScoreStep,
    ScoreTable, SortKey,
};
use deckbound_data::load_or_standard;
use log::error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Highest level accepted by `--level` overrides.
const MAX_LEVEL_OVERRIDE: u32 = 1_000;

#[derive(Debug, Parser)]
#[clap(name = "deckbound", about = "Poker-hand scoring rules engine")]
struct Cli {
    /// Directory holding hands.json, targets.json and dealers.json.
    #[clap(long, global = true)]
    assets: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify and score one played hand.
    Classify {
        /// Cards such as `KH KD KS QH QD`.
        #[clap(required = true)]
        cards: Vec<String>,
        /// Owned joker id, in acquisition order. Repeatable.
        #[clap(long = "joker")]
        jokers: Vec<String>,
        /// Active debuff: `halve_score` or `play_exactly[:N]`.
        #[clap(long)]
        debuff: Option<String>,
        /// Hand level override, e.g. `full_house=3`. Repeatable.
        #[clap(long = "level")]
        levels: Vec<String>,
        /// Add contributing card points to the hand score.
        #[clap(long)]
        card_points: bool,
        /// Print the resolution as JSON.
        #[clap(long)]
        json: bool,
    },
    /// Play interactive rounds on stdin.
    Play {
        #[clap(long)]
        seed: Option<u64>,
        /// Starting level.
        #[clap(long, default_value_t = 0)]
        level: u8,
        /// default, small_boss or big_boss.
        #[clap(long, default_value = "default")]
        dealer: String,
    },
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run_cli(cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_or_standard(cli.assets.as_deref())?;
    match cli.command {
        Command::Classify {
            cards,
            jokers,
            debuff,
            levels,
            card_points,
            json,
        } => {
            config.round.add_card_points |= card_points;
            let request = ClassifyRequest {
                cards: cards.join(" "),
                jokers,
                debuff,
                levels,
                json,
            };
            classify_command(&config, &request)
        }
        Command::Play {
            seed,
            level,
            dealer,
        } => {
            let dealer: DealerKind = dealer.parse().map_err(|e: String| anyhow!(e))?;
            let seed = seed.unwrap_or_else(clock_seed);
            play_command(config, seed, level, dealer)
        }
    }
}

struct ClassifyRequest {
    cards: String,
    jokers: Vec<String>,
    debuff: Option<String>,
    levels: Vec<String>,
    json: bool,
}

fn classify_command(config: &GameConfig, request: &ClassifyRequest) -> anyhow::Result<()> {
    let cards = &request.cards;
    let played = parse_cards(cards).with_context(|| format!("parse cards `{cards}`"))?;
    if played.is_empty() {
        bail!("no cards played");
    }
    if played.len() > config.round.max_play {
        bail!("at most {} cards can be played", config.round.max_play);
    }
    let mut table = ScoreTable::from_rules(&config.hands)?;
    for spec in &request.levels {
        let (kind, level) = parse_level(spec)?;
        while table.level(kind) < level {
            table.upgrade(kind);
        }
    }
    let debuff = request.debuff.as_deref().map(parse_debuff).transpose()?;

    let mut inventory = Inventory::with_slots(request.jokers.len());
    for id in &request.jokers {
        inventory.add_joker(config.joker_def(id)?)?;
    }
    let mut jokers = Vec::with_capacity(inventory.jokers.len());
    for joker in &inventory.jokers {
        jokers.push(ActiveJoker {
            id: joker.id,
            def: config.joker_def(&joker.def_id)?,
        });
    }

    match resolve(&played, &table, debuff, &jokers, &config.round) {
        Ok(resolution) if request.json => {
            let text = serde_json::to_string_pretty(&resolution).context("encode resolution")?;
            println!("{text}");
        }
        Ok(resolution) => print_resolution(config, &resolution),
        Err(rejected) => println!("{rejected}; score stays 0 x 0"),
    }
    Ok(())
}

fn play_command(config: GameConfig, seed: u64, level: u8, dealer: DealerKind) -> anyhow::Result<()> {
    let mut run = RunState::new(config, seed)?;
    let mut events = EventBus::default();
    let mut level = level;
    let mut dealer = dealer;
    println!("seed {seed}");
    run.start_round(level, dealer, &mut events)?;
    print_events(&mut events);
    print_hand(&run);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", prompt_text(&run));
        io::stdout().flush().context("flush stdout")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read stdin")?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            continue;
        };
        let result = match command {
            "q" | "quit" | "exit" => break,
            "?" | "help" => {
                print_help();
                Ok(())
            }
            "h" | "hand" => {
                print_hand(&run);
                Ok(())
            }
            "j" | "jokers" => {
                print_jokers(&run);
                Ok(())
            }
            "levels" => {
                print_levels(&run);
                Ok(())
            }
            "p" | "play" => parse_indices(args).and_then(|indices| {
                let resolution = run.play_hand(&indices, &mut events)?;
                print_resolution(&run.config, &resolution);
                Ok(())
            }),
            "d" | "discard" => parse_indices(args).and_then(|indices| {
                run.discard(&indices, &mut events)?;
                Ok(())
            }),
            "preview" => parse_indices(args).and_then(|indices| {
                let preview = run.preview(&indices)?;
                match preview.kind {
                    Some(kind) => println!(
                        "{}: {} x {} (level {})",
                        run.config.hand_name(kind),
                        preview.base.hand_score,
                        preview.base.multiplier,
                        run.table.level(kind)
                    ),
                    None => println!("nothing selected"),
                }
                Ok(())
            }),
            "sort" => args
                .first()
                .ok_or_else(|| anyhow!("usage: sort rank|suit"))
                .and_then(|key| key.parse::<SortKey>().map_err(|e| anyhow!(e)))
                .map(|key| {
                    run.sort_hand(key);
                    print_hand(&run);
                }),
            "buy" => args
                .first()
                .ok_or_else(|| anyhow!("usage: buy <joker id>"))
                .and_then(|id| Ok(run.buy_joker(id, &mut events)?))
                .map(|_| ()),
            "sell" => parse_index(args.first()).and_then(|idx| {
                run.sell_joker(idx, &mut events)?;
                Ok(())
            }),
            "move" => parse_index(args.first()).and_then(|from| {
                let to = parse_index(args.get(1))?;
                run.move_joker(from, to)?;
                print_jokers(&run);
                Ok(())
            }),
            "upgrade" => args
                .first()
                .ok_or_else(|| anyhow!("usage: upgrade <hand>"))
                .and_then(|name| name.parse::<HandKind>().map_err(|e| anyhow!(e)))
                .and_then(|kind| Ok(run.buy_hand_upgrade(kind, &mut events)?))
                .map(|_| ()),
            "n" | "next" => next_round(&mut run, &mut level, &mut dealer, &mut events),
            other => Err(anyhow!("unknown command `{other}`, try `help`")),
        };
        if let Err(e) = result {
            println!("error: {e}");
        }
        print_events(&mut events);
        if matches!(command, "p" | "play" | "d" | "discard" | "n" | "next")
            && run.state.phase == Phase::AwaitingPlay
        {
            print_hand(&run);
        }
    }
    Ok(())
}

/// Moves through default, small boss and big boss, then to the next level.
fn next_round(
    run: &mut RunState,
    level: &mut u8,
    dealer: &mut DealerKind,
    events: &mut EventBus,
) -> anyhow::Result<()> {
    let (next_level, next_dealer) = match run.outcome() {
        Some(RoundOutcome::Won) => match *dealer {
            DealerKind::Default => (*level, DealerKind::SmallBoss),
            DealerKind::SmallBoss => (*level, DealerKind::BigBoss),
            DealerKind::BigBoss => (level.saturating_add(1), DealerKind::Default),
        },
        Some(RoundOutcome::Lost) => (*level, *dealer),
        None => return Err(RunError::InvalidPhase(run.state.phase).into()),
    };
    run.start_round(next_level, next_dealer, events)?;
    *level = next_level;
    *dealer = next_dealer;
    Ok(())
}

fn prompt_text(run: &RunState) -> String {
    if run.state.phase.is_over() {
        return format!("[round over | ${}] next or quit > ", run.state.balance);
    }
    format!(
        "[lvl {} | {}/{} | hands {} | discards {} | ${}] > ",
        run.state.level,
        run.state.score,
        run.state.target,
        run.state.hands_left,
        run.state.discards_left,
        run.state.balance
    )
}

fn print_help() {
    println!("commands:");
    println!("  play i j ..     play the selected cards");
    println!("  discard i j ..  discard the selected cards");
    println!("  preview i j ..  show category and base values");
    println!("  sort rank|suit  reorder the hand");
    println!("  hand | jokers | levels");
    println!("  buy <id> | sell <i> | move <from> <to> | upgrade <hand>");
    println!("  next            start the next round once this one is over");
    println!("  quit");
}

fn print_hand(run: &RunState) {
    let cards: Vec<String> = run
        .hand
        .iter()
        .enumerate()
        .map(|(idx, card)| format!("{idx}:{card}"))
        .collect();
    println!("hand: {}", cards.join("  "));
    if let Some(debuff) = run.active_debuff() {
        println!("debuff: {debuff}");
    }
}

fn print_jokers(run: &RunState) {
    if run.inventory.jokers.is_empty() {
        println!("no jokers ({} slots)", run.inventory.joker_slots);
    }
    for (idx, joker) in run.inventory.jokers.iter().enumerate() {
        let text = run
            .config
            .joker_def(&joker.def_id)
            .map(|def| format!("{} ({})", def.name, def.ability_text(1)))
            .unwrap_or_else(|_| joker.def_id.clone());
        println!("  {idx}: #{} {text}, sells for {}", joker.id, joker.sell_value);
    }
    let shop: Vec<String> = run
        .config
        .jokers
        .iter()
        .map(|def| format!("{} ${}", def.id, def.price))
        .collect();
    println!("for sale: {}", shop.join(", "));
}

fn print_levels(run: &RunState) {
    for kind in HandKind::ALL.iter().rev() {
        let (score, mult) = run.table.effective_base(*kind);
        println!(
            "  {:<16} lvl {:>2}  {score} x {mult}",
            run.config.hand_name(*kind),
            run.table.level(*kind)
        );
    }
}

fn print_resolution(config: &GameConfig, resolution: &HandResolution) {
    let kind = resolution
        .kind
        .map_or("nothing", |kind| config.hand_name(kind));
    println!("{kind}: {}", format_cards(&resolution.cards));
    for step in &resolution.steps {
        print_step(step);
    }
    println!(
        "= {} x {} = {}",
        resolution.score.hand_score, resolution.score.multiplier, resolution.total
    );
}

fn print_step(step: &ScoreStep) {
    println!(
        "  {:<28} {:<14} {} x {}",
        step.source.to_string(),
        step.effect.to_string(),
        step.after.hand_score,
        step.after.multiplier
    );
}

fn print_events(events: &mut EventBus) {
    for event in events.drain() {
        match event {
            Event::RoundStarted {
                level,
                dealer,
                target,
                debuff,
                ..
            } => {
                println!("level {level} vs {}: beat {target}", dealer.id());
                if let Some(debuff) = debuff {
                    println!("dealer debuff: {debuff}");
                }
            }
            Event::PlayRejected { debuff, cards } => {
                println!("{debuff}: {cards} cards played, try again");
            }
            Event::CardsDiscarded { count, discards_left } => {
                println!("discarded {count}, {discards_left} discards left");
            }
            Event::RoundWon {
                score,
                reward,
                balance,
            } => println!("round won with {score}! +${reward}, balance ${balance}"),
            Event::RoundLost { score, target } => {
                println!("round lost: {score} of {target}")
            }
            Event::JokerBought { def_id, balance, .. } => {
                println!("bought {def_id}, balance ${balance}")
            }
            Event::JokerSold {
                def_id,
                sell_value,
                balance,
                ..
            } => println!("sold {def_id} for ${sell_value}, balance ${balance}"),
            Event::HandUpgraded { hand, level } => println!("{hand} is now level {level}"),
            Event::PhaseChanged { .. } | Event::HandDealt { .. } | Event::HandScored { .. } => {}
        }
    }
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_indices(args: &[&str]) -> anyhow::Result<Vec<usize>> {
    if args.is_empty() {
        bail!("missing indices");
    }
    let mut indices = Vec::new();
    for arg in args {
        for part in arg.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            indices.push(
                part.parse::<usize>()
                    .with_context(|| format!("invalid index `{part}`"))?,
            );
        }
    }
    Ok(indices)
}

fn parse_index(arg: Option<&&str>) -> anyhow::Result<usize> {
    let arg = arg.ok_or_else(|| anyhow!("missing index"))?;
    arg.parse::<usize>()
        .with_context(|| format!("invalid index `{arg}`"))
}

fn parse_level(spec: &str) -> anyhow::Result<(HandKind, u32)> {
    let (name, level) = spec
        .split_once('=')
        .ok_or_else(|| anyhow!("expected HAND=LEVEL, got `{spec}`"))?;
    let kind = name.parse::<HandKind>().map_err(|e| anyhow!(e))?;
    let level = level
        .trim()
        .parse::<u32>()
        .with_context(|| format!("invalid level in `{spec}`"))?;
    if level == 0 {
        bail!("levels start at 1");
    }
    if level > MAX_LEVEL_OVERRIDE {
        bail!("level {level} is above the maximum of {MAX_LEVEL_OVERRIDE}");
    }
    Ok((kind, level))
}

fn parse_debuff(value: &str) -> anyhow::Result<DebuffKind> {
    let norm = value.trim().to_lowercase().replace('-', "_");
    let (name, arg) = match norm.split_once(':') {
        Some((name, arg)) => (name.to_string(), Some(arg.to_string())),
        None => (norm.clone(), None),
    };
    match (name.as_str(), arg) {
        ("halve_score", None) => Ok(DebuffKind::HalveScore),
        ("play_exactly" | "play_five", None) => Ok(DebuffKind::PlayExactly(5)),
        ("play_exactly", Some(count)) => Ok(DebuffKind::PlayExactly(
            count
                .parse()
                .with_context(|| format!("invalid card count in `{value}`"))?,
        )),
        _ => bail!("unknown debuff `{value}`"),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_debuff_names() {
        assert_eq!(parse_debuff("halve_score").unwrap(), DebuffKind::HalveScore);
        assert_eq!(
            parse_debuff("play-exactly").unwrap(),
            DebuffKind::PlayExactly(5)
        );
        assert_eq!(
            parse_debuff("play_exactly:3").unwrap(),
            DebuffKind::PlayExactly(3)
        );
        assert!(parse_debuff("halve_score:2").is_err());
    }

    #[test]
    fn parses_levels_and_indices() {
        assert_eq!(
            parse_level("full_house=3").unwrap(),
            (HandKind::FullHouse, 3)
        );
        assert!(parse_level("full house").is_err());
        assert!(parse_level("full_house=0").is_err());
        assert!(parse_level("full_house=1000").is_ok());
        assert!(parse_level("full_house=4000000000").is_err());
        assert_eq!(parse_indices(&["0,2", "4"]).unwrap(), vec![0, 2, 4]);
        assert!(parse_indices(&[]).is_err());
    }

    fn request(cards: &str, jokers: &[&str]) -> ClassifyRequest {
        ClassifyRequest {
            cards: cards.to_string(),
            jokers: jokers.iter().map(|id| id.to_string()).collect(),
            debuff: None,
            levels: Vec::new(),
            json: false,
        }
    }

    #[test]
    fn classify_command_accepts_jokers() {
        let config = GameConfig::standard();
        let ok = request("KH KD KS QH QD", &["multiplier_joker", "moon_joker"]);
        assert!(classify_command(&config, &ok).is_ok());
        assert!(classify_command(&config, &request("KH KD", &["nope"])).is_err());
        assert!(classify_command(&config, &request("KH KD 2C 3C 4C 5C", &[])).is_err());
    }

    #[test]
    fn classify_command_refuses_an_empty_play() {
        let config = GameConfig::standard();
        assert!(classify_command(&config, &request("", &["multiplier_joker"])).is_err());
        assert!(classify_command(&config, &request(" , ", &[])).is_err());
    }
}
