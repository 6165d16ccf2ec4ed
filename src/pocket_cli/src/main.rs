use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use log::{LevelFilter, info};
use owo_colors::OwoColorize;
use pocket_cube::{
    BfsSolver, Color, MoveSequence, MoveSet, PuzzleState,
    render::{render, render_with},
    scramble::random_scramble,
    validate,
};

/// Finds shortest solutions for the 2x2 pocket cube
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log verbosity. Can be given up to three times.
    #[arg(short, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Print sticker letters instead of colored squares
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scramble a solved cube with the given moves and solve it
    Solve {
        /// Moves such as "F U' R2" or the compact form "FuRR"
        #[arg(required_unless_present = "raw", conflicts_with = "raw")]
        moves: Option<String>,
        /// A packed state in hexadecimal, four bits per sticker
        #[arg(long)]
        raw: Option<String>,
        /// Only search with L, F and U turns
        #[arg(long)]
        reduced: bool,
        /// Give up after this many moves
        #[arg(long)]
        max_depth: Option<usize>,
        /// Give up after this many seconds
        #[arg(long)]
        time_limit: Option<u64>,
    },
    /// Print a random scramble
    Scramble {
        /// Number of moves
        #[arg(short, default_value_t = 12)]
        n: usize,
        /// Seed for a reproducible scramble
        #[arg(long)]
        seed: Option<u64>,
        /// Only scramble with L, F and U turns
        #[arg(long)]
        reduced: bool,
    },
    /// Print the cube after applying the given moves
    Show {
        /// Moves such as "F U' R2" or the compact form "FuRR"
        moves: String,
    },
}

fn move_set(reduced: bool) -> MoveSet {
    if reduced {
        MoveSet::Reduced
    } else {
        MoveSet::Full
    }
}

fn parse_state(moves: &str) -> color_eyre::Result<PuzzleState> {
    let sequence: MoveSequence = moves
        .parse()
        .wrap_err_with(|| format!("Could not parse the moves {moves:?}"))?;
    Ok(sequence.apply_to(PuzzleState::SOLVED))
}

fn parse_raw(raw: &str) -> color_eyre::Result<PuzzleState> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw).replace('_', "");
    let value = u128::from_str_radix(&digits, 16)
        .wrap_err_with(|| format!("{raw:?} is not a hexadecimal number"))?;
    Ok(PuzzleState::try_from_raw(value)?)
}

fn colored_sticker(color: Color) -> String {
    let square = "■";
    match color {
        Color::Orange => square.truecolor(255, 140, 0).to_string(),
        Color::Green => square.green().to_string(),
        Color::Red => square.red().to_string(),
        Color::Yellow => square.yellow().to_string(),
        Color::White => square.white().to_string(),
        Color::Blue => square.blue().to_string(),
    }
}

fn print_state(state: PuzzleState, no_color: bool) {
    if no_color {
        println!("{}", render(state));
    } else {
        println!("{}", render_with(state, colored_sticker));
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    pretty_env_logger::formatted_builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    match args.command {
        Commands::Solve {
            moves,
            raw,
            reduced,
            max_depth,
            time_limit,
        } => {
            let state = match (moves, raw) {
                (_, Some(raw)) => parse_raw(&raw)?,
                (Some(moves), None) => parse_state(&moves)?,
                (None, None) => PuzzleState::SOLVED,
            };
            validate::verify(state)?;
            print_state(state, args.no_color);

            let mut solver = BfsSolver::new(state).with_move_set(move_set(reduced));
            if let Some(max_depth) = max_depth {
                solver = solver.with_max_depth(max_depth);
            }
            if let Some(seconds) = time_limit {
                solver = solver.with_time_limit(Duration::from_secs(seconds));
            }
            let solution = solver.solve().wrap_err("Could not solve the cube")?;
            info!("Visited {} states", solver.visited_len());
            if solution.is_empty() {
                println!("Already solved");
            } else {
                println!("Solution ({} moves): {solution}", solution.len());
            }
        }
        Commands::Scramble { n, seed, reduced } => {
            let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
            let scramble = random_scramble(n, move_set(reduced), &mut rng);
            println!("{scramble}");
            print_state(scramble.apply_to(PuzzleState::SOLVED), args.no_color);
        }
        Commands::Show { moves } => {
            print_state(parse_state(&moves)?, args.no_color);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_raw_accepts_one_prefix() {
        let solved = PuzzleState::SOLVED;
        assert_eq!(
            parse_raw("0x5555_4444_3333_2222_1111_0000").unwrap(),
            solved
        );
        assert_eq!(parse_raw("555544443333222211110000").unwrap(), solved);
        assert!(parse_raw("0x0x555544443333222211110000").is_err());
    }

    #[test]
    fn parse_state_applies_half_turns() {
        assert_eq!(
            parse_state("F2'").unwrap(),
            parse_state("F F").unwrap()
        );
        assert_ne!(parse_state("F2'").unwrap(), PuzzleState::SOLVED);
    }

    #[test]
    fn cli_arguments_are_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
