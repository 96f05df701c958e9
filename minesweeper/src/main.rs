use std::{
    convert::TryFrom,
    fmt,
    io::{self, BufRead, Write},
};

use clap::{App, Arg, ArgMatches};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, SeedableRng};
use regex::Regex;
use tracing::{debug, warn, Level};

use minefield::{
    board::{Cell, ConfigViolation, Coordinate, Grid},
    game::{Game, GameConfig, GameState},
    output::{Message, Output},
};

/// Rows are labelled with a single letter, which caps the grid size.
const MAX_GRID_SIZE: usize = 26;

fn main() -> io::Result<()> {
    let matches = App::new("Minesweeper")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Simple command line minesweeper game.")
        .arg(
            Arg::with_name("size")
                .short("s")
                .long("size")
                .value_name("SIZE")
                .help("pre-specify the side length of the grid")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("mines")
                .short("m")
                .long("mines")
                .value_name("MINES")
                .help("pre-specify the number of mines to place")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("seed the mine placement for a reproducible layout")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("once")
                .long("once")
                .help("play a single round instead of asking to play again"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("log engine events to stderr, repeat for more detail"),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    let mut rng = match matches.value_of("seed") {
        Some(seed) => match seed.parse() {
            Ok(seed) => StdRng::seed_from_u64(seed),
            Err(_) => {
                println!("Invalid seed \"{}\", using a random one.", seed);
                StdRng::from_entropy()
            }
        },
        None => StdRng::from_entropy(),
    };

    let stdin = std::io::stdin();
    let mut input = InputReader::new(stdin.lock());

    println!("Welcome to Minesweeper!");
    let mut preset = Preset::from_matches(&matches);
    loop {
        let config = choose_config(&mut preset, &mut input)?;
        let grid = match config.random_grid(&mut rng) {
            Ok(grid) => grid,
            Err(err) => {
                // The config is already validated, so this only happens on a placer bug.
                warn!(%err, "could not build grid");
                println!("Could not build the minefield: {}", err);
                return Ok(());
            }
        };
        play_round(grid, &mut input)?;

        if matches.is_present("once") {
            break;
        }
        input.read_input("Press enter to play again...", |_| Some(()))?;
    }
    Ok(())
}

/// Send engine logs to stderr so they don't interleave with the board on stdout.
fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();
}

/// Grid settings given on the command line. Only used for the first round; later
/// rounds prompt again.
struct Preset {
    size: Option<i64>,
    mines: Option<i64>,
}

impl Preset {
    fn from_matches(matches: &ArgMatches) -> Self {
        let parse = |name: &str| {
            matches.value_of(name).and_then(|raw| match raw.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    println!("Ignoring invalid --{} \"{}\".", name, raw);
                    None
                }
            })
        };
        Self {
            size: parse("size"),
            mines: parse("mines"),
        }
    }
}

/// Work out the grid size and mine count for the next round, prompting for anything
/// not given on the command line.
fn choose_config<B: BufRead>(
    preset: &mut Preset,
    input: &mut InputReader<B>,
) -> io::Result<GameConfig> {
    loop {
        let size = match preset.size.take().and_then(check_size) {
            Some(size) => size,
            None => input.read_input(
                "Enter the size of the grid (e.g. 4 for a 4x4 grid):",
                |input| match input.parse::<i64>() {
                    Ok(size) => check_size(size),
                    Err(_) => {
                        println!("Please enter a whole number.");
                        None
                    }
                },
            )?,
        };
        let max = GameConfig::max_mines(size).unwrap_or(0);
        let mines = match preset.mines.take() {
            Some(mines) => mines,
            None => input.read_input(
                &format!(
                    "Enter the number of mines to place on the grid (maximum is {}):",
                    max
                ),
                |input| match input.parse::<i64>() {
                    Ok(mines) => Some(mines),
                    Err(_) => {
                        println!("Please enter a whole number.");
                        None
                    }
                },
            )?,
        };

        match GameConfig::try_from((size as i64, mines)) {
            Ok(config) => {
                debug!(size = config.size(), mines = config.mines(), "configured round");
                return Ok(config);
            }
            Err(err) => println!("Invalid setup: {}.", err.reason()),
        }
    }
}

/// Accept a grid size between 1 and [`MAX_GRID_SIZE`], telling the player why
/// anything else is rejected.
fn check_size(size: i64) -> Option<usize> {
    match usize::try_from(size) {
        Ok(size) if size > MAX_GRID_SIZE => {
            println!("The grid can be at most {0}x{0}.", MAX_GRID_SIZE);
            None
        }
        Ok(size) if size > 0 => Some(size),
        _ => {
            println!("Invalid setup: {}.", ConfigViolation::ZeroSize);
            None
        }
    }
}

/// Play one round on the given grid until it is won or lost.
fn play_round<B: BufRead>(grid: Grid, input: &mut InputReader<B>) -> io::Result<()> {
    let size = grid.size();
    let mut game = Game::new(grid, ConsoleOutput);

    println!();
    println!("Here is your minefield:");
    game.show_grid();

    while !game.is_finished() {
        let coord = read_cell(size, input)?;
        game.reveal(coord);
        match game.state() {
            GameState::Playing => {
                println!("Here is your updated minefield:");
                game.show_grid();
            }
            GameState::Lost => {
                println!();
                show_grid(game.grid(), true);
            }
            GameState::Won => {
                println!();
                game.show_grid();
            }
        }
    }
    Ok(())
}

/// Prompt for a cell in `A1` notation: a row letter followed by a 1-based column.
fn read_cell<B: BufRead>(size: usize, input: &mut InputReader<B>) -> io::Result<Coordinate> {
    /// Matcher for a row letter and column number.
    static CELL: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?P<row>[a-z])\s*(?P<col>[0-9]+)$").unwrap());

    input.read_input_lower("Select a square to reveal (e.g. A1):", |input| {
        let parsed = CELL.captures(input).and_then(|captures| {
            let row = captures["row"].as_bytes()[0] - b'a';
            let col = captures["col"].parse::<usize>().ok()?.checked_sub(1)?;
            Some(Coordinate::new(row as usize, col))
        });
        match parsed {
            Some(coord) if coord.row < size && coord.col < size => Some(coord),
            _ => {
                println!("Invalid input. Please enter a valid square.");
                None
            }
        }
    })
}

/// [`Output`] that writes to the terminal.
struct ConsoleOutput;

impl Output for ConsoleOutput {
    fn display_message(&mut self, message: &Message) {
        println!("{}", message);
    }

    fn display_grid(&mut self, grid: &Grid) {
        show_grid(grid, false);
    }
}

/// Print out the grid. Hidden cells are blank unless `reveal_mines` is set, in which
/// case mines are shown wherever they are.
fn show_grid(grid: &Grid, reveal_mines: bool) {
    enum ConsoleCell {
        Hidden,
        Mine,
        Count(u8),
    }
    impl fmt::Display for ConsoleCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                ConsoleCell::Hidden => f.pad("_"),
                ConsoleCell::Mine => f.pad("X"),
                ConsoleCell::Count(count) => fmt::Display::fmt(count, f),
            }
        }
    }
    let to_console = |cell: &Cell| match cell {
        c if c.is_mine() && (c.is_revealed() || reveal_mines) => ConsoleCell::Mine,
        c if !c.is_revealed() => ConsoleCell::Hidden,
        c => ConsoleCell::Count(c.adjacent_mines()),
    };
    show_board(grid.size(), grid.iter_rows().map(|row| row.map(to_console)));
}

/// Show the board by printing the grid. Takes an iterator over the rows of iterators over
/// the items. Columns are numbered from 1 and rows are lettered from `A`.
fn show_board(size: usize, rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>) {
    print!("  ");
    for i in 1..=size {
        print!("{:>3}", i);
    }
    println!();
    for (i, row) in rows.enumerate() {
        print!("{} ", RowLabel(i));
        for cell in row {
            print!("{:>3}", cell);
        }
        println!();
    }
    println!();
}

/// Display helper that prints the letter of a row.
struct RowLabel(usize);

impl fmt::Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match u8::try_from(self.0) {
            Ok(offset) if self.0 < MAX_GRID_SIZE => {
                fmt::Display::fmt(&char::from(b'A' + offset), f)
            }
            _ => f.pad("?"),
        }
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Repeatedly tries to read input until the input checker returns `Some`.
    fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}
