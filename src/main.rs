use std::path::PathBuf;
use std::process::exit;
use std::time::Instant;

use log::{error, info};
use structopt::StructOpt;

use tile_words::log::init_logger;
use tile_words::{FileFormat, LetterBudget, SearchConfig, TrieError, Wordlist};

/// Look up words, match patterns and find plays in a word list.
#[derive(StructOpt)]
struct Cli {
    /// The dictionary to load
    #[structopt(parse(from_os_str))]
    path: PathBuf,
    /// Word separator in the dictionary
    #[structopt(short, long, default_value = ",")]
    delimiter: char,
    /// Print results as JSON
    #[structopt(long)]
    json: bool,
    /// Log at debug level
    #[structopt(short, long)]
    verbose: bool,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
enum Command {
    /// Check whether words are in the dictionary
    Contains { words: Vec<String> },
    /// Words that can be built from a rack; `&` is a blank
    Form { letters: String },
    /// Words matching a pattern of letters, `&` (one), `*` (any run) and `%` (zero or one)
    Match { pattern: String },
    /// Words that fit a row pattern using letters from a rack
    Find {
        pattern: String,
        letters: String,
        /// Most rack letters to use
        #[structopt(short, long)]
        limit: Option<usize>,
        #[structopt(short, long)]
        max_results: Option<usize>,
    },
    /// Size of the dictionary
    Stats,
    /// Write the dictionary, one word per line
    Export { out: PathBuf },
}

fn print_words(words: &[String], json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(words)?);
    } else {
        words.iter().for_each(|w| println!("{}", w));
    }
    Ok(())
}

fn run(args: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let format = FileFormat::builder().delimiter(args.delimiter).build();
    let (wl, _) = Wordlist::from_file(&args.path, &format)?;

    let start = Instant::now();
    match args.command {
        Command::Contains { words } => {
            for word in words {
                println!("{} {}", word, wl.contains(&word));
            }
        }
        Command::Form { letters } => print_words(&wl.words_from_letters(&letters)?, args.json)?,
        Command::Match { pattern } => print_words(&wl.match_pattern(&pattern)?, args.json)?,
        Command::Find { pattern, letters, limit, max_results } => {
            let mut rack = LetterBudget::from(letters.as_str());
            let config = SearchConfig { limit, max_results };
            let results = wl.find_positional_with(&pattern, &config, &mut rack)?;
            if args.json {
                println!("{}", serde_json::to_string(&results)?);
            } else {
                results.iter().for_each(|x| println!("{} {} {}", x.start, x.word, x.score));
            }
        }
        Command::Stats => {
            println!("words: {}\nnodes: {}\ndepth: {}", wl.word_count(), wl.size(), wl.depth());
        }
        Command::Export { out } => wl.save(out)?,
    }
    info!("done in {:.3}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn main() {
    let args = Cli::from_args();
    init_logger(args.verbose);

    if let Err(e) = run(args) {
        match e.downcast_ref::<TrieError>() {
            Some(TrieError::InvalidCharacter { .. }) => error!("invalid input: {}", e),
            _ => error!("{}", e),
        }
        exit(1);
    }
}
