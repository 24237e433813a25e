mod input;

use std::fs;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use inflecta_align::{Aligner, RunScoring, Scoring};
use inflecta_codec::{apply, encode_markup, Codec, Direction};
use inflecta_suffix::{train, Analyzer, SuffixConfig, SuffixTable};

use crate::input::{InputFormat, RecordParser};

#[derive(Parser)]
#[command(author, version, about = "Edit-script codec and suffix lemmatizer")]
struct Cli {
    /// More output per occurrence (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the edit script turning LEMMA into FORM
    Script(ScriptArgs),
    /// Encode a merged diff such as "s`i'<a>ng"
    Encode {
        markup: String,
        /// Encode the form-to-lemma direction
        #[arg(long)]
        inverse: bool,
    },
    /// Apply an edit script to LEMMA
    Apply { lemma: String, script: String },
    /// Train a suffix table from an annotated corpus
    Train(TrainArgs),
    /// Lemmatize words with a trained table
    Analyze(AnalyzeArgs),
    /// Compile a JSON table to a binary image for the browser engine
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ScoringKind {
    /// Unit score per matching character
    #[default]
    Levenshtein,
    /// Favors long runs of matches, tuned for Czech
    Runs,
}

#[derive(Args)]
struct ScriptArgs {
    lemma: String,
    form: String,

    /// Print the script turning FORM back into LEMMA
    #[arg(long)]
    inverse: bool,

    /// Also print the score matrix, alignment and merged diff
    #[arg(long)]
    details: bool,

    #[arg(long)]
    ignore_case: bool,

    #[arg(long, value_enum, default_value_t)]
    scoring: ScoringKind,
}

/// Values given on the command line win over the config file.
#[derive(Args)]
struct TableOptions {
    /// TOML file with max_suf, lowercase, threshold and max_len
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(short, long)]
    max_suf: Option<usize>,

    #[arg(short, long)]
    lowercase: bool,
}

impl TableOptions {
    fn resolve(&self) -> Result<SuffixConfig> {
        let mut config = match &self.config {
            Some(path) => SuffixConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SuffixConfig::default(),
        };
        if let Some(max_suf) = self.max_suf {
            config.max_suf = max_suf;
        }
        config.lowercase |= self.lowercase;
        Ok(config)
    }
}

#[derive(Args)]
struct TrainArgs {
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    #[arg(short, long, value_enum, default_value_t)]
    format: InputFormat,

    /// Prune rules seen at most this many times
    #[arg(short, long)]
    threshold: Option<u32>,

    #[command(flatten)]
    options: TableOptions,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// JSON table, or a compiled `.bin` image
    #[arg(short, long, value_name = "FILE")]
    table: PathBuf,

    /// Words to analyze; read from stdin when absent
    words: Vec<String>,

    /// Print one JSON array per word
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    options: TableOptions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Script(args) => match args.scoring {
            ScoringKind::Levenshtein => print_script(Aligner::default(), &args),
            ScoringKind::Runs => print_script(Aligner::new(RunScoring), &args),
        },
        Command::Encode { markup, inverse } => {
            let script = encode_markup(&markup, direction(inverse))?;
            println!("{}", script.label());
            Ok(())
        }
        Command::Apply { lemma, script } => {
            println!("{}", apply(&lemma, &script)?);
            Ok(())
        }
        Command::Train(args) => run_train(&args),
        Command::Analyze(args) => run_analyze(&args),
        Command::Compile { input, output } => {
            let table = load_table(&input)?;
            let bytes = table.to_bytes()?;
            fs::write(&output, &bytes).with_context(|| format!("writing {}", output.display()))?;
            log::info!("wrote {} bytes to {}", bytes.len(), output.display());
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn direction(inverse: bool) -> Direction {
    if inverse {
        Direction::Inverse
    } else {
        Direction::Forward
    }
}

fn print_script<S: Scoring>(aligner: Aligner<S>, args: &ScriptArgs) -> Result<()> {
    let codec = Codec::new(aligner).ignore_case(args.ignore_case);
    let (source, target) = if args.inverse {
        (&args.form, &args.lemma)
    } else {
        (&args.lemma, &args.form)
    };

    if args.details {
        let (s, t) = if args.ignore_case {
            (source.to_lowercase(), target.to_lowercase())
        } else {
            (source.clone(), target.clone())
        };
        let s_chars: Vec<char> = s.chars().collect();
        let t_chars: Vec<char> = t.chars().collect();
        let matrix = codec.aligner().matrix(&s_chars, &t_chars)?;
        let ops = codec.aligner().align(&s, &t)?;
        println!("{}", matrix);
        println!("similarity: {}", matrix.final_score());
        println!(
            "alignment: {}",
            ops.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
        );
        println!("diff: {}", codec.diff(source, target)?);
    }

    let script = codec.script(source, target, direction(args.inverse))?;
    println!("{}", script.label());
    Ok(())
}

fn run_train(args: &TrainArgs) -> Result<()> {
    let mut config = args.options.resolve()?;
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }

    let file = fs::File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    let records = RecordParser::new(args.format)?.read_records(io::BufReader::new(file))?;
    log::info!("read {} records from {}", records.len(), args.input.display());

    let table = train(&records, &config)?;
    table
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!("table with {} rules written to {}", table.rule_count(), args.output.display());
    Ok(())
}

fn load_table(path: &Path) -> Result<SuffixTable> {
    let table = if path.extension().map_or(false, |ext| ext == "bin") {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        SuffixTable::from_bytes(&bytes)
    } else {
        SuffixTable::load(path)
    };
    table.with_context(|| format!("loading table {}", path.display()))
}

fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let analyzer = Analyzer::new(load_table(&args.table)?, &args.options.resolve()?);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if args.words.is_empty() {
        for line in io::stdin().lock().lines() {
            for word in line?.split_whitespace() {
                write_analyses(&mut out, &analyzer, word, args.json)?;
            }
        }
    } else {
        for word in &args.words {
            write_analyses(&mut out, &analyzer, word, args.json)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_analyses<W: Write>(out: &mut W, analyzer: &Analyzer, word: &str, json: bool) -> Result<()> {
    let analyses = analyzer.analyze(word);
    if json {
        serde_json::to_writer(&mut *out, &analyses)?;
        writeln!(out)?;
    } else {
        for analysis in &analyses {
            writeln!(out, "{}", analysis)?;
        }
    }
    Ok(())
}
