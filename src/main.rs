use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use tagenc::action::{Action, Item, Menu, Operation, register};
use tagenc::convert::Conversion;
use tagenc::dialog::EncodingDialog;
use tagenc::encoding::{ENCODING_LABELS, recode, resolve_label};
use tagenc::error::UNSUPPORTED_TITLE;
use tagenc::metadata::{CLUSTER_FIELDS, Cluster, FILE_FIELDS, File, Metadata};

#[derive(Parser)]
#[command(
    name = "tagenc",
    about = "Fix ID3v1 title/artist/album text decoded with the wrong encoding",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Suppress progress messages
    #[arg(short = 'q', long = "quiet", global = true)]
    quiet: bool,

    /// Log debug output (RUST_LOG overrides)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the built-in encoding labels and the codec each resolves to
    Encodings,

    /// Resolve labels such as "Western (ISO-8859-1)" to codec names
    Resolve {
        #[arg(required = true)]
        labels: Vec<String>,
    },

    /// Re-encode text with the source codec and decode it with the target
    Recode {
        /// Source encoding label
        #[arg(short = 's', long = "source", env = "TAGENC_SOURCE")]
        source: String,

        /// Target encoding label
        #[arg(short = 't', long = "target", env = "TAGENC_TARGET")]
        target: String,

        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Show title, artist and album as read from ID3v1 tags
    Show {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Convert (or reset) the tags of files; nothing is written to disk
    Convert {
        /// Source encoding label (prompted if missing)
        #[arg(short = 's', long = "source", env = "TAGENC_SOURCE")]
        source: Option<String>,

        /// Target encoding label (prompted if missing)
        #[arg(short = 't', long = "target", env = "TAGENC_TARGET")]
        target: Option<String>,

        /// Treat the files as one cluster
        #[arg(long = "cluster")]
        cluster: bool,

        /// Run "Reset Encoding" instead of "Convert Encoding"
        #[arg(long = "reset")]
        reset: bool,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Encodings => list_encodings(),
        Command::Resolve { labels } => {
            let mut failed = false;
            for label in &labels {
                match resolve_label(label) {
                    Some(codec) => println!("{label}\t{codec}"),
                    None => {
                        eprintln!("{label}\t{UNSUPPORTED_TITLE}");
                        failed = true;
                    }
                }
            }
            if failed {
                process::exit(1);
            }
        }
        Command::Recode {
            source,
            target,
            text,
        } => {
            let mut dialog = EncodingDialog::default();
            let conversion = match dialog.accept(&source, &target) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("{UNSUPPORTED_TITLE}: {e}");
                    process::exit(1);
                }
            };
            for t in &text {
                println!("{}", recode(t, conversion.source, conversion.target));
            }
        }
        Command::Show { files } => {
            for path in &files {
                let file = open_or_exit(path);
                print_fields(&file.path.display().to_string(), &file.metadata, &FILE_FIELDS);
            }
        }
        Command::Convert {
            source,
            target,
            cluster,
            reset,
            files,
        } => {
            let files: Vec<File> = files.iter().map(|p| open_or_exit(p)).collect();
            let mut selection = if cluster {
                vec![Item::Cluster(Cluster::from_files(files))]
            } else {
                files.into_iter().map(Item::File).collect()
            };

            let mut menu = Menu::default();
            register(&mut menu);
            let operation = if reset {
                Operation::Reset
            } else {
                Operation::Convert
            };
            let Some(action) = menu.find(operation.name(), cluster) else {
                eprintln!("no action registered for {}", operation.name());
                process::exit(1);
            };

            run_action(action, &mut selection, source, target, cli.quiet);
            for item in &selection {
                print_item(item);
            }
        }
    }
}

fn list_encodings() {
    for label in ENCODING_LABELS {
        match resolve_label(label) {
            Some(codec) => println!("{label:<36} {codec}"),
            None => println!("{label:<36} unsupported"),
        }
    }
}

fn open_or_exit(path: &Path) -> File {
    match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("file open error : {}", path.display());
            eprintln!("err: {e}");
            process::exit(1);
        }
    }
}

fn run_action(
    action: Action,
    selection: &mut [Item],
    source: Option<String>,
    target: Option<String>,
    quiet: bool,
) {
    if !quiet {
        eprintln!("{action}");
    }
    let processed = action.callback(selection, || ask_conversion(source, target));
    if !quiet {
        if action.needs_conversion() && processed == 0 {
            eprintln!("cancelled.");
        } else {
            eprintln!("done ({processed} processed).");
        }
    }
}

/// Stand-in for the encoding dialog: keeps asking until both labels resolve
/// or stdin is closed.
fn ask_conversion(source: Option<String>, target: Option<String>) -> Option<Conversion> {
    let mut dialog = EncodingDialog::default();
    let mut source = source;
    let mut target = target;

    loop {
        let source_text = match source.take() {
            Some(s) => s,
            None => prompt("Source encoding", dialog.source_text())?,
        };
        let target_text = match target.take() {
            Some(t) => t,
            None => prompt("Target encoding", dialog.target_text())?,
        };

        match dialog.accept(&source_text, &target_text) {
            Ok(conversion) => return Some(conversion),
            Err(e) => eprintln!("{UNSUPPORTED_TITLE}: {e}"),
        }
    }
}

fn prompt(label: &str, default: &str) -> Option<String> {
    eprint!("{label} [{default}]: ");
    std::io::stderr().flush().ok();

    let mut line = String::new();
    match std::io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            let line = line.trim();
            if line.is_empty() {
                Some(default.to_string())
            } else {
                Some(line.to_string())
            }
        }
    }
}

fn print_item(item: &Item) {
    match item {
        Item::File(f) => print_fields(&f.path.display().to_string(), &f.metadata, &FILE_FIELDS),
        Item::Cluster(c) => {
            print_fields("[cluster]", &c.metadata, &CLUSTER_FIELDS);
            for f in &c.files {
                print_fields(&f.path.display().to_string(), &f.metadata, &FILE_FIELDS);
            }
        }
        Item::Other(_) => {}
    }
}

fn print_fields(heading: &str, metadata: &Metadata, fields: &[&str]) {
    println!("{heading}");
    for field in fields {
        println!("  {field:<7} {}", metadata.get(field));
    }
}
