use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use yamlwalk::yaml::{self, EmitOptions, Emitter};
use yamlwalk::{
    DecodeOptions, Decoder, DuplicateKeys, EncodeOptions, Encoder, Node, NoopObserver, Observer,
    PathWalker, Style, TracingObserver, Value, json,
};

#[derive(Parser)]
#[command(name = "ywalk")]
struct Cli {
    /// Emit decode, encode and path-resolution events on stderr.
    #[arg(long, global = true)]
    trace: bool,

    /// Refuse to write scalars that are not strings.
    #[arg(long, global = true)]
    strict: bool,

    /// Let a repeated mapping key replace the earlier value instead of failing.
    #[arg(long, global = true)]
    allow_duplicate_keys: bool,

    #[arg(long, global = true, default_value_t = 2)]
    indent: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ValueKind {
    Str,
    Int,
    Float,
    Bool,
}

#[derive(Subcommand)]
enum Commands {
    Get {
        file: String,
        path: String,
        #[arg(long)]
        json: bool,
    },
    Set {
        file: String,
        path: String,
        value: String,
        #[arg(long, value_enum, default_value = "str")]
        kind: ValueKind,
    },
    Append {
        file: String,
        path: String,
        value: String,
        #[arg(long, value_enum, default_value = "str")]
        kind: ValueKind,
        #[arg(long)]
        quote_key: bool,
    },
    Delete {
        file: String,
        path: String,
    },
    Fmt {
        file: String,
        #[arg(long)]
        write: bool,
    },
    Json {
        file: String,
    },
}

struct Session<'o> {
    decode: DecodeOptions,
    encode: EncodeOptions,
    emit: EmitOptions,
    observer: &'o dyn Observer,
}

impl Session<'_> {
    fn load(&self, file: &str) -> Result<Node> {
        let source =
            fs::read_to_string(file).with_context(|| format!("Failed to read file: {}", file))?;
        let raw = yaml::parse(&source).with_context(|| format!("Failed to parse: {}", file))?;
        let node = match raw {
            Some(raw) => Decoder::new(self.decode)
                .with_observer(self.observer)
                .decode(&raw)
                .with_context(|| format!("Failed to decode: {}", file))?,
            None => Node::new(),
        };
        Ok(node)
    }

    fn render(&self, node: &Node) -> Result<String> {
        let raw = Encoder::new(self.encode)
            .with_observer(self.observer)
            .encode(node)?;
        Ok(Emitter::new(self.emit).emit(&raw))
    }

    fn save(&self, file: &str, node: &Node) -> Result<()> {
        let data = self.render(node)?;
        fs::write(file, data).with_context(|| format!("Failed to write to file: {}", file))?;
        Ok(())
    }

    fn walker(&self) -> PathWalker<'_> {
        PathWalker::with_observer(self.observer)
    }
}

fn parse_value(value: &str, kind: ValueKind) -> Result<Value> {
    let parsed = match kind {
        ValueKind::Str => Value::from(value),
        ValueKind::Int => Value::from(
            value
                .parse::<i64>()
                .with_context(|| format!("not an integer: {}", value))?,
        ),
        ValueKind::Float => Value::from(
            value
                .parse::<f64>()
                .with_context(|| format!("not a float: {}", value))?,
        ),
        ValueKind::Bool => Value::from(
            value
                .parse::<bool>()
                .with_context(|| format!("not a bool: {}", value))?,
        ),
    };
    Ok(parsed)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(std::io::stderr)
            .init();
    }

    let tracer = TracingObserver;
    let noop = NoopObserver;
    let session = Session {
        decode: DecodeOptions {
            duplicate_keys: if cli.allow_duplicate_keys {
                DuplicateKeys::LastWins
            } else {
                DuplicateKeys::Reject
            },
        },
        encode: EncodeOptions {
            strict_scalars: cli.strict,
        },
        emit: EmitOptions { indent: cli.indent },
        observer: if cli.trace {
            &tracer as &dyn Observer
        } else {
            &noop
        },
    };

    match cli.command {
        Commands::Get {
            file,
            path,
            json: as_json,
        } => {
            let root = session.load(&file)?;
            let node = session.walker().get(&root, &path)?;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&json::to_json(node))?);
            } else if let Value::Scalar(s) = node.value() {
                println!("{}", s);
            } else {
                print!("{}", session.render(node)?);
            }
        }
        Commands::Set {
            file,
            path,
            value,
            kind,
        } => {
            let mut root = session.load(&file)?;
            let new_value = parse_value(&value, kind)?;
            session.walker().set(&mut root, &path, Node::from(new_value))?;
            session.save(&file, &root)?;
            println!("Set '{}' = '{}' in {}", path, value, file);
        }
        Commands::Append {
            file,
            path,
            value,
            kind,
            quote_key,
        } => {
            let mut root = session.load(&file)?;
            let key_style = if quote_key {
                Style::DoubleQuoted
            } else {
                Style::Plain
            };
            let node = Node::from(parse_value(&value, kind)?);
            session.walker().append(&mut root, &path, node, key_style)?;
            session.save(&file, &root)?;
            println!("Appended '{}' = '{}' in {}", path, value, file);
        }
        Commands::Delete { file, path } => {
            let mut root = session.load(&file)?;
            session.walker().delete(&mut root, &path)?;
            session.save(&file, &root)?;
            println!("Deleted '{}' from {}", path, file);
        }
        Commands::Fmt { file, write } => {
            let root = session.load(&file)?;
            if write {
                session.save(&file, &root)?;
            } else {
                print!("{}", session.render(&root)?);
            }
        }
        Commands::Json { file } => {
            let root = session.load(&file)?;
            println!("{}", serde_json::to_string_pretty(&json::to_json(&root))?);
        }
    }

    Ok(())
}
