use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{self, EnvFilter};
use std::io::Read;
use std::path::{Path, PathBuf};

use ethwire::Config;
use ethwire_abi::{AbiParameter, ParamType, ParserOptions, Parameter};
use ethwire_tx::{TransactionEnvelope, TransactionRequest};
use ethwire_types::{decode_hex, encode_hex};

#[derive(Parser)]
#[command(name = "ethwire")]
#[command(version, about = "Ethereum ABI types, RLP and unsigned transaction envelopes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured log level
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a canonical ABI type string
    ParseType {
        /// Type string, e.g. `int24[5][]`
        ty: String,

        /// Treat unknown scalar names as uint8 enums
        #[arg(long)]
        lenient: bool,
    },

    /// Parse ABI parameter JSON (a single object or an array)
    ParseParam {
        /// JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Serialize a transaction request to its unsigned wire bytes
    EncodeTx {
        /// JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Also print the signing hash
        #[arg(long)]
        hash: bool,
    },

    /// Decode unsigned wire bytes back into a transaction
    DecodeTx {
        /// 0x-prefixed hex payload
        payload: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::default(),
    };
    let level = cli.log_level.clone().unwrap_or_else(|| config.log.level.clone());

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("{} starting", ethwire::client_version());

    match cli.command {
        Commands::ParseType { ty, lenient } => {
            let options = if lenient {
                ParserOptions::lenient()
            } else {
                config.parser_options()
            };
            let parsed = ParamType::parse_with(&ty, options)?;
            info!("Parsed {} (depth {})", ty, parsed.depth());

            println!("{}", parsed);
            println!("{:#?}", parsed);
        }

        Commands::ParseParam { input } => {
            let json = read_input(&input)?;
            let params = parse_params(&json)?;
            info!("Parsed {} parameter(s)", params.len());

            for param in &params {
                let kind = if param.is_dynamic() { "dynamic" } else { "static" };
                println!("{}\t{}\t{}", param.name, param.canonical_type(), kind);
            }
        }

        Commands::EncodeTx { input, hash } => {
            let json = read_input(&input)?;
            let request: TransactionRequest = serde_json::from_str(&json)
                .context("Failed to parse transaction request")?;
            let envelope = request.to_envelope()?;
            let encoded = envelope.serialize()?;
            info!("Encoded type {} transaction", envelope.tx_type());

            println!("{}", encode_hex(&encoded));
            if hash {
                println!("{:?}", envelope.signing_hash()?);
            }
        }

        Commands::DecodeTx { payload } => {
            let bytes = decode_hex(payload.trim()).context("Payload is not valid hex")?;
            let envelope = TransactionEnvelope::decode(&bytes)?;
            info!("Decoded type {} transaction", envelope.tx_type());

            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))
}

fn parse_params(json: &str) -> Result<Vec<AbiParameter>> {
    if json.trim_start().starts_with('[') {
        Ok(AbiParameter::list_from_json(json)?)
    } else {
        Ok(vec![AbiParameter::from_json(json)?])
    }
}
