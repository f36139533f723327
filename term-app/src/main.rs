// ftx1-term -- command-line CAT terminal for the Yaesu FTX-1.
//
// Usage:
//   ftx1-term --port /dev/ttyUSB0 freq get
//   ftx1-term --port /dev/ttyUSB0 freq set 14250000 --vfo sub
//   ftx1-term --baud 115200 mode set DATA-USB
//   ftx1-term band select 20m
//   ftx1-term raw EX 0301
//   ftx1-term raw IF --reply
//   ftx1-term chat
//   ftx1-term bauds
//   ftx1-term ports

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use ftx1_cat::commands::cmd_raw;
use ftx1_cat::validate::validate_frequency;
use ftx1_cat::{
    Action, AgcInfo, Answer, CatClient, CatCommand, ClientConfig, FrequencyInfo, LevelInfo,
    ModeInfo, PowerInfo, Query, ToneInfo,
};
use ftx1_core::{AgcType, Band, Error, OperatingMode, ToneType, Vfo};
use ftx1_transport::{
    list_ports, SerialConfig, SerialTransport, DEFAULT_BAUD_RATE, SUPPORTED_BAUD_RATES,
};

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// FTX-1 CAT terminal -- read and set rig state over the USB CAT port.
#[derive(Parser)]
#[command(name = "ftx1-term", version, about)]
struct Cli {
    /// Serial port path (e.g. /dev/ttyUSB0, COM3).
    #[arg(long, short = 'd', default_value = "/dev/ttyUSB0")]
    port: String,

    /// Baud rate. See `bauds` for the accepted values.
    #[arg(long, short = 'b', default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,

    /// How long to wait for a reply, in milliseconds.
    #[arg(long, default_value_t = 500)]
    timeout_ms: u64,

    /// After set commands, listen this long for a `?;` rejection (0 = don't).
    #[arg(long, default_value_t = 0)]
    reject_ms: u64,

    /// -v for debug logging, -vv for wire traces. RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// VFO frequency.
    Freq {
        #[command(subcommand)]
        action: FreqAction,
    },

    /// Operating mode.
    Mode {
        #[command(subcommand)]
        action: ModeAction,
    },

    /// AF (volume) gain.
    Af {
        #[command(subcommand)]
        action: LevelAction,
    },

    /// RF gain.
    Rf {
        #[command(subcommand)]
        action: LevelAction,
    },

    /// Squelch level.
    Squelch {
        #[command(subcommand)]
        action: LevelAction,
    },

    /// Transmit power.
    Power {
        #[command(subcommand)]
        action: PowerAction,
    },

    /// AGC time constant.
    Agc {
        #[command(subcommand)]
        action: AgcAction,
    },

    /// Band stack.
    Band {
        #[command(subcommand)]
        action: BandAction,
    },

    /// Copy one VFO to the other.
    Vfo {
        #[command(subcommand)]
        action: VfoAction,
    },

    /// Split operation.
    Split {
        #[command(subcommand)]
        action: SwitchAction,
    },

    /// CTCSS/DCS tone.
    Tone {
        #[command(subcommand)]
        action: ToneAction,
    },

    /// Unsolicited state reports (AI).
    AutoInfo {
        #[command(subcommand)]
        action: SwitchAction,
    },

    /// Print the firmware version.
    Version,

    /// Print the radio information string.
    RadioInfo,

    /// Send any opcode with a verbatim payload.
    Raw {
        /// Two-letter opcode (e.g. EX, IF).
        opcode: String,

        /// Payload, sent as-is.
        payload: Option<String>,

        /// Wait for and print the reply.
        #[arg(long)]
        reply: bool,
    },

    /// Interactive line mode: each line is sent with `;` appended, replies are printed.
    Chat,

    /// List the supported baud rates.
    Bauds,

    /// List serial ports.
    Ports,
}

#[derive(Subcommand)]
enum FreqAction {
    Get {
        #[arg(long, default_value = "main")]
        vfo: Vfo,
    },
    Set {
        /// Frequency in hertz (e.g. 14250000).
        hz: u32,
        #[arg(long, default_value = "main")]
        vfo: Vfo,
    },
}

#[derive(Subcommand)]
enum ModeAction {
    Get {
        #[arg(long, default_value = "main")]
        vfo: Vfo,
    },
    Set {
        /// Mode name (e.g. USB, CW-R, DATA-USB, C4FM).
        mode: OperatingMode,
        #[arg(long, default_value = "main")]
        vfo: Vfo,
    },
}

#[derive(Subcommand)]
enum LevelAction {
    Get {
        #[arg(long, default_value = "main")]
        vfo: Vfo,
    },
    Set {
        /// Level, 0-255.
        level: u8,
        #[arg(long, default_value = "main")]
        vfo: Vfo,
    },
}

#[derive(Subcommand)]
enum PowerAction {
    Get,
    Set {
        /// Watts, 5-100.
        watts: u8,
    },
}

#[derive(Subcommand)]
enum AgcAction {
    Get {
        #[arg(long, default_value = "main")]
        vfo: Vfo,
    },
    Set {
        /// AUTO, FAST, MID, SLOW or OFF.
        agc: AgcType,
        #[arg(long, default_value = "main")]
        vfo: Vfo,
    },
}

#[derive(Subcommand)]
enum BandAction {
    Up {
        #[arg(long, default_value = "main")]
        vfo: Vfo,
    },
    Down {
        #[arg(long, default_value = "main")]
        vfo: Vfo,
    },
    Select {
        /// Band name (e.g. 160m, 20m, 6m, 70MHz, AIR, 2m, 70cm).
        band: Band,
        #[arg(long, default_value = "main")]
        vfo: Vfo,
    },
}

#[derive(Subcommand)]
enum VfoAction {
    /// Copy VFO-A to VFO-B.
    AToB,
    /// Copy VFO-B to VFO-A.
    BToA,
}

#[derive(Subcommand)]
enum SwitchAction {
    Get,
    On,
    Off,
}

#[derive(Subcommand)]
enum ToneAction {
    Get {
        #[arg(long, default_value = "main")]
        vfo: Vfo,
    },
    Set {
        /// CTCSS or DCS.
        tone_type: ToneType,
        /// Tone table index, 0-99.
        code: u8,
        #[arg(long, default_value = "main")]
        vfo: Vfo,
    },
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

type Client = CatClient<SerialTransport>;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn format_freq(hz: u32) -> String {
    let mhz = f64::from(hz) / 1_000_000.0;
    format!("{mhz:.6} MHz")
}

async fn connect(cli: &Cli) -> Result<Client> {
    let serial = SerialConfig::with_baud(cli.baud)
        .with_context(|| format!("baud rate {} (run `ftx1-term bauds`)", cli.baud))?;
    let transport = SerialTransport::open(&cli.port, serial)
        .await
        .with_context(|| format!("opening {} at {} baud", cli.port, cli.baud))?;
    let config = ClientConfig::new()
        .reply_timeout(Duration::from_millis(cli.timeout_ms))
        .reject_window(Duration::from_millis(cli.reject_ms));
    Ok(CatClient::new(transport, config))
}

async fn show(client: &mut Client, query: Query) -> Result<()> {
    let answer = client
        .query(query)
        .await
        .with_context(|| format!("reading {query:?}"))?;
    match &answer {
        Answer::Frequency(f) => println!("{}: {}", f.vfo, format_freq(f.hz)),
        Answer::FirmwareVersion(t) | Answer::RadioInfo(t) if t.truncated => {
            println!("{t} (truncated)")
        }
        other => println!("{other}"),
    }
    Ok(())
}

async fn apply(client: &mut Client, answer: Answer) -> Result<()> {
    client
        .apply(&answer)
        .await
        .with_context(|| format!("setting {:?}", answer.query()))?;
    println!("set {answer}");
    Ok(())
}

async fn perform(client: &mut Client, action: Action) -> Result<()> {
    client
        .perform(action)
        .await
        .with_context(|| format!("{action:?}"))?;
    println!("ok");
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommands that need no rig
// ---------------------------------------------------------------------------

fn cmd_bauds() -> Result<()> {
    println!("Supported baud rates:");
    for rate in SUPPORTED_BAUD_RATES {
        let marker = if rate == DEFAULT_BAUD_RATE { " (default)" } else { "" };
        println!("  {rate:>6}{marker}");
    }
    Ok(())
}

fn cmd_ports() -> Result<()> {
    let ports = list_ports().context("listing serial ports")?;
    if ports.is_empty() {
        println!("No serial ports found.");
    }
    for port in ports {
        println!("{port}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Rig subcommands
// ---------------------------------------------------------------------------

async fn cmd_freq_set(client: &mut Client, vfo: Vfo, hz: u32) -> Result<()> {
    match validate_frequency(hz)? {
        Some(band) => tracing::debug!(hz, %band, "frequency inside band"),
        None => eprintln!("warning: {} is outside every band", format_freq(hz)),
    }
    apply(client, Answer::Frequency(FrequencyInfo { vfo, hz })).await
}

async fn cmd_raw_send(client: &mut Client, opcode: &str, payload: &str, reply: bool) -> Result<()> {
    let opcode = opcode.to_ascii_uppercase();
    match client.raw(&opcode, payload, reply).await? {
        Some(text) => println!("{text};"),
        None => println!("sent {opcode}{payload};"),
    }
    Ok(())
}

/// How long one wait on the port lasts before chat polls again.
const CHAT_POLL: Duration = Duration::from_secs(1);

/// Split a typed line into commands: `fa;md0` sends `FA;` then `MD0;`.
fn chat_commands(line: &str) -> Vec<&str> {
    line.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Uppercase the two-letter opcode of a typed command. The payload is
/// sent exactly as typed.
fn chat_command(text: &str) -> ftx1_core::Result<CatCommand> {
    let (opcode, payload) = match (text.get(..2), text.get(2..)) {
        (Some(op), Some(rest)) => (op.to_ascii_uppercase(), rest),
        _ => {
            return Err(Error::InvalidParameter(format!(
                "{text:?}: need a two-letter opcode"
            )))
        }
    };
    cmd_raw(&opcode, payload)
}

async fn chat_send_line(client: &mut Client, line: &str) -> Result<()> {
    for text in chat_commands(line) {
        let cmd = match chat_command(text) {
            Ok(cmd) => cmd,
            Err(e) => {
                eprintln!("[!] {e}");
                continue;
            }
        };
        println!("[->] {cmd}");
        client.send(&cmd).await.context("chat link failed")?;
    }
    Ok(())
}

/// Full-duplex terminal: typed commands go out as soon as they are entered
/// and anything the rig sends is printed as it arrives.
async fn cmd_chat(client: &mut Client) -> Result<()> {
    println!("Type CAT commands, <Enter> sends (`;` is appended). Ctrl-D or `quit` exits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            typed = lines.next_line() => {
                let Some(line) = typed.context("reading stdin")? else {
                    break;
                };
                let line = line.trim();
                if line.eq_ignore_ascii_case("quit") {
                    break;
                }
                chat_send_line(client, line).await?;
            }
            received = client.next_line(CHAT_POLL) => match received {
                Ok(Some(reply)) => println!("[<-] {reply};"),
                Ok(None) => {}
                Err(Error::Rejected) => println!("[<-] ?;"),
                Err(e) if e.is_codec_error() || matches!(e, Error::ReplyOverflow(_)) => {
                    eprintln!("[!] {e}")
                }
                Err(e) => return Err(e).context("chat link failed"),
            },
        }
    }

    println!("Closing port.");
    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Bauds => return cmd_bauds(),
        Command::Ports => return cmd_ports(),
        _ => {}
    }

    if cli.timeout_ms == 0 {
        bail!("--timeout-ms must be greater than zero");
    }

    let mut client = connect(&cli).await?;
    let result = run(&mut client, &cli.command).await;
    if let Err(e) = client.close().await {
        tracing::warn!(error = %e, "closing port");
    }
    result
}

async fn run(client: &mut Client, command: &Command) -> Result<()> {
    match command {
        Command::Freq { action } => match action {
            FreqAction::Get { vfo } => show(client, Query::Frequency(*vfo)).await,
            FreqAction::Set { hz, vfo } => cmd_freq_set(client, *vfo, *hz).await,
        },
        Command::Mode { action } => match action {
            ModeAction::Get { vfo } => show(client, Query::Mode(*vfo)).await,
            ModeAction::Set { mode, vfo } => {
                apply(client, Answer::Mode(ModeInfo { vfo: *vfo, mode: *mode })).await
            }
        },
        Command::Af { action } => level(client, action, Query::AfGain, Answer::AfGain).await,
        Command::Rf { action } => level(client, action, Query::RfGain, Answer::RfGain).await,
        Command::Squelch { action } => {
            level(client, action, Query::Squelch, Answer::Squelch).await
        }
        Command::Power { action } => match action {
            PowerAction::Get => show(client, Query::Power).await,
            PowerAction::Set { watts } => {
                apply(client, Answer::Power(PowerInfo { watts: *watts })).await
            }
        },
        Command::Agc { action } => match action {
            AgcAction::Get { vfo } => show(client, Query::Agc(*vfo)).await,
            AgcAction::Set { agc, vfo } => {
                apply(client, Answer::Agc(AgcInfo::new(*vfo, *agc))).await
            }
        },
        Command::Band { action } => match action {
            BandAction::Up { vfo } => perform(client, Action::BandUp(*vfo)).await,
            BandAction::Down { vfo } => perform(client, Action::BandDown(*vfo)).await,
            BandAction::Select { band, vfo } => {
                perform(client, Action::BandSelect(*vfo, *band)).await
            }
        },
        Command::Vfo { action } => match action {
            VfoAction::AToB => perform(client, Action::VfoAToB).await,
            VfoAction::BToA => perform(client, Action::VfoBToA).await,
        },
        Command::Split { action } => match action {
            SwitchAction::Get => show(client, Query::Split).await,
            SwitchAction::On => apply(client, Answer::Split(true)).await,
            SwitchAction::Off => apply(client, Answer::Split(false)).await,
        },
        Command::Tone { action } => match action {
            ToneAction::Get { vfo } => show(client, Query::Tone(*vfo)).await,
            ToneAction::Set {
                tone_type,
                code,
                vfo,
            } => apply(client, Answer::Tone(ToneInfo::new(*vfo, *tone_type, *code))).await,
        },
        Command::AutoInfo { action } => match action {
            SwitchAction::Get => show(client, Query::AutoInfo).await,
            SwitchAction::On => apply(client, Answer::AutoInfo(true)).await,
            SwitchAction::Off => apply(client, Answer::AutoInfo(false)).await,
        },
        Command::Version => show(client, Query::FirmwareVersion).await,
        Command::RadioInfo => show(client, Query::RadioInfo).await,
        Command::Raw {
            opcode,
            payload,
            reply,
        } => cmd_raw_send(client, opcode, payload.as_deref().unwrap_or(""), *reply).await,
        Command::Chat => cmd_chat(client).await,
        Command::Bauds => cmd_bauds(),
        Command::Ports => cmd_ports(),
    }
}

async fn level(
    client: &mut Client,
    action: &LevelAction,
    query: fn(Vfo) -> Query,
    answer: fn(LevelInfo) -> Answer,
) -> Result<()> {
    match action {
        LevelAction::Get { vfo } => show(client, query(*vfo)).await,
        LevelAction::Set { level, vfo } => {
            apply(client, answer(LevelInfo { vfo: *vfo, level: *level })).await
        }
    }
}
