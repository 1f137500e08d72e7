//! # escpos-net CLI
//!
//! Command-line interface for ESC/POS network printers.
//!
//! ## Usage
//!
//! ```bash
//! # Print two lines, centered and bold, then cut
//! escpos-net --host 192.168.1.30 text --align center --bold --cut "Hello" "World"
//!
//! # Print a QR code, everything sent in one connection
//! escpos-net --host 192.168.1.30 --buffered qr --size large "https://example.com"
//!
//! # Print a barcode
//! escpos-net --host 192.168.1.30 barcode code128 --code-set c 0123456789
//!
//! # Print a logo 384 dots wide
//! escpos-net --host 192.168.1.30 image --width 384 logo.png
//!
//! # Replay a JSON job, writing the bytes to a file instead of the printer
//! escpos-net --dump receipt.bin job receipt.json
//! ```
//!
//! The host and port can also come from `ESCPOS_HOST` and `ESCPOS_PORT`.
//! Logging honors `RUST_LOG`.

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use escpos_net::{
    EscPosError, MemoryTransport, Printer, PrinterEndpoint, PrinterMode, TcpTransport, Transport,
    job::Job,
    printer::DEFAULT_PORT,
    protocol::{
        barcode::{BarcodeOptions, CodeSet, Correction, HriPosition, Size2D, Symbol2D, Symbology},
        commands::CutMode,
        text::{Alignment, Font, TextOptions, Underline},
    },
    raster::{self, RasterOptions},
};

/// escpos-net - ESC/POS network printer utility
#[derive(Parser, Debug)]
#[command(name = "escpos-net")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Printer host name or IP address
    #[arg(long, env = "ESCPOS_HOST", global = true)]
    host: Option<String>,

    /// Printer TCP port
    #[arg(long, env = "ESCPOS_PORT", default_value_t = DEFAULT_PORT, global = true)]
    port: u16,

    /// Connect and send timeout in seconds
    #[arg(long, default_value_t = 5, global = true)]
    timeout: u64,

    /// Send everything in one connection at the end instead of per operation
    #[arg(long, global = true)]
    buffered: bool,

    /// Write the job bytes to FILE instead of sending them
    #[arg(long, value_name = "FILE", global = true)]
    dump: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print lines of text
    Text {
        /// One argument per line
        #[arg(required = true)]
        lines: Vec<String>,

        /// left, center or right
        #[arg(long, value_parser = parse_name::<Alignment>)]
        align: Option<Alignment>,

        #[arg(long)]
        bold: bool,

        /// off, one_dot or two_dot
        #[arg(long, value_parser = parse_name::<Underline>)]
        underline: Option<Underline>,

        /// A or B
        #[arg(long, value_parser = parse_name::<Font>)]
        font: Option<Font>,

        /// Horizontal magnification, 0-7
        #[arg(long, default_value_t = 0)]
        width: u8,

        /// Vertical magnification, 0-7
        #[arg(long, default_value_t = 0)]
        height: u8,

        /// Host code page the text is encoded with
        #[arg(long, default_value_t = 1252)]
        code_page: u16,

        /// Printer character table
        #[arg(long, default_value_t = 32)]
        page_code: u8,

        /// Feed and cut afterwards
        #[arg(long)]
        cut: bool,
    },

    /// Feed paper
    Feed {
        /// Number of lines
        lines: u8,
    },

    /// Cut paper
    Cut {
        /// Leave a hinge instead of cutting through
        #[arg(long)]
        partial: bool,

        /// Lines to feed before cutting
        #[arg(long, default_value_t = 0)]
        feed: u8,
    },

    /// Print a 1D barcode
    Barcode {
        /// upc_a, upc_e, ean13, ean8, code39, itf, codabar, code93, code128, ...
        #[arg(value_parser = parse_name::<Symbology>)]
        symbology: Symbology,

        data: String,

        /// Bar height in dots
        #[arg(long)]
        height: Option<u8>,

        /// Module width, 1-6
        #[arg(long)]
        width: Option<u8>,

        /// none, above, below or both
        #[arg(long, value_parser = parse_name::<HriPosition>)]
        hri: Option<HriPosition>,

        /// Code128 code set: A, B or C
        #[arg(long, value_parser = parse_code_set)]
        code_set: Option<CodeSet>,
    },

    /// Print a QR code or PDF417 symbol
    Qr {
        data: String,

        /// qr_model1, qr_model2, qr_micro or pdf417
        #[arg(long, value_parser = parse_name::<Symbol2D>, default_value = "qr_model2")]
        symbol: Symbol2D,

        /// tiny, small, normal, large or extra
        #[arg(long, value_parser = parse_name::<Size2D>, default_value = "normal")]
        size: Size2D,

        /// percent7, percent15, percent25 or percent30
        #[arg(long, value_parser = parse_name::<Correction>, default_value = "percent7")]
        correction: Correction,
    },

    /// Print an image file
    Image {
        path: PathBuf,

        /// Output width in dots
        #[arg(long, default_value_t = raster::DEFAULT_WIDTH_DOTS)]
        width: f64,

        /// Luminance threshold, 0-255
        #[arg(long, default_value_t = raster::DEFAULT_THRESHOLD)]
        threshold: u8,

        /// Mark dark pixels instead of light ones
        #[arg(long)]
        inverted: bool,

        /// Feed and cut afterwards
        #[arg(long)]
        cut: bool,
    },

    /// Replay a JSON job file
    Job { path: PathBuf },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), EscPosError> {
    let mode = if cli.buffered {
        PrinterMode::Buffered
    } else {
        PrinterMode::Direct
    };

    if let Some(dump) = &cli.dump {
        let host = cli.host.as_deref().unwrap_or("dump");
        let endpoint = PrinterEndpoint::new(host, cli.port, mode);
        let mut printer = Printer::new(endpoint, MemoryTransport::new());
        execute(&mut printer, &cli.command)?;

        let bytes = printer.transport().bytes();
        fs::write(dump, &bytes)?;
        info!(path = %dump.display(), bytes = bytes.len(), "job written");
        return Ok(());
    }

    let host = cli.host.ok_or_else(|| {
        EscPosError::InvalidParameter("no printer host given (use --host or ESCPOS_HOST)".into())
    })?;
    let endpoint = PrinterEndpoint::new(host, cli.port, mode)
        .with_timeout(Duration::from_secs(cli.timeout));
    let mut printer = Printer::new(endpoint, TcpTransport::new());
    execute(&mut printer, &cli.command)
}

/// Run one subcommand on the session, flushing at the end when buffered.
fn execute<T: Transport>(printer: &mut Printer<T>, command: &Commands) -> Result<(), EscPosError> {
    match command {
        Commands::Text {
            lines,
            align,
            bold,
            underline,
            font,
            width,
            height,
            code_page,
            page_code,
            cut,
        } => {
            if let Some(align) = align {
                printer.set_align(*align)?;
            }
            if let Some(font) = font {
                printer.set_font(*font)?;
            }
            if let Some(underline) = underline {
                printer.set_underline(*underline)?;
            }
            if *bold {
                printer.set_bold(true)?;
            }
            if (*width, *height) != (0, 0) {
                printer.set_magnification(*width, *height)?;
            }

            let options = TextOptions {
                newline: true,
                page_code: *page_code,
                code_page: *code_page,
            };
            for line in lines {
                printer.print_text_with(line, options)?;
            }
            if *cut {
                printer.feed(4)?;
                printer.cut()?;
            }
        }

        Commands::Feed { lines } => printer.feed(*lines)?,

        Commands::Cut { partial, feed } => {
            if *feed > 0 {
                printer.feed(*feed)?;
            }
            let mode = if *partial {
                CutMode::Partial
            } else {
                CutMode::Full
            };
            printer.cut_with(mode)?;
        }

        Commands::Barcode {
            symbology,
            data,
            height,
            width,
            hri,
            code_set,
        } => {
            let defaults = BarcodeOptions::default();
            let options = BarcodeOptions {
                height: height.unwrap_or(defaults.height),
                width: width.unwrap_or(defaults.width),
                hri_position: hri.unwrap_or(defaults.hri_position),
                code_set: code_set.unwrap_or(defaults.code_set),
                ..defaults
            };
            printer.print_barcode(*symbology, data, options)?;
        }

        Commands::Qr {
            data,
            symbol,
            size,
            correction,
        } => printer.print_2d(*symbol, data.as_bytes(), *size, *correction)?,

        Commands::Image {
            path,
            width,
            threshold,
            inverted,
            cut,
        } => {
            let source = raster::open(path)?;
            let options = RasterOptions {
                threshold: *threshold,
                width_dots: *width,
                inverted: *inverted,
            };
            printer.print_image(&source, options)?;
            if *cut {
                printer.feed(4)?;
                printer.cut()?;
            }
        }

        // Job::run flushes buffered sessions itself
        Commands::Job { path } => return Job::from_path(path)?.run(printer),
    }

    if printer.mode() == PrinterMode::Buffered {
        printer.flush()?;
    }
    Ok(())
}

/// Parse a value by its serde name, e.g. `center` or `qr_model2`.
fn parse_name<T: DeserializeOwned>(s: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(s.to_owned())).map_err(|e| e.to_string())
}

fn parse_code_set(s: &str) -> Result<CodeSet, String> {
    parse_name(&s.to_ascii_uppercase())
}
