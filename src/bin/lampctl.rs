use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use lampctl::config::{self, Link, Root};
use lampctl::link::{self, LinkTransport};
use lampctl::{Control, Panel};

/// Interactive control panel for a serial RGB lamp.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML, or JSON with a .json extension).
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Serial device the lamp is attached to. Overrides the configuration.
    #[clap(short, long)]
    device: Option<String>,

    /// Baud rate for the serial device.
    #[clap(short, long)]
    baud_rate: Option<u32>,

    /// Record commands in memory instead of opening a device.
    #[clap(long)]
    dry_run: bool,

    /// Connect immediately instead of waiting for `connect`.
    #[clap(long)]
    connect: bool,
}

const HELP: &str = "Commands: connect, disconnect, status [json], help, quit, \
or a control: auto, manual, color <#rrggbb|r,g,b>, static, breathing, heartbeat, strobe";

fn link_config(args: &Args) -> anyhow::Result<Link> {
    let root = match &args.config {
        Some(path) => config::read_config(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => Root::default(),
    };
    if args.dry_run {
        return Ok(Link::Memory);
    }
    let link = match root.link {
        Link::Serial { path, baud_rate } => Link::Serial {
            path: args.device.clone().or(path),
            baud_rate: args.baud_rate.unwrap_or(baud_rate),
        },
        Link::Memory => Link::Memory,
    };
    Ok(link)
}

fn print_status<L: LinkTransport>(panel: &Panel<L>, format: Option<&str>) -> anyhow::Result<()> {
    let state = panel.current_state();
    if format == Some("json") {
        println!("{}", serde_json::to_string(&state)?);
        return Ok(());
    }
    let link = if panel.is_connected() { "connected" } else { "disconnected" };
    println!(
        "{}: mode={} color={} effect={}",
        link, state.mode, state.color, state.effect
    );
    let controls: Vec<&str> = Control::layout(state.mode)
        .into_iter()
        .map(Control::name)
        .collect();
    println!("controls: {}", controls.join(" "));
    Ok(())
}

fn connect<L: LinkTransport>(panel: &mut Panel<L>) {
    match panel.connect() {
        Ok(()) => println!("connected"),
        // Not fatal; the user may pick a device and try again.
        Err(err) => {
            error!("Connection failed: {}", err);
            println!("connection failed: {}", err);
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let link_config = link_config(&args)?;
    info!("Using link {:?}", link_config);
    let mut panel = Panel::new(link::from_config(&link_config));
    if args.connect {
        connect(&mut panel);
    }

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("lamp> ");
        io::stdout().flush()?;
        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let mut words = input.split_whitespace();
        let key = match words.next() {
            Some(key) => key,
            None => continue,
        };
        let value = words.next();
        match key {
            "help" => println!("{}", HELP),
            "quit" | "exit" => break,
            "status" => print_status(&panel, value)?,
            "connect" => connect(&mut panel),
            "disconnect" => panel.disconnect(),
            _ => match panel.press(key, value) {
                Ok(action) => info!("{:?}", action),
                Err(err) => println!("{}", err),
            },
        }
    }

    panel.disconnect();
    Ok(())
}
