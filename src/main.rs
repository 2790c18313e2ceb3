mod config;
mod dump;
mod keys;

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;

use config::{Cli, Command, Config};
use joycon_raw::{
    Button, ButtonTracker, DeviceId, DeviceScanner, EventSource, HighLevelApiSource,
    RawByteStreamSource, Reader, SourceKind,
};

const RECONNECT_DELAY: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Some(_) => "warn",
        None => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::load(&cli);
    config.validate()?;

    match cli.command {
        Some(Command::List) => list_devices(),
        Some(Command::Dump { ref device }) => {
            let path = match device {
                Some(path) => path.clone(),
                None => resolve_device(&config)?,
            };
            dump::run_dump(&path, config.layout, &config.mapping_for(SourceKind::RawByteStream))
        }
        None => run(&config),
    }
}

fn list_devices() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    for dev in DeviceScanner::default().list()? {
        let id = match (dev.vendor, dev.product) {
            (Some(v), Some(p)) => format!("{:04x}:{:04x}", v, p),
            _ => "????:????".to_string(),
        };
        println!(
            "{}  {}  {}{}",
            dev.path.display(),
            id,
            dev.name.as_deref().unwrap_or("unnamed"),
            if dev.readable { "" } else { "  (not readable)" }
        );
    }
    Ok(())
}

fn resolve_device(config: &Config) -> Result<PathBuf, joycon_raw::Error> {
    match config.device {
        Some(ref path) => Ok(path.clone()),
        None => Ok(DeviceScanner::default().find(config.filter())?.path),
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let tracker = Arc::new(ButtonTracker::new(config.mapping()));
    log::info!(
        "joycon-raw starting (source={}, device_id={}, layout={}, {} mapped codes)",
        config.source,
        config.device_id,
        config.layout,
        tracker.mapping().len()
    );

    if config.source == SourceKind::HighLevelApi {
        return run_stdin(config, &tracker);
    }

    loop {
        if let Err(e) = run_raw(config, &tracker) {
            log::error!("{}", e);
        }
        log::warn!("Reader stopped, reconnecting in {}s…", RECONNECT_DELAY.as_secs());
        thread::sleep(RECONNECT_DELAY);
    }
}

fn run_raw(
    config: &Config,
    tracker: &Arc<ButtonTracker>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let path = resolve_device(config)?;
    let source = RawByteStreamSource::open(&path, config.device_id, config.layout)?;
    watch(source, config, tracker)
}

/// Key codes typed on stdin stand in for the host's key API. Ends with stdin.
fn run_stdin(
    config: &Config,
    tracker: &Arc<ButtonTracker>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (sender, source) = HighLevelApiSource::channel();
    let device = config.device_id;
    thread::Builder::new().name("stdin-keys".into()).spawn(move || {
        match keys::feed(std::io::stdin().lock(), &sender, device) {
            Ok(n) => log::info!("stdin closed after {} key events", n),
            Err(e) => log::error!("stdin: {}", e),
        }
    })?;
    watch(source, config, tracker)
}

fn watch<S: EventSource + 'static>(
    source: S,
    config: &Config,
    tracker: &Arc<ButtonTracker>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let sink = |device: DeviceId, button: Button, pressed: bool| {
        println!(
            "{} {} {} {}",
            if pressed { "pressed " } else { "released" },
            device,
            button.code(),
            button
        );
    };
    let handle = Reader::new(source, tracker.clone(), sink).spawn("joycon-reader")?;

    // Poll the way a frame loop would, to show the held set alongside the events.
    let mut last: Vec<Button> = Vec::new();
    while handle.is_running() {
        let held = tracker.snapshot(config.device_id);
        if held != last {
            log::debug!(
                "held on {}: [{}]",
                config.device_id,
                held.iter().map(|b| b.to_string()).collect::<Vec<_>>().join(", ")
            );
            last = held;
        }
        thread::sleep(POLL_INTERVAL);
    }

    let stats = handle.join()?;
    log::info!("{} events, {} transitions", stats.events, stats.transitions);
    Ok(())
}
