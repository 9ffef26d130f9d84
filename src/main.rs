use donut::config::{parse_colors, parse_icons, parse_ticks};
use donut::{DonutCommand, DonutConfig, DonutProgress};
use log::{info, warn};
use std::env;
use std::io::{self, BufRead};
use std::process;
use std::sync::mpsc;
use std::thread;

const USAGE: &str = "usage: donut [--size W H] [--title T] [--ticks LIST] [--colors LIST] \
[--icons LIST] [--min N] [--max N] [--stroke N] [--overlap]

Tick lists read from stdin, one comma separated list per line, replace the ticks.";

fn fail(message: &str) -> ! {
    eprintln!("{message}\n\n{USAGE}");
    process::exit(1);
}

fn value<T: std::str::FromStr>(flag: &str, arg: Option<String>) -> T {
    arg.and_then(|a| a.trim().parse().ok())
        .unwrap_or_else(|| fail(&format!("{flag} needs a valid value")))
}

fn parse_args() -> DonutConfig {
    let mut config = DonutConfig::default();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--size" => {
                config.window_width = value("--size", args.next());
                config.window_height = value("--size", args.next());
            }
            "--title" => {
                config.title = args.next().unwrap_or_else(|| fail("--title needs a value"));
            }
            "--ticks" => {
                let list = args.next().unwrap_or_default();
                config.ticks = parse_ticks(&list).unwrap_or_else(|e| fail(&e.to_string()));
            }
            "--colors" => {
                let list = args.next().unwrap_or_default();
                config.colors = parse_colors(&list).unwrap_or_else(|e| fail(&e.to_string()));
            }
            "--icons" => {
                config.icons = parse_icons(&args.next().unwrap_or_default());
            }
            "--min" => config.min = value("--min", args.next()),
            "--max" => config.max = value("--max", args.next()),
            "--stroke" => config.stroke_width = value("--stroke", args.next()),
            "--overlap" => config.overlap = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                process::exit(0);
            }
            other => fail(&format!("unknown argument {other:?}")),
        }
    }

    config
}

fn main() {
    env_logger::init();

    let config = parse_args();
    info!(
        "showing {} ticks in [{}, {}]",
        config.ticks.len(),
        config.min,
        config.max
    );

    let (sender, receiver) = mpsc::channel();

    // Spawn a thread to read tick lists from stdin
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_ticks(&line) {
                Ok(ticks) => {
                    if sender.send(DonutCommand::SetTicks(ticks)).is_err() {
                        break;
                    }
                }
                Err(err) => warn!("ignoring stdin line: {err}"),
            }
        }
    });

    let mut donut = DonutProgress::new(config);
    if let Err(err) = donut.show_with_commands(receiver) {
        eprintln!("donut: {err}");
        process::exit(1);
    }
}
