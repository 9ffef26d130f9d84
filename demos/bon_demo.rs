use donut::{Color, DonutCommand, DonutConfig, DonutProgress, IconSet};
use rand::Rng;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Build the donut with the bon-generated builder
    let config = DonutConfig::builder()
        .title("Donut demo".to_string())
        .ticks(vec![20.0, 45.0, 70.0, 100.0])
        .colors(vec![Color::GREEN, Color::YELLOW, Color::RED])
        .icons(vec!["ok".into(), "warn".into(), "#ffffff".into(), "done".into()])
        .icon_size(24.0)
        .stroke_width(28.0)
        .overlap(true)
        .window_width(400)
        .window_height(400)
        .build();

    let icons = IconSet::new()
        .with("ok", Color::rgb(0x1b, 0x5e, 0x20))
        .with("warn", Color::rgb(0xe6, 0x51, 0x00))
        .with("done", Color::BLACK);

    let mut donut = DonutProgress::with_provider(config, icons);

    let (sender, receiver) = mpsc::channel();

    // Spawn a thread that keeps moving the last tick around
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            let commands = [
                DonutCommand::SetProgress(rng.random_range(70.0..110.0)),
                DonutCommand::SetOverlap(rng.random_bool(0.5)),
            ];

            if commands.iter().any(|cmd| sender.send(cmd.clone()).is_err()) {
                break;
            }

            thread::sleep(Duration::from_millis(500));
        }
    });

    println!("Displaying a donut whose last segment moves randomly");
    println!("Press Ctrl+C to exit");

    donut.show_with_commands(receiver)
}
