// famicore - windowed host entry point

use famicore::emulator::{Console, EmulatorConfig};
use famicore::display::run_display;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let rom_path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: famicore <rom.nes>");
            eprintln!();
            eprintln!("keys:   X = A, Z = B, Enter = Start, RShift = Select, arrows = D-pad");
            eprintln!("hotkeys: F5 save state, F7 load state, F12 screenshot, 0-9 pick slot");
            std::process::exit(2);
        }
    };

    let config = EmulatorConfig::load_or_default(famicore::emulator::CONFIG_FILE);
    let console = Console::from_file(&rom_path)?;

    run_display(console, config)
}
