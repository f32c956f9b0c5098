use clap::Parser;
use std::error::Error;
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use chip8_vm::config::Config;
use chip8_vm::display::MonoTermDisplay;
use chip8_vm::input::StdinInput;
use chip8_vm::interpreter::Chip8Interpreter;
use chip8_vm::sound::{Mute, SimpleBeep, Sound};

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();

    // the terminal belongs to the display, so logs only go to a file
    if let Some(path) = &config.log_file {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(Mutex::new(File::create(path)?))
            .with_ansi(false)
            .init();
    }

    // read the program before touching the terminal so errors stay readable
    let mut f = File::open(&config.rom)?;

    let mut display = MonoTermDisplay::new()?;
    let mut input = StdinInput::new()?;
    let mut sound: Box<dyn Sound> = if config.beep {
        Box::new(SimpleBeep::new())
    } else {
        Box::new(Mute::new())
    };
    let mut interpreter = Chip8Interpreter::new(
        &mut display,
        &mut input,
        sound.as_mut(),
        config.keymap.table(),
    );

    interpreter.load_program(&mut f)?;
    let result = interpreter.main_loop(config.ips, config.frames);
    drop(interpreter);
    drop(input);

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..2 {
        println!();
    }
    if let Err(e) = &result {
        tracing::error!("machine stopped: {}", e);
    }
    result?;
    Ok(())
}
