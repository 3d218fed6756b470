use board_shake::common::SandboxConfig;
use board_shake::{Sandbox, Vec2};
use std::env;
use std::fs;

mod visual;

fn main() {
    let args: Vec<String> = env::args().collect();

    // Check if first arg is "visual"
    let visual = args.len() > 1 && args[1] == "visual";
    let config_arg = if visual { args.get(2) } else { args.get(1) };

    let config = match load_config(config_arg.map(String::as_str)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return;
        }
    };

    if visual {
        if let Err(e) = visual::run_visual(config) {
            eprintln!("Error running viewer: {}", e);
        }
        return;
    }

    if let Err(e) = run_headless(config) {
        eprintln!("Simulation failed: {}", e);
    }
}

/// Reads a JSON config file, or falls back to a flat (gravity-free) board.
fn load_config(path: Option<&str>) -> Result<SandboxConfig, String> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
            SandboxConfig::from_json_str(&text).map_err(|e| e.to_string())
        }
        None => {
            let mut config = SandboxConfig::default();
            config.world.gravity = Vec2::ZERO;
            Ok(config)
        }
    }
}

/// Shakes the starting position once and prints where every piece ends up.
fn run_headless(config: SandboxConfig) -> board_shake::Result<()> {
    let dt = config.world.timestep;
    let mut sandbox = Sandbox::chess(config)?;
    println!("Board ready with {} bodies", sandbox.bodies().len());

    sandbox.disturb(6)?;
    println!("Shaken at intensity {}", sandbox.intensity());

    for frame in 0..180 {
        sandbox.step(dt)?;
        if frame % 60 == 0 {
            println!(
                "Frame {}: kinetic energy {:.3}, {} contacts",
                frame,
                sandbox.world().kinetic_energy(),
                sandbox.world().last_contact_count()
            );
        }
    }

    if let Some(board) = sandbox.board() {
        for handle in &board.pieces {
            let t = sandbox.get_transform(handle.id)?;
            println!(
                "{} from {}: ({:.2}, {:.2}) angle {:.2}",
                handle.piece.code(),
                handle.square,
                t.position.x,
                t.position.y,
                t.angle
            );
        }
    }

    sandbox.reset();
    println!("Reset, intensity back to {}", sandbox.intensity());
    Ok(())
}
