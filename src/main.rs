//! Circle Bounce entry point: the spawner demo
//!
//! Balls bounce inside a circle; each one that hits the orbiting sprite is
//! replaced by two new balls.

use circle_bounce::{Demo, Settings};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Circle Bounce starting...");

    circle_bounce::run(Demo::Spawner, Settings::load())
}
