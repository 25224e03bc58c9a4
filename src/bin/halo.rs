//! Circle Bounce entry point: the halo demo
//!
//! One ball grows on every bounce inside a color-cycling halo, with looping
//! background music.

use circle_bounce::{Demo, Settings};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Circle Bounce (halo) starting...");

    circle_bounce::run(Demo::Halo, Settings::load())
}
