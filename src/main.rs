mod app;
mod config;
mod error;
mod gpu;
mod sketch;

use env_logger::Env;
use winit::event_loop::EventLoop;

use crate::app::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new()?;
    let mut app = App::new(rand::random());
    event_loop.run_app(&mut app)?;

    Ok(())
}
