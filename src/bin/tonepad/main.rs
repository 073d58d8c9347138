//! tonepad - Terminal tone pad
//!
//! Run with: cargo run
//! Logs go to tonepad.log (filter with RUST_LOG).

mod app;
mod logging;
mod ui;

use app::Tonepad;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init("tonepad.log")?;

    Tonepad::new().shape(10.0).fade(false).duration(1.0).run()
}
