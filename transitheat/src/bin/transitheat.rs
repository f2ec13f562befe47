//! builds transit density maps and stop frequency reports for the cities
//! found under the source directory.
use clap::Parser;
use transitheat::app::TransitHeatApp;

fn main() {
    env_logger::init();
    let args = TransitHeatApp::parse();
    if let Err(e) = args.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
