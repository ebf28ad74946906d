use clap::Parser;
use navette::app::{NavetteApp, NavetteAppError};

fn main() -> Result<(), NavetteAppError> {
    env_logger::init();
    let args = NavetteApp::parse();
    args.run()
}
