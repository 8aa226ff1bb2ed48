use std::{
    io::{self, Read, Write},
    process,
};

use tracing::error;

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let mut input = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut input) {
        error!("Failed reading the batch document: {}", err);
        process::exit(1);
    }

    let stdout = io::stdout();
    let mut output = stdout.lock();
    if let Err(err) = omnibus::service::run(&input, &mut output) {
        error!("{}", err);
        process::exit(1);
    }
    let _ = output.flush();
}
