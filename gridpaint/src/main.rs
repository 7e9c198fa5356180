use std::process;

use gridpaint_lib::{App, AppOptions, USAGE};

fn main() {
    let options = match AppOptions::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };
    let mut app = App::new(options);
    if let Err(e) = app.run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
