use clap::Parser;

use art_booth::cli::{run_ascii, run_transform, Args, Command};

fn main() {
    let args = Args::parse();

    let result = match &args.command {
        Command::Ascii {
            input,
            width,
            charset,
        } => run_ascii(input, *width, charset.as_deref()),
        Command::Transform {
            input,
            output,
            effect,
            cell_size,
        } => run_transform(input, output, *effect, *cell_size),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
