use std::{env, io, process};

use lox_lang::{Lox, Profile};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut profile = Profile::Strict;
    let mut script: Option<&str> = None;

    for arg in &args[1..] {
        if let Some(choice) = arg.strip_prefix("-profile=") {
            profile = match choice {
                "strict" => Profile::Strict,
                "non-strict" => Profile::NonStrict,
                _ => usage(),
            };
        } else if script.is_none() {
            script = Some(arg.as_str());
        } else {
            usage();
        }
    }

    let mut stdout = io::stdout();
    let mut lox = Lox::new(&mut stdout).with_profile(profile);

    match script {
        Some(path) => lox.run_file(path),
        None => lox.run_prompt(),
    }
}

fn usage() -> ! {
    eprintln!("Usage: lox [script]");
    process::exit(64);
}
