use regex_nfa::{compile, to_dot};
use std::io::BufRead;
use std::process::exit;
use std::{env, fs, io};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() > 1 {
        eprintln!("Usage: regviz [output.dot]");
        exit(1);
    }
    let output = args.first().map(String::as_str).unwrap_or("result.dot");

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("Can't read input: {err}");
                exit(1);
            }
        };
        let pattern = line.trim();
        if pattern.is_empty() {
            continue;
        }

        let compilation = compile(pattern);
        for diagnostic in &compilation.diagnostics {
            eprintln!("{pattern}: {diagnostic}");
        }

        let dot = to_dot(&compilation.nfa);
        println!("{dot}");
        if let Err(err) = fs::write(output, &dot) {
            eprintln!("Can't write {output}: {err}");
        }
    }
}
