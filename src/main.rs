use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::Path;

use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as ReplResult};

use reckon::Interpreter;

const HELP: &str = "\
A simple interpreter that can calculate arbitrarily nested mathematical expressions.
It supports:
- operators +, -, *, /, %.
- variable assignments, e.g. x = 1 or x = 1 + 1
- variable value retrieval
- operation nesting";

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        run_repl().map_err(|err| format!("Error: {err}"))?;
    } else {
        run_script(&args[1])?
    }
    Ok(())
}

fn run_script(filename: &str) -> Result<(), String> {
    let lines =
        read_lines(filename).map_err(|_| format!("{filename} not found. No such file or directory."))?;
    run_lines(lines, &mut io::stdout().lock(), &mut io::stderr().lock())
        .map_err(|err| format!("Error: {err}"))
}

/// Interprets each line with one shared interpreter. Failures are reported
/// with their 1-based line number; undecodable lines are skipped.
fn run_lines<I, O, E>(lines: I, out: &mut O, err: &mut E) -> io::Result<()>
where
    I: Iterator<Item = io::Result<String>>,
    O: Write,
    E: Write,
{
    let mut interpreter = Interpreter::new();
    for (lineno, line) in lines.enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                writeln!(err, "line {}: {e}", lineno + 1)?;
                continue;
            }
            Err(e) => return Err(e),
        };
        match interpreter.interpret(&line) {
            Ok(Some(value)) => writeln!(out, "{value}")?,
            Ok(None) => {}
            Err(e) => writeln!(err, "line {}: {e}", lineno + 1)?,
        }
    }
    Ok(())
}

fn run_repl() -> ReplResult<()> {
    let mut rl = DefaultEditor::new()?;
    let mut interpreter = Interpreter::new();
    #[cfg(feature = "with-file-history")]
    if rl.load_history("history.txt").is_err() {
        println!("No previous history.");
    }
    println!("Simple REPL shell. Type \"help\" for help, or \"exit\" to exit the shell.");
    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                match line.trim() {
                    "exit" => break,
                    "help" => println!("{HELP}"),
                    input => match interpreter.interpret(input) {
                        Ok(Some(value)) => println!("{value}"),
                        Ok(None) => {}
                        Err(err) => eprintln!("{err}"),
                    },
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    #[cfg(feature = "with-file-history")]
    rl.save_history("history.txt")?;
    Ok(())
}

fn read_lines<P>(filename: P) -> io::Result<io::Lines<io::BufReader<File>>>
where
    P: AsRef<Path>,
{
    let file = File::open(filename)?;
    Ok(io::BufReader::new(file).lines())
}

#[cfg(test)]
mod test {
    use std::io::{BufRead, Cursor};

    use super::run_lines;

    fn run(input: &[u8]) -> (String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        run_lines(Cursor::new(input).lines(), &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_script_shares_variables() {
        let (out, err) = run(b"x = 2\n\nx * 3\n");
        assert_eq!(out, "2\n6\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_script_reports_errors_and_continues() {
        let (out, err) = run(b"1 +\ny\n4 / 2\n");
        assert_eq!(out, "2\n");
        assert_eq!(
            err,
            "line 1: Invalid syntax: missing second operand for operator '+'.\nline 2: Undefined variable y\n"
        );
    }

    #[test]
    fn test_script_skips_undecodable_lines() {
        let (out, err) = run(b"1 + 1\n\xff\xfe\n2 * 3\n");
        assert_eq!(out, "2\n6\n");
        assert!(err.starts_with("line 2: "));
        assert_eq!(err.lines().count(), 1);
    }
}
