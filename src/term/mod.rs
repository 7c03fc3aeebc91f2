extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use crate::lang::{Error, ErrorCode};
use crate::mach::{Config, Runtime, BYE};
use ansi_term::Style;
use linefeed::{Completer, Completion, Interface, Prompter, ReadResult, Terminal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod logger;

pub fn main() {
    let config = Config::from_env();
    logger::init(config.log_level);
    let mut runtime = Runtime::new(config);
    let interrupted = runtime.interrupt_flag();
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    if let Err(error) = boot(&mut runtime) {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
        return;
    }
    if let Err(error) = main_loop(runtime, interrupted) {
        eprintln!("{}", error);
    }
}

/// Load the configured image, then build the configured source on top of
/// it. A missing image is fine when there is source to assemble.
fn boot(runtime: &mut Runtime) -> Result<(), Error> {
    let config = runtime.config().clone();
    match runtime.load_image(&config.image) {
        Ok(()) => {}
        Err(error) if error.is(ErrorCode::FileNotFound) && config.source.is_some() => {
            log::info!("{}", error);
        }
        Err(error) => return Err(error),
    }
    if let Some(source) = &config.source {
        runtime.build_file(source)?;
    }
    Ok(())
}

fn main_loop(mut runtime: Runtime, interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    let interface = Interface::new("POW4TH")?;
    interface.set_prompt(&runtime.config().prompt)?;
    loop {
        interface.set_completer(Arc::new(WordCompleter::new(&runtime)));
        let string = match interface.read_line()? {
            ReadResult::Input(string) => string,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        if is_bye(&string) {
            break;
        }
        interrupted.store(false, Ordering::SeqCst);
        let mut line_open = false;
        let result = runtime.enter_with(&string, |output| {
            line_open = !output.ends_with('\n');
            interface.write_fmt(format_args!("{}", output))
        });
        if line_open {
            interface.write_fmt(format_args!("\n"))?;
        }
        if let Err(error) = result {
            interface.write_fmt(format_args!(
                "{}\n",
                Style::new().bold().paint(error.to_string())
            ))?;
        }
        if !string.trim().is_empty() {
            interface.add_history_unique(string);
        }
    }
    Ok(())
}

/// The reserved word that ends the session.
fn is_bye(line: &str) -> bool {
    line.trim() == BYE
}

/// Completes word names from the resident dictionary.
struct WordCompleter {
    words: Vec<String>,
}

impl WordCompleter {
    fn new(runtime: &Runtime) -> WordCompleter {
        let words = match runtime.dictionary().words() {
            Ok(headers) => headers.into_iter().map(|h| h.name).collect(),
            Err(_) => vec![],
        };
        WordCompleter { words }
    }

    fn matches(&self, word: &str) -> Vec<String> {
        let mut found: Vec<String> = self
            .words
            .iter()
            .filter(|w| w.starts_with(word))
            .cloned()
            .collect();
        found.sort();
        found.dedup();
        found
    }
}

impl<Term: Terminal> Completer<Term> for WordCompleter {
    fn complete(
        &self,
        word: &str,
        _prompter: &Prompter<Term>,
        _start: usize,
        _end: usize,
    ) -> Option<Vec<Completion>> {
        let found = self.matches(word);
        if found.is_empty() {
            return None;
        }
        Some(found.into_iter().map(Completion::simple).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_bye() {
        assert!(is_bye("bye"));
        assert!(is_bye("  bye\r\n"));
        assert!(!is_bye("bye now"));
        assert!(!is_bye("BYE"));
        assert!(!is_bye(""));
    }

    #[test]
    fn test_completer_without_dictionary() {
        let runtime = Runtime::new(Config::default().with_capacity(16));
        assert!(WordCompleter::new(&runtime).matches("").is_empty());
    }

    #[test]
    fn test_completer_matches_prefix() {
        let c = WordCompleter {
            words: vec!["dup".into(), "drop".into(), "swap".into(), "dup".into()],
        };
        assert_eq!(c.matches("d"), vec!["drop", "dup"]);
        assert!(c.matches("x").is_empty());
    }
}
