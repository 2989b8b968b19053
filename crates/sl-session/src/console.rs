use std::io::{self, Write};

/// Blocking line-oriented console. The labeling loop is single-threaded and
/// suspends on `read_line`; `Ok(None)` signals end of input.
pub trait Console {
    /// Print `text` followed by a newline.
    fn print(&mut self, text: &str);

    /// Show `prompt` (no trailing newline) and block for one line of input.
    /// The returned line is trimmed.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

impl<T: Console> Console for &mut T {
    fn print(&mut self, text: &str) {
        (**self).print(text);
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        (**self).read_line(prompt)
    }
}

/// Stdin/stdout console used by the real CLI.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn print(&mut self, text: &str) {
        println!("{text}");
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(input.trim().to_owned())),
            Err(err) => Err(err),
        }
    }
}
