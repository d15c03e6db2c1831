use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::AppError;

// Line-oriented question/answer over any reader/writer pair.
// Unparsable answers are asked again; end of input is an error.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn ask<T: FromStr>(&mut self, question: &'static str) -> Result<T, AppError> {
        loop {
            write!(self.output, "{question}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(AppError::InputClosed(question.trim_end_matches([':', ' '])));
            }
            match line.trim().parse() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "Not a valid number: {:?}", line.trim())?,
            }
        }
    }

    pub fn say(&mut self, line: &str) -> Result<(), AppError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    // Value given on the command line, or asked for
    pub fn or_ask<T: FromStr>(
        &mut self,
        given: Option<T>,
        question: &'static str,
    ) -> Result<T, AppError> {
        match given {
            Some(value) => Ok(value),
            None => self.ask(question),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
