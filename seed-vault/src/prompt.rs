use std::io::{self, BufRead, Write};

/// Operator input. Every command that asks questions goes through this so tests can script it.
pub trait Prompt {
    fn input(&mut self, label: &str) -> io::Result<String>;

    /// Reads without echo.
    fn password(&mut self, label: &str) -> io::Result<String>;

    fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool>;
}

pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn input(&mut self, label: &str) -> io::Result<String> {
        print!("{label}: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        Ok(line.trim().to_string())
    }

    fn password(&mut self, label: &str) -> io::Result<String> {
        rpassword::prompt_password(format!("{label}: "))
    }

    fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        let answer = self.input(&format!("{question} [{hint}]"))?;
        Ok(parse_yes_no(&answer).unwrap_or(default))
    }
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Answers questions from a fixed script, in order.
#[cfg(test)]
pub struct ScriptedPrompt {
    answers: std::collections::VecDeque<String>,
}

#[cfg(test)]
impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, label: &str) -> io::Result<String> {
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, format!("no answer for {label:?}"))
        })
    }
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn input(&mut self, label: &str) -> io::Result<String> {
        self.next(label)
    }

    fn password(&mut self, label: &str) -> io::Result<String> {
        self.next(label)
    }

    fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool> {
        Ok(parse_yes_no(&self.next(question)?).unwrap_or(default))
    }
}
