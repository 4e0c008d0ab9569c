use std::io::{self, Write};

use crate::record::RecordWriter;

pub struct ShellPrompt {
    text: String,
}

impl ShellPrompt {
    pub fn new(text: &str) -> Self {
        ShellPrompt {
            text: text.to_string(),
        }
    }

    /// Plain prompts go to the diagnostic stream; structured ones are a record on `out`.
    pub fn show_prompt(
        &self,
        json: bool,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<()> {
        if json {
            let mut w = RecordWriter::begin(out)?;
            w.field_str("prompt", "hello")?;
            return w.end();
        }
        write!(err, "{}", self.text)?;
        err.flush()
    }
}
