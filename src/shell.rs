use std::io::{self, BufRead, Write};

/// What the operator picked at the exit menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    Restart,
    Terminate,
}

pub fn parse_start_id(input: &str) -> Result<u64, &'static str> {
    match input.trim().parse::<u64>() {
        Ok(0) => Err("start ID must be greater than 0"),
        Ok(id) => Ok(id),
        Err(_) => Err("please enter a valid number"),
    }
}

pub fn parse_end_id(input: &str, start_id: u64) -> Result<u64, &'static str> {
    match input.trim().parse::<u64>() {
        Ok(id) if id < start_id => Err("end ID must be greater than or equal to the start ID"),
        Ok(id) => Ok(id),
        Err(_) => Err("please enter a valid number"),
    }
}

/// Save confirmation; affirmatives accepted in both supported locales.
pub fn parse_save_choice(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "y" | "yes" | "是" | "保存"
    )
}

pub fn parse_next_action(input: &str) -> Option<NextAction> {
    match input.trim().to_uppercase().as_str() {
        "T" => Some(NextAction::Terminate),
        "S" => Some(NextAction::Restart),
        _ => None,
    }
}

/// Prompt for start and end IDs, re-prompting until both are valid.
pub fn prompt_range() -> io::Result<(u64, u64)> {
    let start_id = loop {
        let line = prompt_line("Enter start ID: ")?;
        match parse_start_id(&line) {
            Ok(id) => break id,
            Err(msg) => println!("{msg}"),
        }
    };
    let end_id = loop {
        let line = prompt_line("Enter end ID: ")?;
        match parse_end_id(&line, start_id) {
            Ok(id) => break id,
            Err(msg) => println!("{msg}"),
        }
    };
    Ok((start_id, end_id))
}

pub fn prompt_save() -> io::Result<bool> {
    let line = prompt_line("\nSave scan results to a file? (y/n): ")?;
    Ok(parse_save_choice(&line))
}

/// Exit menu; loops until the operator picks one of the two options.
pub fn prompt_next_action() -> io::Result<NextAction> {
    loop {
        let line = prompt_line("\nExit (T) / Restart (S): ")?;
        match parse_next_action(&line) {
            Some(action) => return Ok(action),
            None => println!("please enter T or S"),
        }
    }
}

/// Print a prompt and read one line. A closed stdin is an error, so callers
/// terminate instead of spinning on an empty reader.
fn prompt_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(line)
}
