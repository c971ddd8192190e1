//! Interactive stdin prompts.

use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};
use vesture_core::{infer_style_type, StyleType, STYLE_SURVEY};

/// Ask for a body type by index or literal key.
pub fn choose_body_type(available: &[String]) -> Result<String> {
    if available.is_empty() {
        bail!("the body profile document defines no profiles");
    }

    println!("\n=== Body type ===");
    for (index, key) in available.iter().enumerate() {
        println!("  {}) {}", index + 1, key);
    }

    loop {
        let line = prompt("\nbody type (number or name): ")?;
        if let Ok(index) = line.parse::<usize>() {
            if (1..=available.len()).contains(&index) {
                return Ok(available[index - 1].clone());
            }
        }
        if available.iter().any(|key| key == &line) {
            return Ok(line);
        }
        println!("Not in the list, try again.");
    }
}

/// Run the 11-question survey; returns the inferred style and raw answers.
pub fn run_style_survey() -> Result<(StyleType, Vec<u8>)> {
    println!("\n=== Style survey ({} questions) ===", STYLE_SURVEY.len());
    println!("Answer 1, 2, or 3 for each question. (1=straight, 2=wave, 3=natural)\n");

    let mut answers = Vec::with_capacity(STYLE_SURVEY.len());
    for (index, question) in STYLE_SURVEY.iter().enumerate() {
        println!("[{}/{}] {}", index + 1, STYLE_SURVEY.len(), question.title);
        for (n, choice) in question.choices.iter().enumerate() {
            println!("  {}) {}", n + 1, choice);
        }
        answers.push(ask_choice()?);
        println!();
    }

    let style = infer_style_type(&answers).context("survey produced no usable answers")?;
    println!("Survey result: style_type = {style}  (answers: {answers:?})");
    Ok((style, answers))
}

fn ask_choice() -> Result<u8> {
    loop {
        let line = prompt("choice (1/2/3): ")?;
        match line.parse::<u8>() {
            Ok(answer @ 1..=3) => return Ok(answer),
            _ => println!("Please answer 1, 2, or 3."),
        }
    }
}

fn prompt(text: &str) -> Result<String> {
    print!("{text}");
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading stdin")?;
    if bytes == 0 {
        bail!("stdin closed before input was complete");
    }
    Ok(line.trim().to_string())
}
