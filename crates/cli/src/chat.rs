//! # Interactive Chat
//!
//! Reads one line at a time and feeds it to a [`Session`]. What a line means
//! depends on the session stage: first a major, then a program, then
//! questions. `/major <name>` and `/program <name>` jump back a step and
//! `/quit` (or end of input) leaves.

use abroad_rag::{Advisor, Session, Stage};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::app::write_summary;

/// Resolves a 1-based list number to its entry; anything else is taken as is.
fn pick<'a>(input: &'a str, options: &'a [String]) -> &'a str {
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .map_or(input, String::as_str)
}

fn write_numbered(options: &[String], out: &mut impl Write) -> Result<()> {
    for (i, option) in options.iter().enumerate() {
        writeln!(out, "  {}. {option}", i + 1)?;
    }
    Ok(())
}

fn write_prompt(session: &Session, out: &mut impl Write) -> Result<()> {
    let prompt = match session.stage() {
        Stage::Idle => "Select a major (name or number):",
        Stage::MajorSelected => "Select a program (name or number):",
        _ => "Ask a question about the program:",
    };
    writeln!(out, "{prompt}")?;
    out.flush()?;
    Ok(())
}

fn select_major(session: &mut Session, major: &str, out: &mut impl Write) -> Result<()> {
    match session.select_major(major) {
        Ok(programs) => {
            let programs = programs.to_vec();
            writeln!(out, "Programs for {major}:")?;
            write_numbered(&programs, out)?;
        }
        Err(e) => writeln!(out, "{e}")?,
    }
    Ok(())
}

fn select_program(session: &mut Session, program: &str, out: &mut impl Write) -> Result<()> {
    match session.select_program(program) {
        Ok(details) => write_summary(&details, out)?,
        Err(e) => writeln!(out, "{e}")?,
    }
    Ok(())
}

/// Runs the interactive loop until `/quit` or end of input.
pub async fn run(advisor: Arc<Advisor>, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    let majors = advisor.majors().to_vec();
    let mut session = Session::new(advisor);

    writeln!(out, "Majors:")?;
    write_numbered(&majors, out)?;
    write_prompt(&session, out)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();

        if line == "/quit" {
            break;
        } else if let Some(major) = line.strip_prefix("/major") {
            let major = pick(major.trim(), &majors).to_string();
            select_major(&mut session, &major, out)?;
        } else if let Some(program) = line.strip_prefix("/program") {
            let program = pick(program.trim(), session.programs()).to_string();
            select_program(&mut session, &program, out)?;
        } else {
            match session.stage() {
                Stage::Idle => {
                    let major = pick(line, &majors).to_string();
                    select_major(&mut session, &major, out)?;
                }
                Stage::MajorSelected => {
                    let program = pick(line, session.programs()).to_string();
                    select_program(&mut session, &program, out)?;
                }
                _ => match session.ask(line).await {
                    Ok(answer) => writeln!(out, "\n{}\n", answer.text)?,
                    Err(e) => writeln!(out, "{e}")?,
                },
            }
        }
        write_prompt(&session, out)?;
    }

    Ok(())
}
