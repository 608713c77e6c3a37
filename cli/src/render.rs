use std::collections::BTreeSet;
use std::fmt::{self, Write};

use minefield_core::*;

const HIDDEN: char = '#';
const FLAG: char = 'F';
const WRONG_FLAG: char = 'x';
const MINE: char = '*';
const TRIGGERED: char = 'X';
const EMPTY: char = '.';

fn glyph(view: CellView, triggered: bool) -> char {
    if triggered {
        return TRIGGERED;
    }
    if view.is_incorrect_flag() {
        return WRONG_FLAG;
    }
    if view.flagged {
        return FLAG;
    }
    match (view.mine, view.adjacent_count) {
        (Some(true), _) => MINE,
        (_, Some(0)) => EMPTY,
        (_, Some(count)) => char::from(b'0' + count),
        _ => HIDDEN,
    }
}

fn write_header(out: &mut String, cols: Coord, width: usize) -> fmt::Result {
    write!(out, "{:width$} ", "")?;
    for col in 0..cols {
        write!(out, " {:>width$}", col)?;
    }
    writeln!(out)
}

fn write_status(out: &mut String, phase: GamePhase, remaining_flags: i64) -> fmt::Result {
    write!(out, "{:?}, flags left: {}", phase, remaining_flags)
}

fn digits(n: Coord) -> usize {
    (n.max(1) - 1).to_string().len()
}

/// Draws the board as a text grid with row and column indices.
pub fn render_board(board: &Board) -> anyhow::Result<String> {
    let (rows, cols) = board.size();
    let width = digits(rows.max(cols));
    let mut out = String::new();

    write_header(&mut out, cols, width)?;
    for row in 0..rows {
        write!(out, "{:>width$} ", row)?;
        for col in 0..cols {
            let view = board.cell_view((row, col))?;
            let triggered = board.triggered_mine() == Some((row, col));
            write!(out, " {:>width$}", glyph(view, triggered))?;
        }
        writeln!(out)?;
    }
    write_status(&mut out, board.phase(), board.remaining_flags())?;
    Ok(out)
}

/// Draws a grid for a board whose mines are not placed yet, showing only the flags.
pub fn render_pending(
    config: GameConfig,
    flags: &BTreeSet<Coord2>,
    remaining_flags: i64,
) -> anyhow::Result<String> {
    let (rows, cols) = config.size();
    let width = digits(rows.max(cols));
    let mut out = String::new();

    write_header(&mut out, cols, width)?;
    for row in 0..rows {
        write!(out, "{:>width$} ", row)?;
        for col in 0..cols {
            let glyph = if flags.contains(&(row, col)) { FLAG } else { HIDDEN };
            write!(out, " {:>width$}", glyph)?;
        }
        writeln!(out)?;
    }
    write_status(&mut out, GamePhase::NotStarted, remaining_flags)?;
    Ok(out)
}
