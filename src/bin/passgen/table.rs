use std::io::{self, Write};

use anyhow::Context;
use unicode_width::UnicodeWidthStr;

use passgen::{CharacterClass, Mode};

const HEADER: [&str; 3] = ["Class", "Size", "Characters"];

pub(crate) fn list_classes(mode: Mode) -> Result<(), crate::ProgError> {
    write_class_table(&CharacterClass::ALL, mode, io::stdout().lock())
        .context("failed to output table")?;
    Ok(())
}

/// Write one row per class: its name, how many characters it adds, and the characters.
fn write_class_table(
    classes: &[CharacterClass],
    mode: Mode,
    mut output: impl Write,
) -> io::Result<()> {
    let rows = classes
        .iter()
        .map(|class| {
            let characters = class.alphabet(mode);
            [
                class.name().to_owned(),
                characters.chars().count().to_string(),
                characters.to_owned(),
            ]
        })
        .collect::<Vec<_>>();

    let mut widths = HEADER.map(|heading| heading.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    write_row(&mut output, &widths, HEADER)?;
    write_row(&mut output, &widths, widths.map(|width| "─".repeat(width)))?;
    for row in &rows {
        write_row(&mut output, &widths, row)?;
    }
    Ok(())
}

fn write_row<S: AsRef<str>>(
    output: &mut impl Write,
    widths: &[usize; 3],
    cells: impl IntoIterator<Item = S>,
) -> io::Result<()> {
    let mut line = String::new();
    for (column, (cell, width)) in cells.into_iter().zip(widths).enumerate() {
        let cell = cell.as_ref();
        if column > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        line.extend(std::iter::repeat(' ').take(width.saturating_sub(cell.width())));
    }
    writeln!(output, "{}", line)
}
