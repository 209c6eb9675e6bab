use super::Arena;
use crate::lang::render;
use std::fmt::Write;

impl Arena {
    /// Renders stored lines numbered within `first..=last`. A missing
    /// bound is unbounded.
    pub fn list<W: Write>(
        &self,
        first: Option<u16>,
        last: Option<u16>,
        out: &mut W,
    ) -> std::fmt::Result {
        for (number, tokens) in self.lines() {
            if first.map_or(false, |first| number < first) {
                continue;
            }
            if last.map_or(false, |last| number > last) {
                break;
            }
            write!(out, "{} ", number)?;
            render(tokens, out)?;
            out.write_char('\n')?;
        }
        Ok(())
    }

    /// One line as LIST shows it, without the newline.
    pub fn line_text(&self, number: u16) -> Option<String> {
        let (_, tokens) = self.lines().find(|(n, _)| *n == number)?;
        let mut s = format!("{} ", number);
        render(tokens, &mut s).ok()?;
        Some(s)
    }

    pub fn line_numbers(&self) -> impl Iterator<Item = u16> + '_ {
        self.lines().map(|(n, _)| n)
    }

    /// Smallest stored line number after `number`.
    pub fn next_line_number(&self, number: u16) -> Option<u16> {
        self.line_numbers().find(|&n| n > number)
    }

    /// Largest stored line number before `number`.
    pub fn previous_line_number(&self, number: u16) -> Option<u16> {
        self.line_numbers().take_while(|&n| n < number).last()
    }
}
