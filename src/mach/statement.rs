use super::{Address, Host, LoopControl, Runtime, ValType};
use crate::error;
use crate::lang::{format_number, latin1, parse_leading_float, Error, Keyword, Name, Tok, SAVE_SLOTS};
use log::debug;

type Result<T> = std::result::Result<T, Error>;

/// ## Statements
///
/// Each handler starts on the statement's first token and leaves the
/// cursor on the first token after it. Side effects happen only in
/// execute mode. A handler returns whether a `:` or end of line must
/// follow; IF is the only statement that does not need one.

impl<H: Host> Runtime<H> {
    pub(super) fn statement(&mut self) -> Result<bool> {
        use Keyword::*;
        let keyword = match self.cur {
            Tok::Ident(_) => {
                self.assignment(false)?;
                return Ok(true);
            }
            Tok::Keyword(keyword) => keyword,
            _ => return Err(error!(UnexpectedCommand)),
        };
        match keyword {
            Print => self.print_statement()?,
            Let => {
                self.next_token();
                self.assignment(false)?;
            }
            Input => {
                self.next_token();
                self.assignment(true)?;
            }
            List => self.list_statement()?,
            Run => self.run_statement()?,
            Goto => self.goto_statement()?,
            Gosub => self.gosub_statement()?,
            Rem => {
                while self.cur != Tok::Eol {
                    self.next_token();
                }
            }
            If => {
                self.if_statement()?;
                return Ok(false);
            }
            For => self.for_statement()?,
            Next => self.next_statement()?,
            Dim => self.dim_statement()?,
            Pause => self.pause_statement()?,
            Save | Load => self.load_save(keyword)?,
            Delete => self.delete_statement()?,
            Position | Pin | PinMode => self.two_args(keyword)?,
            New | Stop | Cont | Return | Cls | Dir => self.simple_statement(keyword)?,
            _ => return Err(error!(UnexpectedCommand)),
        }
        Ok(true)
    }

    fn at_statement_end(&self) -> bool {
        matches!(self.cur, Tok::Eol | Tok::Keyword(Keyword::Colon))
    }

    fn pop_line_number(&mut self) -> Result<u16> {
        let val = self.arena.pop_float()?;
        if val < 1.0 || val > u16::MAX as f32 {
            return Err(error!(BadLineNumber));
        }
        Ok(val as u16)
    }

    fn here(&self) -> Address {
        Address {
            line: self.line,
            stmt: self.stmt,
        }
    }

    fn print_statement(&mut self) -> Result<()> {
        self.next_token();
        let mut new_line = true;
        while !self.at_statement_end() {
            let val_type = self.expression()?;
            if self.execute {
                match val_type {
                    ValType::Number => {
                        let val = self.arena.pop_float()?;
                        self.host.write_str(&format_number(val));
                    }
                    ValType::String => {
                        let s = self.arena.pop_str()?;
                        self.host.write_bytes(self.arena.str_bytes(s));
                    }
                }
            }
            new_line = true;
            if self.cur == Tok::Keyword(Keyword::Semicolon) {
                new_line = false;
                self.next_token();
            }
        }
        if self.execute && new_line {
            self.host.new_line();
        }
        Ok(())
    }

    /// `name[(subscripts)] = expr`, or the INPUT form which reads the
    /// value from the host instead of the `=` expression.
    fn assignment(&mut self, input: bool) -> Result<()> {
        let name = match self.cur {
            Tok::Ident(name) => name,
            _ => return Err(error!(UnexpectedToken)),
        };
        self.next_token();
        let is_array = self.cur == Tok::Keyword(Keyword::LParen);
        if is_array {
            self.subscripts()?;
        }
        let val_type = if input {
            if self.execute {
                self.read_input(&name)?;
            }
            ValType::of_name(name.is_string())
        } else {
            if self.cur != Tok::Keyword(Keyword::Equal) {
                return Err(error!(UnexpectedToken));
            }
            self.next_token();
            self.expression()?
        };
        match (name.is_string(), val_type) {
            (false, ValType::String) => return Err(error!(ExpectedNumber)),
            (true, ValType::Number) => return Err(error!(ExpectedString)),
            _ => {}
        }
        if !self.execute {
            return Ok(());
        }
        match (name.is_string(), is_array) {
            (false, false) => {
                let val = self.arena.pop_float()?;
                self.arena.store_scalar(&name, val)
            }
            (false, true) => {
                let val = self.arena.pop_float()?;
                self.arena.store_num_element(&name, val)
            }
            (true, false) => self.arena.store_string_from_stack(&name),
            (true, true) => self.arena.store_str_element_from_stack(&name),
        }
    }

    fn read_input(&mut self, name: &Name) -> Result<()> {
        let text = match self.host.read_line() {
            Some(text) => text,
            None => return Err(error!(BreakPressed)),
        };
        if name.is_string() {
            self.arena.push_str(&latin1(&text))
        } else {
            self.arena.push_float(parse_leading_float(&text))
        }
    }

    fn list_statement(&mut self) -> Result<()> {
        self.next_token();
        let mut first = None;
        let mut last = None;
        if !self.at_statement_end() && self.cur != Tok::Keyword(Keyword::Comma) {
            self.expect_number()?;
            if self.execute {
                first = self.pop_list_bound()?;
            }
        }
        if self.cur == Tok::Keyword(Keyword::Comma) {
            self.next_token();
            self.expect_number()?;
            if self.execute {
                last = self.pop_list_bound()?;
            }
        }
        if self.execute {
            let mut listing = String::new();
            if self.arena.list(first, last, &mut listing).is_err() {
                return Err(error!(InternalError));
            }
            self.host.write_str(&listing);
        }
        Ok(())
    }

    /// Zero or less means no bound.
    fn pop_list_bound(&mut self) -> Result<Option<u16>> {
        let val = self.arena.pop_float()?;
        Ok(if val < 1.0 {
            None
        } else {
            Some(val.min(u16::MAX as f32) as u16)
        })
    }

    fn run_statement(&mut self) -> Result<()> {
        self.next_token();
        let mut start = 1;
        if !self.at_statement_end() {
            self.expect_number()?;
            if self.execute {
                start = self.pop_line_number()?;
            }
        }
        if self.execute {
            debug!("RUN from {}", start);
            self.arena.clear_variables();
            self.stop = None;
            self.jump = Some(Address {
                line: start,
                stmt: 0,
            });
        }
        Ok(())
    }

    fn goto_statement(&mut self) -> Result<()> {
        self.next_token();
        self.expect_number()?;
        if self.execute {
            let line = self.pop_line_number()?;
            self.jump = Some(Address { line, stmt: 0 });
        }
        Ok(())
    }

    fn gosub_statement(&mut self) -> Result<()> {
        self.next_token();
        self.expect_number()?;
        if self.execute {
            let line = self.pop_line_number()?;
            self.arena.push_frame(self.here())?;
            self.jump = Some(Address { line, stmt: 0 });
        }
        Ok(())
    }

    fn if_statement(&mut self) -> Result<()> {
        self.next_token();
        self.expect_number()?;
        if self.cur != Tok::Keyword(Keyword::Then) {
            return Err(error!(MissingThen));
        }
        self.next_token();
        if self.execute && self.arena.pop_float()? == 0.0 {
            self.break_line = true;
        }
        Ok(())
    }

    fn for_statement(&mut self) -> Result<()> {
        self.next_token();
        let name = self.numeric_name()?;
        self.next_token();
        if self.cur != Tok::Keyword(Keyword::Equal) {
            return Err(error!(UnexpectedToken));
        }
        self.next_token();
        let val = self.numeric_arg()?;
        if self.cur != Tok::Keyword(Keyword::To) {
            return Err(error!(UnexpectedToken));
        }
        self.next_token();
        let end = self.numeric_arg()?;
        let mut step = 1.0;
        if self.cur == Tok::Keyword(Keyword::Step) {
            self.next_token();
            step = self.numeric_arg()?;
        }
        if self.execute {
            let lc = LoopControl {
                val,
                step,
                end,
                line: self.line,
                stmt: self.stmt,
            };
            self.arena.store_loop_control(&name, &lc)?;
        }
        Ok(())
    }

    fn next_statement(&mut self) -> Result<()> {
        self.next_token();
        let name = self.numeric_name()?;
        self.next_token();
        if self.execute {
            let mut lc = self.arena.lookup_loop_control(&name)?;
            lc.val += lc.step;
            self.arena.store_scalar(&name, lc.val)?;
            if lc.in_range() {
                self.jump = Some(Address {
                    line: lc.line,
                    stmt: lc.stmt + 1,
                });
            }
        }
        Ok(())
    }

    fn numeric_name(&self) -> Result<Name> {
        match self.cur {
            Tok::Ident(name) if !name.is_string() => Ok(name),
            _ => Err(error!(UnexpectedToken)),
        }
    }

    /// A numeric expression, popped right away in execute mode.
    fn numeric_arg(&mut self) -> Result<f32> {
        self.expect_number()?;
        if self.execute {
            self.arena.pop_float()
        } else {
            Ok(0.0)
        }
    }

    fn dim_statement(&mut self) -> Result<()> {
        self.next_token();
        let name = match self.cur {
            Tok::Ident(name) => name,
            _ => return Err(error!(UnexpectedToken)),
        };
        self.next_token();
        self.subscripts()?;
        if self.execute {
            self.arena.create_array_from_stack(&name, name.is_string())?;
        }
        Ok(())
    }

    fn pause_statement(&mut self) -> Result<()> {
        self.next_token();
        let ms = self.numeric_arg()?;
        if self.execute {
            if ms < 0.0 {
                return Err(error!(BadParameter));
            }
            self.host.sleep(ms.min(u32::MAX as f32) as u32);
        }
        Ok(())
    }

    fn load_save(&mut self, keyword: Keyword) -> Result<()> {
        self.next_token();
        let mut autorun = false;
        let mut slot = None;
        if keyword == Keyword::Save && self.cur == Tok::Keyword(Keyword::Plus) {
            self.next_token();
            autorun = true;
        } else if !self.at_statement_end() {
            slot = Some(self.numeric_arg()?);
        }
        if !self.execute {
            return Ok(());
        }
        let slot = match slot {
            Some(val) if val < 0.0 || val >= SAVE_SLOTS as f32 => {
                return Err(error!(BadParameter));
            }
            Some(val) => val as u16,
            None => 0,
        };
        if keyword == Keyword::Save {
            debug!("SAVE slot {} autorun {}", slot, autorun);
            self.host
                .save_program(slot, autorun, self.arena.program_bytes())
        } else {
            debug!("LOAD slot {}", slot);
            let image = self.host.load_program(slot)?;
            self.install_program(&image)?;
            self.break_line = true;
            Ok(())
        }
    }

    fn delete_statement(&mut self) -> Result<()> {
        self.next_token();
        if self.expression()? != ValType::String {
            return Err(error!(ExpectedString));
        }
        if self.execute {
            let s = self.arena.pop_str()?;
            let name: String = self.arena.str_bytes(s).iter().map(|&b| b as char).collect();
            self.host.delete_program(&name)?;
        }
        Ok(())
    }

    fn two_args(&mut self, keyword: Keyword) -> Result<()> {
        self.next_token();
        let first = self.numeric_arg()? as i32;
        if self.cur != Tok::Keyword(Keyword::Comma) {
            return Err(error!(UnexpectedToken));
        }
        self.next_token();
        let second = self.numeric_arg()? as i32;
        if self.execute {
            match keyword {
                Keyword::Position => self.host.move_cursor(first, second),
                Keyword::Pin => self.host.digital_write(first, second),
                _ => self.host.pin_mode(first, second),
            }
        }
        Ok(())
    }

    fn simple_statement(&mut self, keyword: Keyword) -> Result<()> {
        self.next_token();
        if !self.execute {
            return Ok(());
        }
        match keyword {
            Keyword::New => {
                self.reset();
                self.break_line = true;
            }
            Keyword::Stop => {
                self.stop = if self.line == 0 {
                    None
                } else {
                    Some(self.here())
                };
                return Err(error!(StopStatement));
            }
            Keyword::Cont => {
                if let Some(stop) = self.stop {
                    self.jump = Some(Address {
                        line: stop.line,
                        stmt: stop.stmt + 1,
                    });
                }
            }
            Keyword::Return => match self.arena.pop_frame() {
                Some(ret) => {
                    self.jump = Some(Address {
                        line: ret.line,
                        stmt: ret.stmt + 1,
                    })
                }
                None => return Err(error!(ReturnWithoutGosub)),
            },
            Keyword::Cls => self.host.cls(),
            _ => {
                for row in self.host.list_programs()? {
                    self.host.write_str(&row);
                    self.host.new_line();
                }
            }
        }
        Ok(())
    }
}
