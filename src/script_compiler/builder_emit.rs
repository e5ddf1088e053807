/// builder_emit.rs
/// Line formatting for ScriptBuilder
///
use crate::script_compiler::builder::ScriptBuilder;
use log::debug;

/// Left indentation of every instruction and comment line
pub const INDENT: &str = "        ";

/// Column width reserved for the mnemonic
pub const MNEMONIC_WIDTH: usize = 24;

/// Render an auto or named label as an assembler symbol.
pub fn label_symbol(name: &str) -> String {
    format!("{}$", name)
}

/// Format one instruction line.
pub fn format_instruction(mnemonic: &str, operands: &[&str]) -> String {
    if operands.is_empty() {
        return format!("{}{}", INDENT, mnemonic);
    }
    let padding = MNEMONIC_WIDTH.saturating_sub(mnemonic.len()).max(1);
    format!(
        "{}{}{}{}",
        INDENT,
        mnemonic,
        " ".repeat(padding),
        operands.join(", ")
    )
}

/// Escape text for an `.asciz` directive.
pub fn escape_asciz(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

impl ScriptBuilder {
    pub fn emit(&mut self, mnemonic: &str, operands: &[&str]) {
        let line = format_instruction(mnemonic, operands);
        debug!("emit [depth {}] {}", self.stack.depth(), line.trim_start());
        self.output.push(line);
    }

    pub fn comment(&mut self, text: &str) {
        self.output.push(format!("{}; {}", INDENT, text));
    }

    pub fn raw_line(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    pub fn blank(&mut self) {
        self.output.push(String::new());
    }

    pub fn asciz(&mut self, text: &str) {
        self.output
            .push(format!("{}.asciz \"{}\"", INDENT, escape_asciz(text)));
    }

    pub(crate) fn label_line(&mut self, name: &str) {
        self.raw_line(&format!("{}:", label_symbol(name)));
    }

    /// Operand addressing a field of the local actor structure. Marks the
    /// script as needing the local actor preamble.
    pub(crate) fn actor_operand(&mut self, offset: usize) -> String {
        self.uses_local_actor = true;
        let depth = self.stack.depth();
        match (offset, depth) {
            (0, 0) => "ACTOR".to_string(),
            (0, d) => format!("^/(ACTOR - {})/", d),
            (n, 0) => format!("^/(ACTOR + {})/", n),
            (n, d) => format!("^/(ACTOR + {} - {})/", n, d),
        }
    }
}
