// builder_branch.rs
// Conditional branching, labels and jumps for ScriptBuilder
//
// Conditionals are laid out false arm first:
//
//         VM_IF_CONST .OP         a, b, L1$, 0
//         <false arm>
//         VM_JUMP                 L2$
// L1$:
//         <true arm>
// L2$:
//
// Both arms must leave the stack at the depth it had before the test.

use crate::script_compiler::builder::{Branch, ScriptBuilder};
use crate::script_compiler::builder_emit::label_symbol;
use crate::script_compiler::error::CompilerError;
use log::debug;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl Comparison {
    /// Parse either an operator symbol or a GBVM condition name.
    pub fn parse(s: &str) -> Option<Comparison> {
        match s.trim().to_ascii_uppercase().as_str() {
            "==" | "EQ" | ".EQ" => Some(Comparison::Eq),
            "!=" | "NE" | ".NE" => Some(Comparison::Ne),
            "<" | "LT" | ".LT" => Some(Comparison::Lt),
            ">" | "GT" | ".GT" => Some(Comparison::Gt),
            "<=" | "LTE" | ".LTE" => Some(Comparison::Lte),
            ">=" | "GTE" | ".GTE" => Some(Comparison::Gte),
            _ => None,
        }
    }

    pub fn as_asm(self) -> &'static str {
        match self {
            Comparison::Eq => ".EQ",
            Comparison::Ne => ".NE",
            Comparison::Lt => ".LT",
            Comparison::Gt => ".GT",
            Comparison::Lte => ".LTE",
            Comparison::Gte => ".GTE",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_asm())
    }
}

/// Named labels may not look like auto labels (`1$`, `2$`, ...).
fn check_label_name(name: &str) -> Result<(), CompilerError> {
    if name.is_empty() || name.chars().all(|c| c.is_ascii_digit()) {
        return Err(CompilerError::InvalidArgument(
            "label".to_string(),
            format!("'{}' is reserved for generated labels", name),
        ));
    }
    Ok(())
}

impl ScriptBuilder {
    /// Define a label at the current position.
    pub(crate) fn label(&mut self, name: &str) -> Result<(), CompilerError> {
        self.stack.define_label(name)?;
        self.label_line(name);
        Ok(())
    }

    /// Unconditional jump to a label, forward or backward.
    pub(crate) fn jump(&mut self, name: &str) -> Result<(), CompilerError> {
        self.stack.jump_to(name)?;
        let target = label_symbol(name);
        self.emit("VM_JUMP", &[target.as_str()]);
        Ok(())
    }

    pub fn label_define(&mut self, name: &str) -> Result<(), CompilerError> {
        check_label_name(name)?;
        self.label(name)
    }

    pub fn label_goto(&mut self, name: &str) -> Result<(), CompilerError> {
        check_label_name(name)?;
        self.jump(name)
    }

    /// Compare `operand` against a constant and run one of two arms.
    pub fn if_const(
        &mut self,
        comparison: Comparison,
        operand: &str,
        value: i32,
        true_branch: Branch<'_>,
        false_branch: Branch<'_>,
    ) -> Result<(), CompilerError> {
        let true_label = self.stack.new_label();
        let end_label = self.stack.new_label();
        let baseline = self.stack.depth();
        debug!(
            "if {} {} {}: true -> {}$, join -> {}$, depth {}",
            operand, comparison, value, true_label, end_label, baseline
        );

        self.stack.jump_to(&true_label)?;
        let mnemonic = format!("VM_IF_CONST {}", comparison.as_asm());
        let value = value.to_string();
        let target = label_symbol(&true_label);
        self.emit(&mnemonic, &[operand, value.as_str(), target.as_str(), "0"]);

        self.lower_branch(false_branch)?;
        self.check_branch_depth(&true_label, baseline)?;
        self.jump(&end_label)?;

        self.label(&true_label)?;
        self.lower_branch(true_branch)?;
        self.check_branch_depth(&end_label, baseline)?;

        self.label(&end_label)
    }

    pub fn if_variable_true(
        &mut self,
        variable: &str,
        true_branch: Branch<'_>,
        false_branch: Branch<'_>,
    ) -> Result<(), CompilerError> {
        self.run_command("If Variable True", |sb| {
            let symbol = sb.context.resolve_variable(variable)?;
            sb.if_const(Comparison::Gt, &symbol, 0, true_branch, false_branch)
        })
    }

    pub fn if_variable_compare(
        &mut self,
        variable: &str,
        comparison: Comparison,
        value: i32,
        true_branch: Branch<'_>,
        false_branch: Branch<'_>,
    ) -> Result<(), CompilerError> {
        self.run_command("If Variable Compare", |sb| {
            let symbol = sb.context.resolve_variable(variable)?;
            sb.if_const(comparison, &symbol, value, true_branch, false_branch)
        })
    }

    pub fn script_end(&mut self) -> Result<(), CompilerError> {
        self.comment("Stop Script");
        self.emit("VM_STOP", &[]);
        Ok(())
    }

    fn check_branch_depth(&self, label: &str, baseline: usize) -> Result<(), CompilerError> {
        let depth = self.stack.depth();
        if depth != baseline {
            return Err(CompilerError::StackImbalance(
                label_symbol(label),
                baseline,
                depth,
            ));
        }
        Ok(())
    }
}
