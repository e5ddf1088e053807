// Stack depth and label bookkeeping for one script
//
// Every jump in GBVM must be stack neutral: the VM cannot reconcile a
// mismatched operand stack at the destination, so each label carries the
// depth it was defined at and every jump site is checked against it.

use crate::script_compiler::error::CompilerError;
use indexmap::IndexMap;
use log::debug;

#[derive(Debug)]
pub struct StackTracker {
    depth: usize,
    next_label: usize,
    // label name -> depth at definition
    defined: IndexMap<String, usize>,
    // label name -> depth at the first forward jump
    pending: IndexMap<String, usize>,
}

impl Default for StackTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StackTracker {
    pub fn new() -> Self {
        StackTracker {
            depth: 0,
            next_label: 1,
            defined: IndexMap::new(),
            pending: IndexMap::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Record `n` words pushed onto the operand stack.
    pub fn push(&mut self, n: usize) {
        debug!("stack push {}: {} -> {}", n, self.depth, self.depth + n);
        self.depth += n;
    }

    /// Record `n` words popped from the operand stack.
    pub fn pop(&mut self, n: usize) -> Result<(), CompilerError> {
        if n > self.depth {
            return Err(CompilerError::StackUnderflow(n, self.depth));
        }
        debug!("stack pop {}: {} -> {}", n, self.depth, self.depth - n);
        self.depth -= n;
        Ok(())
    }

    /// Allocate the next auto label. Names are never reused.
    pub fn new_label(&mut self) -> String {
        let label = self.next_label.to_string();
        self.next_label += 1;
        debug!("allocated label {}$", label);
        label
    }

    pub fn define_label(&mut self, name: &str) -> Result<(), CompilerError> {
        if self.defined.contains_key(name) {
            return Err(CompilerError::DuplicateLabel(name.to_string()));
        }
        if let Some(jump_depth) = self.pending.shift_remove(name) {
            if jump_depth != self.depth {
                return Err(CompilerError::StackImbalance(
                    name.to_string(),
                    jump_depth,
                    self.depth,
                ));
            }
        }
        debug!("defined label {}$ at depth {}", name, self.depth);
        self.defined.insert(name.to_string(), self.depth);
        Ok(())
    }

    pub fn jump_to(&mut self, name: &str) -> Result<(), CompilerError> {
        let expected = match self.defined.get(name) {
            Some(&label_depth) => Some(label_depth),
            None => self.pending.get(name).copied(),
        };
        match expected {
            Some(expected) if expected != self.depth => Err(CompilerError::StackImbalance(
                name.to_string(),
                expected,
                self.depth,
            )),
            Some(_) => Ok(()),
            None => {
                debug!(
                    "forward jump to {}$ at depth {}, checked at definition",
                    name, self.depth
                );
                self.pending.insert(name.to_string(), self.depth);
                Ok(())
            }
        }
    }

    /// Labels jumped to but never defined, in first-jump order.
    pub fn unresolved_labels(&self) -> impl Iterator<Item = &str> {
        self.pending.keys().map(String::as_str)
    }
}
