//! Symbol table for a single translation unit.
//!
//! There is one flat scope: every distinct name gets exactly one entry,
//! and memory locations are handed out from a single counter in the
//! order names are first seen.

use core::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Function => "function",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub name: String,
    /// Kind recorded when the name was first seen.
    pub kind: SymbolKind,
    pub location: usize,
    /// Every line the name appears on, in the order encountered.
    pub lines: Vec<u32>,
    /// Declared result type, set by a function declaration.
    pub return_type: Option<Type>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: IndexMap<String, SymbolEntry>,
    next_location: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an occurrence of `name` on `line`.
    ///
    /// The first occurrence creates the entry with the next free location
    /// and the given kind; later ones only append the line.
    pub fn insert(&mut self, name: &str, line: u32, kind: SymbolKind) -> &mut SymbolEntry {
        match self.entries.entry(name.to_string()) {
            Entry::Occupied(occupied) => {
                let entry = occupied.into_mut();
                entry.lines.push(line);
                entry
            }
            Entry::Vacant(vacant) => {
                let location = self.next_location;
                self.next_location += 1;
                vacant.insert(SymbolEntry {
                    name: name.to_string(),
                    kind,
                    location,
                    lines: vec![line],
                    return_type: None,
                })
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    /// Memory location of `name`, if it has been seen.
    pub fn location(&self, name: &str) -> Option<usize> {
        self.lookup(name).map(|entry| entry.location)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in location order.
    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.values()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name           Type        Location   Line Numbers")?;
        writeln!(f, "-------------  --------    --------   ------------")?;
        for entry in self.iter() {
            write!(
                f,
                "{:<14} {:<12}{:<8}  ",
                entry.name,
                entry.kind.to_string(),
                entry.location
            )?;
            for line in &entry.lines {
                write!(f, "{line:4} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
