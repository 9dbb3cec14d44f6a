// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Per-expression side tables.
//!
//! Expressions are addressed by their module index and expression index, so
//! facts about an expression can be recorded without touching the tree.

#[derive(Debug, Clone)]
pub struct Lookup<T> {
    modules: Vec<Vec<Option<T>>>,
}

impl<T> Default for Lookup<T> {
    fn default() -> Self {
        Self { modules: vec![] }
    }
}

impl<T: Clone> Lookup<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make room for `num_expressions` entries of module `module_idx`.
    pub fn reserve_module(&mut self, module_idx: u32, num_expressions: u32) {
        let m = module_idx as usize;
        if self.modules.len() <= m {
            self.modules.resize_with(m + 1, Vec::new);
        }
        let slots = &mut self.modules[m];
        if slots.len() < num_expressions as usize {
            slots.resize(num_expressions as usize, None);
        }
    }

    /// Record `value`, growing the table as needed.
    pub fn set(&mut self, module_idx: u32, eidx: u32, value: T) {
        self.reserve_module(module_idx, eidx + 1);
        self.modules[module_idx as usize][eidx as usize] = Some(value);
    }

    /// Entry for the expression. Unreserved slots read as `None`.
    pub fn get(&self, module_idx: u32, eidx: u32) -> Option<&T> {
        self.modules
            .get(module_idx as usize)?
            .get(eidx as usize)?
            .as_ref()
    }
}
