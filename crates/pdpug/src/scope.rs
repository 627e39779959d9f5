// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Variable scopes and dotted-path lookup.
//!
//! A [`Scope`] is either the root data map handed to the engine or a frame
//! that binds one loop variable on top of a parent scope. Frames borrow
//! their parent, so entering a loop body never copies or mutates the data
//! the rest of the template sees.

use crate::value::{Map, Value};

/// The data visible at one point during rendering.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    frame: Frame<'a>,
}

#[derive(Debug, Clone, Copy)]
enum Frame<'a> {
    Root(&'a Map),
    Binding {
        parent: &'a Scope<'a>,
        name: &'a str,
        value: &'a Value,
    },
}

impl<'a> Scope<'a> {
    /// Creates the root scope over the caller's data.
    pub fn new(data: &'a Map) -> Self {
        Self {
            frame: Frame::Root(data),
        }
    }

    /// Derives a child scope where `name` resolves to `value`.
    pub fn bind<'b>(&'b self, name: &'b str, value: &'b Value) -> Scope<'b>
    where
        'a: 'b,
    {
        Scope {
            frame: Frame::Binding {
                parent: self,
                name,
                value,
            },
        }
    }

    /// Resolves a dotted path such as `user.name`.
    ///
    /// Returns `None` as soon as a segment is missing or the current value
    /// has no children.
    pub fn lookup(&self, path: &str) -> Option<&'a Value> {
        let mut segments = path.split('.');
        let mut current = self.lookup_name(segments.next()?)?;
        for segment in segments {
            current = current.get_key(segment)?;
        }
        Some(current)
    }

    /// Resolves a dotted path to its text form; unresolved paths give `""`.
    pub fn get_text(&self, path: &str) -> String {
        self.lookup(path).map(Value::to_text).unwrap_or_default()
    }

    fn lookup_name(&self, wanted: &str) -> Option<&'a Value> {
        match self.frame {
            Frame::Root(map) => map.get(wanted),
            Frame::Binding {
                parent,
                name,
                value,
            } => {
                if name == wanted {
                    Some(value)
                } else {
                    parent.lookup_name(wanted)
                }
            }
        }
    }
}

/// Resolves a dotted path against a bare data map.
pub fn get<'a>(data: &'a Map, path: &str) -> Option<&'a Value> {
    Scope::new(data).lookup(path)
}
