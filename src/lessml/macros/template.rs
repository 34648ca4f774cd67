//! Text templates
//!
//!     Templates are written with the template quotation (backticks by default) around a
//!     `Name(args)` header, either as a key with no value or as a literal line on its own:
//!
//!         `Template Box($W, $H)`:
//!             Width = $W
//!             Height = $H
//!
//!         Border:
//!             `Box(10, 20)`
//!
//!     A header starting with `Template ` (any case) defines a template: the node is removed
//!     and its children become the template body. Any other header invokes one: the node is
//!     replaced by a copy of the body in which every parameter name is replaced by the
//!     argument text, in every key, operator and value fragment.
//!
//!     Replacement is plain text substitution. Longer parameter names are substituted first,
//!     so `$Width` is not clobbered by a `$W` parameter.
//!
//!     Templates live only for one expansion pass and must be defined before they are used.
//!     A later definition with the same name replaces the earlier one.
//!
//!     Every expanded copy remembers how many invocations produced it. An invocation nested
//!     deeper than [MAX_NESTING] (a template that ends up invoking itself) fails with
//!     [LessmlError::InfiniteExpansion].

use std::collections::HashMap;

use crate::lessml::error::{LessmlError, Result};
use crate::lessml::fragment::QuotedFragment;
use crate::lessml::grammar::Quotation;
use crate::lessml::macros::header::parse_header;
use crate::lessml::macros::{Macro, MacroExpander, MacroResult};
use crate::lessml::tree::{NodeId, Tree};

const DEFINITION_PREFIX: &str = "template ";

/// Invocations allowed inside the expansion of other invocations
pub const MAX_NESTING: usize = 100;

struct TemplateDefinition {
    parameters: Vec<String>,
    body: Vec<NodeId>,
}

pub struct TemplateMacro {
    quotation: Quotation,
    templates: HashMap<String, TemplateDefinition>,
    /// Nesting depth of every expanded copy
    depths: HashMap<NodeId, usize>,
    expander: MacroExpander,
}

impl TemplateMacro {
    pub fn new() -> Self {
        Self::with_quotation(Quotation::template())
    }

    /// Recognise headers written with `quotation` instead of backticks
    pub fn with_quotation(quotation: Quotation) -> Self {
        TemplateMacro {
            quotation,
            templates: HashMap::new(),
            depths: HashMap::new(),
            expander: MacroExpander::new(),
        }
    }

    /// Driver used for the parameter substitution inside expanded bodies
    pub fn with_expander(mut self, expander: MacroExpander) -> Self {
        self.expander = expander;
        self
    }

    /// The header fragment, if `node` is a template definition or invocation
    fn header_of<'t>(&self, tree: &'t Tree, node: NodeId) -> Option<&'t QuotedFragment> {
        let node = tree.node(node);
        let fragment = match (&node.key, node.value.as_slice()) {
            (Some(key), []) => key,
            (None, [literal]) => literal,
            _ => return None,
        };
        fragment.is_quoted_with(&self.quotation).then_some(fragment)
    }

    /// Depth of the innermost expanded copy containing `node`, 0 outside of any
    fn depth_of(&self, tree: &Tree, node: NodeId) -> usize {
        let mut current = Some(node);
        while let Some(id) = current {
            if let Some(depth) = self.depths.get(&id) {
                return *depth;
            }
            current = tree.parent(id);
        }
        0
    }

    fn define(&mut self, tree: &mut Tree, node: NodeId, name: &str, parameters: Vec<String>) {
        let body = tree.take_children(node);
        tracing::debug!(name, parameters = parameters.len(), "template defined");
        if self
            .templates
            .insert(name.to_string(), TemplateDefinition { parameters, body })
            .is_some()
        {
            tracing::warn!(name, "template redefined");
        }
    }

    fn instantiate(&self, tree: &mut Tree, name: &str, arguments: Vec<String>) -> Result<Vec<NodeId>> {
        let definition = self
            .templates
            .get(name)
            .ok_or_else(|| LessmlError::UnknownTemplate {
                name: name.to_string(),
            })?;
        if definition.parameters.len() != arguments.len() {
            return Err(LessmlError::ParameterCountMismatch {
                name: name.to_string(),
                expected: definition.parameters.len(),
                found: arguments.len(),
            });
        }

        let mut substitution =
            ParameterSubstitution::new(definition.parameters.iter().cloned().zip(arguments));
        let mut copies = Vec::with_capacity(definition.body.len());
        for child in &definition.body {
            let copy = tree.deep_clone(*child);
            self.expander.expand(tree, copy, &mut substitution)?;
            copies.push(copy);
        }
        Ok(copies)
    }
}

impl Default for TemplateMacro {
    fn default() -> Self {
        Self::new()
    }
}

impl Macro for TemplateMacro {
    fn transform(&mut self, tree: &mut Tree, node: NodeId) -> Result<MacroResult> {
        let Some(header) = self.header_of(tree, node) else {
            return Ok(MacroResult::ContinueToChildren);
        };
        let header = parse_header(&header.snippet)?;

        let (Some(parent), Some(index)) = (tree.parent(node), tree.index_in_parent(node)) else {
            return Err(LessmlError::StructuralViolation(format!(
                "template `{}` has no enclosing node",
                header.name
            )));
        };
        let depth = self.depth_of(tree, node) + 1;
        tree.remove_child_at(parent, index);

        let is_definition = header
            .name
            .get(..DEFINITION_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DEFINITION_PREFIX));
        if is_definition {
            let name = header.name[DEFINITION_PREFIX.len()..].trim();
            self.define(tree, node, name, header.arguments);
        } else {
            if depth > MAX_NESTING {
                return Err(LessmlError::InfiniteExpansion { limit: MAX_NESTING });
            }
            let copies = self.instantiate(tree, &header.name, header.arguments)?;
            tracing::debug!(name = %header.name, nodes = copies.len(), depth, "template expanded");
            self.depths.extend(copies.iter().map(|copy| (*copy, depth)));
            tree.insert_children(parent, index, &copies);
        }
        Ok(MacroResult::Break)
    }
}

/// Replaces parameter names with argument text in every fragment of a subtree
pub struct ParameterSubstitution {
    replacements: Vec<(String, String)>,
}

impl ParameterSubstitution {
    pub fn new(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut replacements: Vec<(String, String)> = pairs
            .into_iter()
            .filter(|(name, _)| !name.is_empty())
            .collect();
        replacements.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        ParameterSubstitution { replacements }
    }
}

impl Macro for ParameterSubstitution {
    fn transform(&mut self, tree: &mut Tree, node: NodeId) -> Result<MacroResult> {
        for fragment in tree.node_mut(node).fragments_mut() {
            for (name, argument) in &self.replacements {
                if fragment.snippet.contains(name.as_str()) {
                    fragment.snippet = fragment.snippet.replace(name.as_str(), argument);
                }
            }
        }
        Ok(MacroResult::ContinueToChildren)
    }
}
