//! Prefix-code trees shared by both builders.
//!
//! A tree owns its nodes exclusively through boxed children; there are no
//! parent links. A node is either a leaf carrying a byte value or an internal
//! node with exactly two children. The path from the root to a leaf is that
//! leaf's code: `0` goes left, `1` goes right.

use bitvec::prelude::*;

use crate::compression::codebook::{render_code, Code, Codebook};
use crate::error::{Error, Result};

/// A node of a prefix-code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeNode {
    /// A leaf holds a byte value and its weight.
    Leaf { symbol: u8, weight: u64 },
    /// An internal node with left and right children and combined weight.
    Internal {
        weight: u64,
        left: Box<CodeNode>,
        right: Box<CodeNode>,
    },
}

impl CodeNode {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        CodeNode::Leaf { symbol, weight }
    }

    /// Join two subtrees under a new internal node weighing their sum.
    pub fn merge(left: CodeNode, right: CodeNode) -> Self {
        CodeNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Returns the weight of the node.
    pub fn weight(&self) -> u64 {
        match self {
            CodeNode::Leaf { weight, .. } => *weight,
            CodeNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn symbol(&self) -> Option<u8> {
        match self {
            CodeNode::Leaf { symbol, .. } => Some(*symbol),
            CodeNode::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, CodeNode::Leaf { .. })
    }

    fn leaf_count(&self) -> usize {
        match self {
            CodeNode::Leaf { .. } => 1,
            CodeNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            CodeNode::Leaf { .. } => 0,
            CodeNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// A complete prefix-code tree, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTree {
    root: Option<CodeNode>,
}

impl CodeTree {
    pub fn new(root: CodeNode) -> Self {
        CodeTree { root: Some(root) }
    }

    /// The tree of an empty input.
    pub fn empty() -> Self {
        CodeTree { root: None }
    }

    pub fn root(&self) -> Option<&CodeNode> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, CodeNode::leaf_count)
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, CodeNode::depth)
    }

    /// Derive the codebook from the tree's root-to-leaf paths.
    ///
    /// If the tree consists of a single leaf, that symbol gets the code `0`.
    pub fn codebook(&self) -> Codebook {
        let mut codebook = Codebook::new();
        if let Some(root) = &self.root {
            collect_codes(root, &mut Code::new(), &mut codebook);
        }
        codebook
    }

    /// Rebuild the tree a codebook describes.
    ///
    /// Weights are not recoverable from a codebook and are left at zero. A
    /// single-entry codebook yields the degenerate single-leaf tree and its
    /// code must be `0`, the code [`CodeTree::codebook`] gives a lone leaf;
    /// otherwise the codes must be prefix-free and complete, i.e. every
    /// internal node must end up with both children.
    pub fn from_codebook(codebook: &Codebook) -> Result<Self> {
        let entries: Vec<(u8, &BitSlice<u8, Msb0>)> = codebook
            .iter()
            .map(|(symbol, code)| (symbol, code.as_bitslice()))
            .collect();

        match entries.as_slice() {
            [] => Ok(CodeTree::empty()),
            [(symbol, code)] => {
                if code.len() != 1 || code[0] {
                    return Err(Error::MalformedCodebook(format!(
                        "lone byte {symbol:#04x} must have code `0`, found `{}`",
                        render_code(code)
                    )));
                }
                Ok(CodeTree::new(CodeNode::leaf(*symbol, 0)))
            }
            _ => rebuild(&entries, 0).map(CodeTree::new),
        }
    }
}

fn collect_codes(node: &CodeNode, prefix: &mut Code, codebook: &mut Codebook) {
    match node {
        CodeNode::Leaf { symbol, .. } => {
            let code = if prefix.is_empty() {
                bitvec![u8, Msb0; 0; 1]
            } else {
                prefix.clone()
            };
            codebook.insert(*symbol, code);
        }
        CodeNode::Internal { left, right, .. } => {
            prefix.push(false);
            collect_codes(left, prefix, codebook);
            prefix.pop();
            prefix.push(true);
            collect_codes(right, prefix, codebook);
            prefix.pop();
        }
    }
}

/// Build the subtree for `entries`, all of which share their first `depth` bits.
fn rebuild(entries: &[(u8, &BitSlice<u8, Msb0>)], depth: usize) -> Result<CodeNode> {
    if let [(symbol, code)] = entries {
        if code.len() == depth {
            return Ok(CodeNode::leaf(*symbol, 0));
        }
        return Err(Error::MalformedCodebook(format!(
            "code for byte {symbol:#04x} passes through a single-child node at depth {depth}"
        )));
    }

    if let Some((symbol, _)) = entries.iter().find(|(_, code)| code.len() <= depth) {
        return Err(Error::MalformedCodebook(format!(
            "code for byte {symbol:#04x} is a prefix of another code"
        )));
    }

    let (zeros, ones): (Vec<_>, Vec<_>) =
        entries.iter().copied().partition(|(_, code)| !code[depth]);
    if zeros.is_empty() || ones.is_empty() {
        return Err(Error::MalformedCodebook(format!(
            "codes are incomplete: a node at depth {depth} has a single child"
        )));
    }

    let left = rebuild(&zeros, depth + 1)?;
    let right = rebuild(&ones, depth + 1)?;
    Ok(CodeNode::merge(left, right))
}
