//! Pre-order tree traversal with in-place mutation.
//!
//! Visitors may replace or remove the node they are visiting. The walk is
//! index based: after a removal the visitor returns
//! [`Action::ResumeAt`] with the vacated index, so the sibling that shifted
//! into that slot is still visited.

use std::mem;

use crate::{Node, Position};

/// Signal returned by a visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Descend into the node's children, then continue with the next sibling.
    Continue,
    /// Do not descend into the node's children.
    Skip,
    /// Stop the whole traversal.
    Exit,
    /// Continue with the sibling at this index, without descending.
    ResumeAt(usize),
}

/// Cursor over the node being visited.
///
/// Gives access to the node, its index among its siblings and the
/// positions of its ancestors (root first). Consuming methods mutate the
/// sibling list; the visitor must report what it did through the returned
/// [`Action`].
pub struct Visit<'a> {
    siblings: &'a mut Vec<Node>,
    index: usize,
    ancestors: &'a [Position],
}

impl Visit<'_> {
    /// The node being visited.
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.siblings[self.index]
    }

    /// Mutable access to the node being visited.
    pub fn node_mut(&mut self) -> &mut Node {
        &mut self.siblings[self.index]
    }

    /// Index of the node among its siblings.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Positions of all ancestors, root first.
    #[must_use]
    pub fn ancestors(&self) -> &[Position] {
        self.ancestors
    }

    /// Position of the direct parent, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Position> {
        self.ancestors.last().copied()
    }

    /// Replace the node with another one, returning the old node.
    ///
    /// Return [`Action::Skip`] afterwards unless the replacement should be
    /// descended into.
    pub fn replace(self, node: Node) -> Node {
        mem::replace(&mut self.siblings[self.index], node)
    }

    /// Remove the node from its parent, returning it.
    ///
    /// Return [`Action::ResumeAt`] with the old index afterwards.
    pub fn remove(self) -> Node {
        self.siblings.remove(self.index)
    }
}

/// Walk every node of `tree` in pre-order.
pub fn visit<V>(tree: &mut Node, visitor: V)
where
    V: FnMut(Visit<'_>) -> Action,
{
    visit_parents(tree, |_| true, visitor);
}

/// Walk `tree` in pre-order, calling `visitor` on nodes that pass `test`.
///
/// Nodes failing the test are still descended into.
///
/// # Example
///
/// ```
/// use cnt_tree::{Action, DirectiveArgs, Node, visit_parents};
///
/// let mut tree = Node::root(vec![Node::paragraph(vec![
///     Node::markup("a"),
///     Node::text_directive("cnt", DirectiveArgs::default()),
///     Node::markup("b"),
/// ])]);
///
/// visit_parents(
///     &mut tree,
///     |node| node.is_text_directive("cnt"),
///     |visit| {
///         let index = visit.index();
///         visit.remove();
///         Action::ResumeAt(index)
///     },
/// );
///
/// assert_eq!(
///     tree,
///     Node::root(vec![Node::paragraph(vec![Node::markup("a"), Node::markup("b")])])
/// );
/// ```
pub fn visit_parents<T, V>(tree: &mut Node, mut test: T, mut visitor: V)
where
    T: FnMut(&Node) -> bool,
    V: FnMut(Visit<'_>) -> Action,
{
    // The root is walked as a one-element forest so it can be visited like
    // any other node.
    let mut forest = vec![mem::take(tree)];
    walk(&mut forest, &mut Vec::new(), &mut test, &mut visitor);
    *tree = forest.pop().unwrap_or_default();
}

/// Returns `false` when the traversal was exited.
fn walk<T, V>(
    children: &mut Vec<Node>,
    ancestors: &mut Vec<Position>,
    test: &mut T,
    visitor: &mut V,
) -> bool
where
    T: FnMut(&Node) -> bool,
    V: FnMut(Visit<'_>) -> Action,
{
    let mut index = 0;

    while index < children.len() {
        if test(&children[index]) {
            let action = visitor(Visit {
                siblings: &mut *children,
                index,
                ancestors: ancestors.as_slice(),
            });

            match action {
                Action::Continue => {}
                Action::Skip => {
                    index += 1;
                    continue;
                }
                Action::Exit => return false,
                Action::ResumeAt(next) => {
                    index = next;
                    continue;
                }
            }
        }

        let node = &mut children[index];
        let position = node.position();
        if let Some(grandchildren) = node.children_mut() {
            ancestors.push(position);
            let proceed = walk(grandchildren, ancestors, test, visitor);
            ancestors.pop();
            if !proceed {
                return false;
            }
        }

        index += 1;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DirectiveArgs, NodeKind};
    use pretty_assertions::assert_eq;

    fn sample() -> Node {
        Node::root(vec![
            Node::heading(1, vec![Node::markup("a")]),
            Node::paragraph(vec![Node::markup("b"), Node::markup("c")]),
            Node::heading(2, vec![Node::markup("d")]),
        ])
    }

    fn markup_values(tree: &mut Node) -> Vec<String> {
        let mut values = Vec::new();
        visit(tree, |visit| {
            if let Node::Markup { value } = visit.node() {
                values.push(value.clone());
            }
            Action::Continue
        });
        values
    }

    #[test]
    fn test_visits_in_pre_order() {
        let mut tree = sample();
        let mut kinds = Vec::new();
        visit(&mut tree, |visit| {
            kinds.push(visit.node().kind());
            Action::Continue
        });

        assert_eq!(
            kinds,
            vec![
                NodeKind::Root,
                NodeKind::Heading,
                NodeKind::Markup,
                NodeKind::Paragraph,
                NodeKind::Markup,
                NodeKind::Markup,
                NodeKind::Heading,
                NodeKind::Markup,
            ]
        );
    }

    #[test]
    fn test_skip_does_not_descend() {
        let mut tree = sample();
        let mut count = 0;
        visit(&mut tree, |visit| {
            count += 1;
            if visit.node().kind() == NodeKind::Paragraph {
                Action::Skip
            } else {
                Action::Continue
            }
        });
        assert_eq!(count, 6);
    }

    #[test]
    fn test_exit_stops_traversal() {
        let mut tree = sample();
        let mut count = 0;
        visit(&mut tree, |visit| {
            count += 1;
            if visit.node().kind() == NodeKind::Paragraph {
                Action::Exit
            } else {
                Action::Continue
            }
        });
        assert_eq!(count, 4);
    }

    #[test]
    fn test_ancestors_and_parent() {
        let mut tree = sample();
        let mut seen = Vec::new();
        visit(&mut tree, |visit| {
            if visit.node().kind() == NodeKind::Markup {
                seen.push((visit.ancestors().len(), visit.parent()));
            }
            Action::Continue
        });
        assert_eq!(seen[0], (2, Some(Position::heading(1))));
        assert_eq!(
            seen[1],
            (2, Some(Position::new(NodeKind::Paragraph, None)))
        );
        assert_eq!(seen[3], (2, Some(Position::heading(2))));
    }

    #[test]
    fn test_removal_resumes_at_vacated_index() {
        let mut tree = Node::root(vec![Node::paragraph(vec![
            Node::text_directive("cnt", DirectiveArgs::default()),
            Node::text_directive("cnt", DirectiveArgs::default()),
            Node::markup("kept"),
        ])]);

        let mut visited = 0;
        visit(&mut tree, |visit| {
            visited += 1;
            if visit.node().is_text_directive("cnt") {
                let index = visit.index();
                visit.remove();
                return Action::ResumeAt(index);
            }
            Action::Continue
        });

        // root, paragraph, two directives and the shifted markup node
        assert_eq!(visited, 5);
        assert_eq!(markup_values(&mut tree), vec!["kept"]);
    }

    #[test]
    fn test_replace_with_skip() {
        let mut tree = sample();
        visit(&mut tree, |visit| {
            if visit.node().kind() == NodeKind::Paragraph {
                visit.replace(Node::text("replaced"));
                return Action::Skip;
            }
            Action::Continue
        });
        assert_eq!(markup_values(&mut tree), vec!["a", "d"]);
        assert_eq!(
            tree.children().map(|children| children[1].clone()),
            Some(Node::text("replaced"))
        );
    }

    #[test]
    fn test_filtered_walk_descends_into_unmatched_nodes() {
        let mut tree = sample();
        let mut matched = Vec::new();
        visit_parents(
            &mut tree,
            |node| node.kind() == NodeKind::Markup,
            |visit| {
                matched.push(visit.parent());
                Action::Continue
            },
        );
        assert_eq!(matched.len(), 4);
    }

    #[test]
    fn test_removing_root_leaves_empty_root() {
        let mut tree = sample();
        visit(&mut tree, |visit| {
            visit.remove();
            Action::ResumeAt(0)
        });
        assert_eq!(tree, Node::default());
    }
}
