//! Two-pass counter directive resolution.
//!
//! The pre-pass registers the triggers declared by `reset` and `increment`
//! containers and removes the containers. The main pass walks the whole tree
//! in document order, fires triggers on every node and replaces each
//! reference with its value. All definitions are known before the first
//! reference is resolved.

use cnt_tree::{Action, Node, Position, visit, visit_parents};

use crate::{CounterRegistry, DEFAULT_DIRECTIVE, Intent, Reference, ReferenceError};

/// Resolves counter directives in a document tree.
///
/// Each [`process`](Self::process) call uses a fresh [`CounterRegistry`], so
/// no counter state leaks between documents.
#[derive(Debug, Clone)]
pub struct DirectiveResolver {
    directive: String,
}

impl Default for DirectiveResolver {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTIVE)
    }
}

impl DirectiveResolver {
    /// Create a resolver for directives called `directive`.
    #[must_use]
    pub fn new(directive: impl Into<String>) -> Self {
        Self {
            directive: directive.into(),
        }
    }

    /// Directive name this resolver handles.
    #[must_use]
    pub fn directive(&self) -> &str {
        &self.directive
    }

    /// Resolve every counter directive in `tree`, in place.
    ///
    /// Never fails: references to undefined counters become inline error
    /// markers and are listed in the returned [`Resolution`].
    pub fn process(&self, tree: &mut Node) -> Resolution {
        let mut registry = CounterRegistry::new();
        let mut resolution = Resolution::default();

        define_triggers(tree, &self.directive, &mut registry, &mut resolution);
        resolve_references(tree, &self.directive, &mut registry, &mut resolution);

        tracing::debug!(
            directive = %self.directive,
            counters = registry.len(),
            definitions = resolution.definitions,
            resolved = resolution.resolved,
            errors = resolution.errors.len(),
            "Resolved counter directives"
        );

        resolution
    }
}

/// Outcome of one resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Errors substituted into the tree, in document order.
    pub errors: Vec<ReferenceError>,
    /// References replaced by a value or removed after assignment.
    pub resolved: usize,
    /// Triggers registered by container definitions.
    pub definitions: usize,
}

impl Resolution {
    /// Whether no reference error was substituted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Pre-pass: register container definitions and remove the containers.
///
/// A `reset` container defines a counter for each direct child heading
/// holding a single bare reference, with a reset trigger at that heading's
/// position. Paragraphs holding a single bare reference define a counter
/// with no trigger. An `increment` container adds increment triggers for
/// headings only; the first name that is not defined yet replaces the whole
/// container with an error marker. Containers with neither key are left in
/// place.
pub fn define_triggers(
    tree: &mut Node,
    directive: &str,
    registry: &mut CounterRegistry,
    resolution: &mut Resolution,
) {
    visit_parents(
        tree,
        |node| node.is_container_directive(directive),
        |visit| {
            let Node::ContainerDirective { args, children, .. } = visit.node() else {
                return Action::Continue;
            };

            if args.has("reset") {
                for (name, position) in definitions(children, directive, true) {
                    registry.define(&name, position);
                    resolution.definitions += 1;
                }
            } else if args.has("increment") {
                for (name, position) in definitions(children, directive, false) {
                    if !registry.add_increment_trigger(&name, position) {
                        let error = ReferenceError::new(name);
                        tracing::warn!(%error, "Increment group references undefined counter");
                        visit.replace(error.to_node());
                        resolution.errors.push(error);
                        return Action::Skip;
                    }
                    resolution.definitions += 1;
                }
            } else {
                return Action::Continue;
            }

            let index = visit.index();
            visit.remove();
            Action::ResumeAt(index)
        },
    );
}

/// Main pass: fire triggers on every node and resolve references.
///
/// `reset` references define and assign their counter and are removed.
/// `up`, `look` and bare references are replaced by the counter value, or
/// by a [`ReferenceError`] marker when the counter is not defined.
pub fn resolve_references(
    tree: &mut Node,
    directive: &str,
    registry: &mut CounterRegistry,
    resolution: &mut Resolution,
) {
    visit(tree, |visit| {
        registry.trigger(visit.node());

        let Some(Reference { name, intent }) = Reference::from_node(visit.node(), directive)
        else {
            return Action::Continue;
        };

        let value = match intent {
            Intent::Reset(value) => {
                registry.define(&name, None);
                registry.set(&name, value);
                tracing::debug!(name = %name, value, "Assigned counter");
                resolution.resolved += 1;

                let index = visit.index();
                visit.remove();
                return Action::ResumeAt(index);
            }
            Intent::Up => registry.up(&name),
            Intent::Look | Intent::Bare => registry.look(&name),
        };

        let replacement = if let Some(value) = value {
            resolution.resolved += 1;
            Node::text(value.to_string())
        } else {
            let error = ReferenceError::new(name);
            tracing::warn!(%error, "Reference to undefined counter");
            let node = error.to_node();
            resolution.errors.push(error);
            node
        };

        visit.replace(replacement);
        Action::Skip
    });
}

/// Definition candidates among the direct `children` of a container.
///
/// A candidate is a heading (or, with `paragraphs`, a paragraph) whose only
/// child is a bare reference. Headings yield their position, paragraphs none.
fn definitions(
    children: &[Node],
    directive: &str,
    paragraphs: bool,
) -> Vec<(String, Option<Position>)> {
    children
        .iter()
        .filter_map(|child| {
            let (inner, position) = match child {
                Node::Heading { children, .. } => (children, Some(child.position())),
                Node::Paragraph { children } if paragraphs => (children, None),
                _ => return None,
            };
            let [only] = inner.as_slice() else {
                return None;
            };
            Reference::from_node(only, directive)
                .filter(Reference::is_definition)
                .map(|reference| (reference.name, position))
        })
        .collect()
}
